//! Single-line progress spinner for network calls.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Start a ticking spinner with `msg`. Hidden when `quiet` is set so it
/// doesn't interleave with debug logging.
pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
