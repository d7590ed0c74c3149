use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shazanime_themes::ThemesConfig;

use super::{build_resolver, new_runtime, print_match, record_history};
use crate::error::CliError;
use crate::spinner;

/// Resolve an artist/title pair to an anime theme.
pub(crate) fn run_resolve(
    artist: &str,
    title: &str,
    no_history: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let config = ThemesConfig::load()?;
    let resolver = build_resolver(&config)?;
    let rt = new_runtime()?;

    let found = rt.block_on(async {
        let pb = spinner::start(format!("Searching for '{}'...", title), verbose);
        let found = resolver.find_match(artist, title).await;
        pb.finish_and_clear();
        found
    });

    match found {
        Some(m) => {
            print_match(&m);
            if !no_history {
                record_history(&m.details, "");
            }
        }
        None => {
            log::info!(
                "{} No anime theme found for '{}'{}",
                "\u{2718}".if_supports_color(Stdout, |t| t.yellow()),
                title,
                if artist.is_empty() {
                    String::new()
                } else {
                    format!(" by {}", artist)
                },
            );
        }
    }
    Ok(())
}
