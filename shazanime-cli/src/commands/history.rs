use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shazanime_lib::{HistoryEntry, HistoryLog, settings};

use crate::error::CliError;

fn load() -> Result<HistoryLog, CliError> {
    Ok(HistoryLog::load(settings::history_path())?)
}

fn entry_line(entry: &HistoryEntry) -> String {
    let label = match (entry.theme_type, entry.sequence) {
        (Some(t), Some(n)) => format!("{}{}", t, n),
        (Some(t), None) => t.to_string(),
        _ => String::new(),
    };
    let when = entry
        .recorded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!(
        "{} {} {} {}",
        when.if_supports_color(Stdout, |t| t.dimmed()),
        entry.song_name.if_supports_color(Stdout, |t| t.bold()),
        label.if_supports_color(Stdout, |t| t.cyan()),
        entry.artist_names.join(", "),
    )
}

/// List history entries, newest first.
pub(crate) fn run_history_list() -> Result<(), CliError> {
    let history = load()?;
    if history.entries().is_empty() {
        log::info!("History is empty");
        return Ok(());
    }
    for entry in history.entries() {
        log::info!("{}  [{}]", entry_line(entry), entry.anime_name);
    }
    Ok(())
}

/// List history entries grouped by anime.
pub(crate) fn run_history_grouped() -> Result<(), CliError> {
    let history = load()?;
    let groups = history.grouped_by_anime();
    if groups.is_empty() {
        log::info!("History is empty");
        return Ok(());
    }
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            log::info!("");
        }
        log::info!(
            "{}{}",
            group.anime_name.if_supports_color(Stdout, |t| t.bold()),
            group.year.map(|y| format!(" ({})", y)).unwrap_or_default(),
        );
        for entry in &group.songs {
            log::info!("  {}", entry_line(entry));
        }
    }
    Ok(())
}

pub(crate) fn run_history_clear() -> Result<(), CliError> {
    let mut history = load()?;
    let count = history.entries().len();
    history.clear()?;
    log::info!(
        "{} Cleared {} entr{}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        count,
        if count == 1 { "y" } else { "ies" },
    );
    Ok(())
}
