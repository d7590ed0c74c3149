pub(crate) mod config;
pub(crate) mod history;
pub(crate) mod identify;
pub(crate) mod resolve;

use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shazanime_lib::{HistoryLog, MappingsOrigin, ResolvedThemeDetails, settings};
use shazanime_themes::{AnimeThemesClient, ThemeMatch, ThemeResolver, ThemesConfig};

use crate::error::CliError;

/// Build a resolver from the endpoint config and the mapping tables.
pub(crate) fn build_resolver(
    config: &ThemesConfig,
) -> Result<ThemeResolver<AnimeThemesClient>, CliError> {
    let (mappings, origin) = shazanime_lib::load_mappings();
    if let MappingsOrigin::WithUserFile(path) = &origin {
        log::debug!("Using mapping overrides from {}", path.display());
    }
    let client = AnimeThemesClient::new(&config.api)?;
    Ok(ThemeResolver::new(client, Arc::new(mappings)))
}

pub(crate) fn new_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("failed to create tokio runtime: {}", e)))
}

/// Print a resolved theme.
pub(crate) fn print_match(m: &ThemeMatch) {
    let d = &m.details;
    log::info!(
        "{} {} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        d.song_name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", d.theme_label()).if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Anime:   {}{}",
        d.anime_name,
        d.year.map(|y| format!(" ({})", y)).unwrap_or_default(),
    );
    if !d.artist_names.is_empty() {
        log::info!("  Artists: {}", d.artist_names.join(", "));
    }
    if d.video_link.is_empty() {
        log::info!(
            "  Video:   {}",
            "none available".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!("  Video:   {}", d.video_link);
    }
    if !d.anime_image.is_empty() {
        log::info!(
            "  Cover:   {}",
            d.anime_image.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::debug!("Matched theme #{} by {} search", m.theme_id, m.stage);
}

/// Append a match to the history log, unless it is already there.
pub(crate) fn record_history(details: &ResolvedThemeDetails, cover_art: &str) {
    let path = settings::history_path();
    let mut history = HistoryLog::load_or_empty(&path);
    match history.add(details, cover_art) {
        Ok(true) => log::debug!("Recorded in {}", path.display()),
        Ok(false) => log::debug!("Already in history"),
        Err(e) => log::warn!("Could not update history: {}", e),
    }
}
