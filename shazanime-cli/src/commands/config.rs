use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shazanime_lib::{MappingsOrigin, settings};
use shazanime_themes::{ConfigSource, ThemesConfig};

use crate::error::CliError;

fn setting_line(name: &str, value: Option<&str>, source: &ConfigSource) {
    let source_str = format!("({})", source);
    log::info!(
        "  {} {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        match value {
            Some(v) => v.to_string(),
            None => "not set".if_supports_color(Stdout, |t| t.yellow()).to_string(),
        },
        source_str.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

fn file_status(label: &str, path: &std::path::Path) {
    let status = if path.exists() { "(exists)" } else { "(not found)" };
    log::info!(
        "  {} {} {}",
        label,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Show current endpoint settings, their sources, and the mapping tables.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let (config, sources) = ThemesConfig::load_with_sources()?;

    log::info!(
        "{}",
        "shazanime Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match shazanime_themes::config_path() {
        Some(p) => file_status("Config file:  ", &p),
        None => log::info!(
            "  Config file:   {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    file_status("Mappings file:", &settings::mappings_path());
    file_status("History file: ", &settings::history_path());
    log::info!("");

    let page_size = config.api.page_size.to_string();
    let timeout = config.api.timeout_secs.to_string();
    setting_line("base_url", Some(&config.api.base_url), &sources.base_url);
    setting_line("page_size", Some(&page_size), &sources.page_size);
    setting_line("timeout_secs", Some(&timeout), &sources.timeout_secs);
    setting_line(
        "recognition url",
        config.recognition.url.as_deref(),
        &sources.recognize_url,
    );
    log::info!("");

    let (mappings, origin) = shazanime_lib::load_mappings();
    let origin_str = match &origin {
        MappingsOrigin::Defaults => "built-in".to_string(),
        MappingsOrigin::WithUserFile(p) => format!("built-in + {}", p.display()),
        MappingsOrigin::UserFileRejected(p) => {
            format!("built-in, {} ignored", p.display())
        }
    };
    log::info!(
        "  {} {} artist(s), {} song(s) {}",
        "Mappings:".if_supports_color(Stdout, |t| t.cyan()),
        mappings.artist_count(),
        mappings.song_count(),
        format!("({})", origin_str).if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match shazanime_themes::config_path() {
        Some(p) => println!("{}", p.display()),
        None => log::warn!("Could not determine config directory"),
    }
    Ok(())
}
