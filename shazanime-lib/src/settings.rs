//! Shared file locations.
//!
//! Both the endpoint config (see `shazanime_themes::config`) and the user's
//! mapping overrides live under `~/.config/shazanime/`. History is data, not
//! configuration, so it goes under the platform data directory.

use std::path::PathBuf;

/// `~/.config/shazanime`, or `./shazanime` if there is no config directory.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shazanime")
}

/// User mapping overrides: `~/.config/shazanime/mappings.toml`.
pub fn mappings_path() -> PathBuf {
    config_dir().join("mappings.toml")
}

/// History log: `~/.local/share/shazanime/history.json` on Linux.
pub fn history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shazanime")
        .join("history.json")
}
