//! Loading the name mapping tables at startup.
//!
//! The tables shipped with `shazanime-core` are always loaded. A user file,
//! if present, is layered on top so individual entries can be corrected
//! without a rebuild.

use std::path::{Path, PathBuf};

use shazanime_core::NameMappings;

use crate::settings;

/// Which tables ended up in the loaded mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingsOrigin {
    /// Only the shipped defaults
    Defaults,
    /// Defaults overlaid with the user's file
    WithUserFile(PathBuf),
    /// The user's file exists but could not be used; defaults only
    UserFileRejected(PathBuf),
}

/// Load the shipped tables plus `~/.config/shazanime/mappings.toml`.
pub fn load_mappings() -> (NameMappings, MappingsOrigin) {
    load_mappings_from(&settings::mappings_path())
}

/// Load the shipped tables plus the user file at `user_path`.
///
/// Never fails: a missing user file is normal, and a broken one is logged
/// and skipped.
pub fn load_mappings_from(user_path: &Path) -> (NameMappings, MappingsOrigin) {
    let mut mappings = NameMappings::defaults().unwrap_or_else(|e| {
        log::error!("Built-in name mappings failed to parse: {}", e);
        NameMappings::new()
    });

    let content = match std::fs::read_to_string(user_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (mappings, MappingsOrigin::Defaults);
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", user_path.display(), e);
            return (mappings, MappingsOrigin::UserFileRejected(user_path.to_path_buf()));
        }
    };

    match NameMappings::from_toml_str(&content) {
        Ok(user) => {
            log::debug!(
                "Loaded {} artist and {} song override(s) from {}",
                user.artist_count(),
                user.song_count(),
                user_path.display(),
            );
            mappings.merge(user);
            (mappings, MappingsOrigin::WithUserFile(user_path.to_path_buf()))
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", user_path.display(), e);
            (mappings, MappingsOrigin::UserFileRejected(user_path.to_path_buf()))
        }
    }
}

#[cfg(test)]
#[path = "tests/mappings_tests.rs"]
mod tests;
