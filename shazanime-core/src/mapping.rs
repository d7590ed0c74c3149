//! Static name override tables.
//!
//! Recognition services and the theme database often disagree on how an
//! artist or a song is written (romanization, stage names, featured guests).
//! These tables map what the recognizer says to what the database uses.
//! They are parsed once at startup and only read afterwards.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::MappingError;
use crate::types::ThemeType;

/// Separators that introduce featured or collaborating artists.
///
/// Everything from the first separator onward is dropped before lookup.
const COLLAB_SEPARATORS: &[&str] = &[":", " feat. ", " feat ", " ft. "];

/// Mapping tables shipped with the crate.
pub const DEFAULT_MAPPINGS: &str = include_str!("../data/name_mappings.toml");

/// Override entry for a song title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongMapping {
    /// Title the theme database uses.
    pub title: String,
    /// Only apply when this string appears in the raw or canonical artist.
    #[serde(default)]
    pub artist: Option<String>,
    /// Restrict results to this theme type.
    #[serde(default, rename = "type")]
    pub theme_type: Option<ThemeType>,
    /// Restrict results to anime whose name contains this string.
    #[serde(default)]
    pub anime: Option<String>,
    /// Accept candidates regardless of their credited performers.
    #[serde(default)]
    pub skip_artist_check: bool,
}

impl SongMapping {
    fn applies_to(&self, raw_artist: &str, canonical_artist: &str) -> bool {
        match &self.artist {
            None => true,
            Some(constraint) => {
                let constraint = constraint.to_lowercase();
                raw_artist.to_lowercase().contains(&constraint)
                    || canonical_artist.to_lowercase().contains(&constraint)
            }
        }
    }
}

/// Result of song normalization: the title to search for plus any
/// constraints the matching mapping carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub type_filter: Option<ThemeType>,
    pub skip_artist_check: bool,
    pub anime_filter: Option<String>,
}

impl SongQuery {
    fn unmapped(raw_title: &str) -> Self {
        Self {
            title: raw_title.trim().to_string(),
            ..Self::default()
        }
    }
}

/// On-disk layout of a mapping file.
#[derive(Debug, Default, Deserialize)]
struct MappingFile {
    #[serde(default)]
    artists: HashMap<String, String>,
    #[serde(default)]
    songs: HashMap<String, SongMapping>,
}

/// Artist and song override tables.
#[derive(Debug, Clone, Default)]
pub struct NameMappings {
    artists: HashMap<String, String>,
    songs: HashMap<String, SongMapping>,
}

fn lookup_key(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Drop featured/collaborating artists from an already-lowercased name.
fn strip_collaborators(name: &str) -> &str {
    let cut = COLLAB_SEPARATORS
        .iter()
        .filter_map(|sep| name.find(sep))
        .min()
        .unwrap_or(name.len());
    name[..cut].trim()
}

impl NameMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tables from TOML with `[artists]` and `[songs.<title>]` sections.
    ///
    /// Keys are normalized (trimmed, lowercased) on load.
    pub fn from_toml_str(content: &str) -> Result<Self, MappingError> {
        let file: MappingFile = toml::from_str(content)?;
        let mut mappings = Self::new();
        for (raw, canonical) in file.artists {
            mappings.insert_artist(&raw, canonical);
        }
        for (raw, song) in file.songs {
            mappings.insert_song(&raw, song);
        }
        Ok(mappings)
    }

    /// Tables shipped with the crate.
    pub fn defaults() -> Result<Self, MappingError> {
        Self::from_toml_str(DEFAULT_MAPPINGS)
    }

    pub fn insert_artist(&mut self, raw: &str, canonical: impl Into<String>) {
        self.artists.insert(lookup_key(raw), canonical.into());
    }

    pub fn insert_song(&mut self, raw_title: &str, mapping: SongMapping) {
        self.songs.insert(lookup_key(raw_title), mapping);
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: NameMappings) {
        self.artists.extend(other.artists);
        self.songs.extend(other.songs);
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Canonical artist name for a raw recognizer artist string.
    ///
    /// The collaboration-stripped base name is looked up first, then the
    /// full raw name. Without a mapping the lowercased base name is returned.
    pub fn normalize_artist(&self, raw: &str) -> String {
        let full = lookup_key(raw);
        let base = strip_collaborators(&full);
        self.artists
            .get(base)
            .or_else(|| self.artists.get(&full))
            .cloned()
            .unwrap_or_else(|| base.to_string())
    }

    /// Canonical title and constraints for a raw recognizer title.
    ///
    /// A mapping with an `artist` constraint is ignored entirely unless the
    /// constraint appears in `raw_artist` or `canonical_artist`.
    pub fn normalize_song(
        &self,
        raw_title: &str,
        raw_artist: &str,
        canonical_artist: &str,
    ) -> SongQuery {
        match self.songs.get(&lookup_key(raw_title)) {
            Some(mapping) if mapping.applies_to(raw_artist, canonical_artist) => SongQuery {
                title: mapping.title.clone(),
                type_filter: mapping.theme_type,
                skip_artist_check: mapping.skip_artist_check,
                anime_filter: mapping.anime.clone(),
            },
            _ => SongQuery::unmapped(raw_title),
        }
    }
}

#[cfg(test)]
#[path = "tests/mapping_tests.rs"]
mod tests;
