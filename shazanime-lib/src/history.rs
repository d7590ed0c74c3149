//! Local log of resolved themes, newest first.
//!
//! The same (anime, song) pair is only recorded once, and the log keeps at
//! most [`HISTORY_LIMIT`] entries. Stored as a JSON array.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use shazanime_core::{ResolvedThemeDetails, ThemeType};

use crate::error::HistoryError;

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub anime_name: String,
    pub anime_image: String,
    pub song_name: String,
    pub artist_names: Vec<String>,
    pub theme_type: Option<ThemeType>,
    pub sequence: Option<u32>,
    pub year: Option<u32>,
    /// Album art from the recognition service
    pub cover_art: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl HistoryEntry {
    fn new(details: &ResolvedThemeDetails, cover_art: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: format!("{}-{:09}", now.timestamp_millis(), now.timestamp_subsec_nanos()),
            anime_name: details.anime_name.clone(),
            anime_image: details.anime_image.clone(),
            song_name: details.song_name.clone(),
            artist_names: details.artist_names.clone(),
            theme_type: details.theme_type,
            sequence: details.sequence,
            year: details.year,
            cover_art: cover_art.to_string(),
            timestamp: now.timestamp_millis(),
        }
    }

    /// Local time the entry was recorded, for display.
    pub fn recorded_at(&self) -> Option<chrono::DateTime<chrono::Local>> {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|t| t.with_timezone(&chrono::Local))
    }
}

/// History entries for one anime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeGroup {
    pub anime_name: String,
    pub anime_image: String,
    pub year: Option<u32>,
    pub songs: Vec<HistoryEntry>,
}

/// The history log bound to its backing file.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Load the log at `path`. A missing file is an empty log.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Like [`HistoryLog::load`], but starts empty if the file is unreadable.
    pub fn load_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::load(path.clone()).unwrap_or_else(|e| {
            log::warn!("Starting with empty history ({}): {}", path.display(), e);
            Self {
                path,
                entries: Vec::new(),
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn contains(&self, anime_name: &str, song_name: &str) -> bool {
        self.entries
            .iter()
            .any(|h| h.anime_name == anime_name && h.song_name == song_name)
    }

    /// Record a resolution in memory. Returns false if it was already logged.
    pub fn record(&mut self, details: &ResolvedThemeDetails, cover_art: &str) -> bool {
        if self.contains(&details.anime_name, &details.song_name) {
            return false;
        }
        self.entries.insert(0, HistoryEntry::new(details, cover_art));
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    /// Record a resolution and persist the log if it changed.
    pub fn add(
        &mut self,
        details: &ResolvedThemeDetails,
        cover_art: &str,
    ) -> Result<bool, HistoryError> {
        let added = self.record(details, cover_art);
        if added {
            self.save()?;
        }
        Ok(added)
    }

    /// Remove every entry and persist the empty log.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.save()
    }

    /// Entries grouped by anime, groups in order of their newest entry.
    pub fn grouped_by_anime(&self) -> Vec<AnimeGroup> {
        let mut groups: Vec<AnimeGroup> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|g| g.anime_name == entry.anime_name) {
                Some(group) => group.songs.push(entry.clone()),
                None => groups.push(AnimeGroup {
                    anime_name: entry.anime_name.clone(),
                    anime_image: entry.anime_image.clone(),
                    year: entry.year,
                    songs: vec![entry.clone()],
                }),
            }
        }
        groups
    }

    /// Write atomically (temp file + rename).
    fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
