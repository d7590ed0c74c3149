use serde::{Deserialize, Serialize};

use crate::util::eq_ignore_case;
use crate::video::select_best_video;

/// Song information produced by the recognition service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedSong {
    pub title: String,
    pub original_title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub apple_music_url: Option<String>,
    #[serde(default)]
    pub shazam_url: Option<String>,
}

/// Whether a theme plays at the start, the end, or inside an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeType {
    #[serde(rename = "OP")]
    Opening,
    #[serde(rename = "ED")]
    Ending,
    #[serde(rename = "IN")]
    Insert,
}

impl ThemeType {
    /// Short code used by the theme database ("OP", "ED", "IN").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Opening => "OP",
            Self::Ending => "ED",
            Self::Insert => "IN",
        }
    }
}

impl std::fmt::Display for ThemeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string cannot be parsed into a `ThemeType`.
#[derive(Debug, Clone)]
pub struct ThemeTypeParseError(pub String);

impl std::fmt::Display for ThemeTypeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme type: '{}'", self.0)
    }
}

impl std::error::Error for ThemeTypeParseError {}

impl std::str::FromStr for ThemeType {
    type Err = ThemeTypeParseError;

    /// Parse a theme type from its code or long name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "op" | "opening" => Ok(Self::Opening),
            "ed" | "ending" => Ok(Self::Ending),
            "in" | "insert" => Ok(Self::Insert),
            _ => Err(ThemeTypeParseError(s.to_string())),
        }
    }
}

/// A single theme record returned by a search.
///
/// `theme_type` and `sequence` are always present as slots, even when the
/// database has no value for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeCandidate {
    pub id: u64,
    pub theme_type: Option<ThemeType>,
    pub sequence: Option<u32>,
    pub song: Song,
    pub anime: Anime,
    pub entries: Vec<ThemeEntry>,
}

impl ThemeCandidate {
    /// Display names of every performer, in credit order.
    pub fn artist_names(&self) -> Vec<String> {
        self.song
            .performances
            .iter()
            .flat_map(|p| p.display_names())
            .map(str::to_string)
            .collect()
    }

    /// True if any credit resolves to `artist` (case-insensitive).
    pub fn is_performed_by(&self, artist: &str) -> bool {
        self.song
            .performances
            .iter()
            .flat_map(|p| p.display_names())
            .any(|name| eq_ignore_case(name, artist))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Song {
    pub title: String,
    pub performances: Vec<Performance>,
}

/// A performance credit on a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Performance {
    /// Credited to a single artist.
    Solo { name: String },
    /// Credited to a member performing as part of a group.
    Membership { group: String, member: String },
}

impl Performance {
    /// Names this credit contributes to the artist list.
    ///
    /// Group credits contribute the group first, then the member.
    pub fn display_names(&self) -> Vec<&str> {
        match self {
            Self::Solo { name } => vec![name.as_str()],
            Self::Membership { group, member } => vec![group.as_str(), member.as_str()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Anime {
    pub name: String,
    pub year: Option<u32>,
    pub images: Vec<AnimeImage>,
}

pub const FACET_LARGE_COVER: &str = "Large Cover";
pub const FACET_SMALL_COVER: &str = "Small Cover";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeImage {
    pub facet: String,
    pub link: String,
}

impl Anime {
    /// Pick the image to show for this anime: large cover, then small
    /// cover, then whatever comes first. Empty string when there are none.
    pub fn cover_image(&self) -> &str {
        let by_facet = |facet: &str| self.images.iter().find(|i| i.facet == facet);
        by_facet(FACET_LARGE_COVER)
            .or_else(|| by_facet(FACET_SMALL_COVER))
            .or_else(|| self.images.first())
            .map(|i| i.link.as_str())
            .unwrap_or("")
    }
}

/// A group of video variants sharing a version label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeEntry {
    pub version: Option<u32>,
    pub videos: Vec<VideoVariant>,
}

/// How much on-screen text covers the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overlap {
    #[default]
    None,
    Over,
    Transition,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VideoSource {
    BluRay,
    Dvd,
    Web,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoVariant {
    pub link: String,
    pub overlap: Overlap,
    /// True for creditless (NC) encodes.
    pub creditless: bool,
    pub source: Option<VideoSource>,
    pub resolution: Option<u32>,
}

/// Flattened, display-ready result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedThemeDetails {
    pub artist_names: Vec<String>,
    pub song_name: String,
    pub anime_name: String,
    pub anime_image: String,
    pub theme_type: Option<ThemeType>,
    pub sequence: Option<u32>,
    pub year: Option<u32>,
    pub video_link: String,
}

impl ResolvedThemeDetails {
    /// Build the details record for a matched candidate.
    pub fn from_candidate(candidate: &ThemeCandidate) -> Self {
        Self {
            artist_names: candidate.artist_names(),
            song_name: candidate.song.title.clone(),
            anime_name: candidate.anime.name.clone(),
            anime_image: candidate.anime.cover_image().to_string(),
            theme_type: candidate.theme_type,
            sequence: candidate.sequence,
            year: candidate.anime.year,
            video_link: select_best_video(&candidate.entries),
        }
    }

    /// Short label such as "OP2" or "ED".
    pub fn theme_label(&self) -> String {
        match (self.theme_type, self.sequence) {
            (Some(t), Some(seq)) => format!("{}{}", t, seq),
            (Some(t), None) => t.to_string(),
            (None, Some(seq)) => format!("#{}", seq),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
