use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use shazanime_core::{
    Anime, AnimeImage, Overlap, Performance, RecognizedSong, Song, ThemeCandidate, ThemeEntry,
    VideoSource, VideoVariant,
};

/// Deserialize `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Top-level response wrapper from `/animetheme`.
#[derive(Debug, Deserialize)]
pub struct AnimeThemeListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub animethemes: Vec<AnimeThemeDto>,
}

/// Theme record with its included song, anime and entry relations.
#[derive(Debug, Deserialize, Clone)]
pub struct AnimeThemeDto {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub theme_type: Option<String>,
    #[serde(default)]
    pub sequence: Option<u32>,
    #[serde(default)]
    pub song: Option<SongDto>,
    #[serde(default)]
    pub anime: Option<AnimeDto>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub animethemeentries: Vec<EntryDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SongDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub performances: Vec<PerformanceDto>,
    /// Older API revisions credit artists directly on the song.
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<PerformerDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceDto {
    #[serde(default)]
    pub artist: Option<PerformerDto>,
}

/// The performer behind a credit: either an artist or a group membership.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum PerformerDto {
    Membership { group: NamedDto, member: NamedDto },
    Artist(NamedDto),
    /// Credit without its relations loaded, or with a null name. Dropped
    /// during conversion.
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize, Clone)]
pub struct NamedDto {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnimeDto {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageDto {
    #[serde(default)]
    pub facet: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntryDto {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<VideoDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoDto {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub overlap: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nc: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub resolution: Option<u32>,
}

fn parse_overlap(s: Option<&str>) -> Overlap {
    match s.map(str::to_lowercase).as_deref() {
        Some("over") => Overlap::Over,
        Some("transition") => Overlap::Transition,
        _ => Overlap::None,
    }
}

fn parse_source(s: &str) -> VideoSource {
    match s.to_uppercase().as_str() {
        "BD" | "BLURAY" | "BLU-RAY" => VideoSource::BluRay,
        "DVD" => VideoSource::Dvd,
        "WEB" => VideoSource::Web,
        _ => VideoSource::Other(s.to_string()),
    }
}

impl PerformerDto {
    /// Domain credit, or `None` for credits we couldn't decode.
    fn into_performance(self) -> Option<Performance> {
        match self {
            PerformerDto::Membership { group, member } => Some(Performance::Membership {
                group: group.name,
                member: member.name,
            }),
            PerformerDto::Artist(artist) => Some(Performance::Solo { name: artist.name }),
            PerformerDto::Unknown(_) => None,
        }
    }
}

impl From<SongDto> for Song {
    fn from(dto: SongDto) -> Self {
        let mut performances: Vec<Performance> = dto
            .performances
            .into_iter()
            .filter_map(|p| p.artist)
            .filter_map(PerformerDto::into_performance)
            .collect();
        if performances.is_empty() {
            performances = dto
                .artists
                .into_iter()
                .filter_map(PerformerDto::into_performance)
                .collect();
        }
        Song {
            title: dto.title.unwrap_or_default(),
            performances,
        }
    }
}

impl From<AnimeDto> for Anime {
    fn from(dto: AnimeDto) -> Self {
        Anime {
            name: dto.name.unwrap_or_default(),
            year: dto.year,
            images: dto
                .images
                .into_iter()
                .filter_map(|i| {
                    Some(AnimeImage {
                        link: i.link?,
                        facet: i.facet.unwrap_or_default(),
                    })
                })
                .collect(),
        }
    }
}

impl VideoDto {
    /// Domain variant, or `None` if the video has no link to play.
    fn into_variant(self) -> Option<VideoVariant> {
        Some(VideoVariant {
            overlap: parse_overlap(self.overlap.as_deref()),
            creditless: self.nc,
            source: self.source.as_deref().map(parse_source),
            resolution: self.resolution,
            link: self.link.filter(|l| !l.is_empty())?,
        })
    }
}

impl From<AnimeThemeDto> for ThemeCandidate {
    fn from(dto: AnimeThemeDto) -> Self {
        ThemeCandidate {
            id: dto.id,
            theme_type: dto.theme_type.as_deref().and_then(|t| t.parse().ok()),
            sequence: dto.sequence,
            song: dto.song.map(Song::from).unwrap_or_default(),
            anime: dto.anime.map(Anime::from).unwrap_or_default(),
            entries: dto
                .animethemeentries
                .into_iter()
                .map(|e| ThemeEntry {
                    version: e.version,
                    videos: e.videos.into_iter().filter_map(VideoDto::into_variant).collect(),
                })
                .collect(),
        }
    }
}

/// JSON body returned by the recognition backend.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub apple_music_url: Option<String>,
    #[serde(default)]
    pub shazam_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl RecognitionResponse {
    /// Convert to a `RecognizedSong`, or `None` when no song was identified.
    ///
    /// The error message reported by the backend (if any) is returned in the
    /// `Err` case.
    pub fn into_song(self) -> Result<RecognizedSong, String> {
        let Some(title) = non_empty(self.title) else {
            return Err(self
                .error
                .unwrap_or_else(|| "No song identified".to_string()));
        };
        Ok(RecognizedSong {
            original_title: non_empty(self.original_title).unwrap_or_else(|| title.clone()),
            title,
            artist: self.artist.unwrap_or_default(),
            cover_art: non_empty(self.cover_art),
            apple_music_url: non_empty(self.apple_music_url),
            shazam_url: non_empty(self.shazam_url),
        })
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
