//! Domain model and pure matching rules for resolving a recognized song to
//! an anime theme.
//!
//! Nothing in this crate performs network I/O. The search client and the
//! staged resolver live in `shazanime-themes`; this crate only supplies the
//! types they exchange plus the name normalizer and the video selector.

pub mod error;
pub mod mapping;
pub mod types;
pub mod util;
pub mod video;

pub use error::MappingError;
pub use mapping::{NameMappings, SongMapping, SongQuery};
pub use types::{
    Anime, AnimeImage, Overlap, Performance, RecognizedSong, ResolvedThemeDetails, Song,
    ThemeCandidate, ThemeEntry, ThemeType, ThemeTypeParseError, VideoSource, VideoVariant,
};
pub use video::{RankedVideo, rank_videos, select_best_video};
