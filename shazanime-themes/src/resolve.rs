//! Staged resolution of a recognized song to an anime theme.
//!
//! Recognizer output is noisy: titles carry extra words, artists come back
//! under a different romanization, and generic titles collide across many
//! series. The resolver normalizes both names through the mapping tables and
//! then tries a fixed sequence of searches, stopping at the first candidate
//! that satisfies the constraints of the stage that produced it.
//!
//! 1. **Primary**: search by canonical title, require an artist match.
//! 2. **Partial title**: only when the primary search returned nothing at
//!    all; search by the first half of the title.
//! 3. **Artist search**: search by canonical artist, require a loose title
//!    match.
//!
//! A failed search is logged and treated as an empty result. The public
//! entry points never return an error: no match and "could not search" both
//! come back as `None` and are told apart only in the logs.

use std::sync::Arc;

use shazanime_core::util::{contains_ignore_case, first_half, loose_title_match};
use shazanime_core::{NameMappings, ResolvedThemeDetails, SongQuery, ThemeCandidate};

use crate::client::ThemeSource;

/// Partial titles shorter than this match too much to be useful.
const MIN_PARTIAL_LEN: usize = 3;

/// One attempt in the resolver's fallback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    /// Search by the canonical title
    Primary,
    /// Search by the first half of the canonical title
    PartialTitle,
    /// Search by the canonical artist name
    ArtistSearch,
}

impl std::fmt::Display for SearchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStage::Primary => write!(f, "title"),
            SearchStage::PartialTitle => write!(f, "partial title"),
            SearchStage::ArtistSearch => write!(f, "artist"),
        }
    }
}

/// Recognizer names after mapping-table normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    /// Canonical artist name
    pub artist: String,
    /// Canonical title plus any constraints from the song mapping
    pub song: SongQuery,
}

impl NormalizedInput {
    fn artist_matches(&self, candidate: &ThemeCandidate) -> bool {
        !self.artist.is_empty() && candidate.is_performed_by(&self.artist)
    }

    /// Type and anime constraints from the song mapping.
    fn constraints_match(&self, candidate: &ThemeCandidate) -> bool {
        let type_ok = self
            .song
            .type_filter
            .is_none_or(|t| candidate.theme_type == Some(t));
        let anime_ok = self
            .song
            .anime_filter
            .as_deref()
            .is_none_or(|a| contains_ignore_case(&candidate.anime.name, a));
        type_ok && anime_ok
    }
}

impl SearchStage {
    pub const ALL: [SearchStage; 3] = [
        SearchStage::Primary,
        SearchStage::PartialTitle,
        SearchStage::ArtistSearch,
    ];

    /// Query string for this stage, or `None` if the stage should be skipped.
    pub fn query(&self, input: &NormalizedInput) -> Option<String> {
        let query = match self {
            SearchStage::Primary => input.song.title.trim(),
            SearchStage::PartialTitle => {
                // Length is checked on the raw half; trimming only cleans the query
                let half = first_half(input.song.title.trim());
                if half.chars().count() < MIN_PARTIAL_LEN {
                    return None;
                }
                half.trim()
            }
            SearchStage::ArtistSearch => input.artist.trim(),
        };
        (!query.is_empty()).then(|| query.to_string())
    }

    /// Whether `candidate` is an acceptable match for this stage.
    ///
    /// Title stages honour the mapping's `skip_artist_check`. The artist
    /// stage always requires the artist (its query already targets the
    /// artist) and adds a loose title comparison instead.
    pub fn accepts(&self, candidate: &ThemeCandidate, input: &NormalizedInput) -> bool {
        match self {
            SearchStage::Primary | SearchStage::PartialTitle => {
                (input.song.skip_artist_check || input.artist_matches(candidate))
                    && input.constraints_match(candidate)
            }
            SearchStage::ArtistSearch => {
                input.artist_matches(candidate)
                    && input.constraints_match(candidate)
                    && loose_title_match(&candidate.song.title, &input.song.title)
            }
        }
    }
}

/// A successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeMatch {
    pub details: ResolvedThemeDetails,
    /// Stage that produced the match
    pub stage: SearchStage,
    /// Theme database id of the matched theme
    pub theme_id: u64,
}

/// Resolves recognized songs against a theme source.
///
/// Holds no mutable state; concurrent resolutions through the same resolver
/// are independent.
pub struct ThemeResolver<S> {
    source: S,
    mappings: Arc<NameMappings>,
}

impl<S: ThemeSource> ThemeResolver<S> {
    pub fn new(source: S, mappings: Arc<NameMappings>) -> Self {
        Self { source, mappings }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mappings(&self) -> &NameMappings {
        &self.mappings
    }

    /// Run the recognizer names through the mapping tables.
    pub fn normalize(&self, raw_artist: &str, raw_title: &str) -> NormalizedInput {
        let artist = self.mappings.normalize_artist(raw_artist);
        let song = self.mappings.normalize_song(raw_title, raw_artist, &artist);
        NormalizedInput { artist, song }
    }

    /// Find the theme for a recognized song, or `None` if nothing matches.
    pub async fn find_anime_theme(
        &self,
        raw_artist: &str,
        raw_title: &str,
    ) -> Option<ResolvedThemeDetails> {
        self.find_match(raw_artist, raw_title).await.map(|m| m.details)
    }

    /// Like [`ThemeResolver::find_anime_theme`], also reporting which stage matched.
    pub async fn find_match(&self, raw_artist: &str, raw_title: &str) -> Option<ThemeMatch> {
        if raw_title.trim().is_empty() && raw_artist.trim().is_empty() {
            log::info!("Nothing to resolve: recognized song has no title or artist");
            return None;
        }

        let input = self.normalize(raw_artist, raw_title);
        log::debug!(
            "Resolving '{}' by '{}' as '{}' by '{}' (type: {:?}, anime: {:?}, skip artist check: {})",
            raw_title,
            raw_artist,
            input.song.title,
            input.artist,
            input.song.type_filter,
            input.song.anime_filter,
            input.song.skip_artist_check,
        );

        let mut primary_was_empty = false;
        let mut failed_searches = 0;

        for stage in SearchStage::ALL {
            if stage == SearchStage::PartialTitle && !primary_was_empty {
                log::debug!("Skipping {} search: title search returned candidates", stage);
                continue;
            }
            let Some(query) = stage.query(&input) else {
                log::debug!("Skipping {} search: query too short", stage);
                continue;
            };

            let candidates = match self.source.search(&query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    log::warn!("{} search for '{}' failed: {}", stage, query, e);
                    failed_searches += 1;
                    Vec::new()
                }
            };
            log::debug!(
                "{} search for '{}' returned {} candidate(s)",
                stage,
                query,
                candidates.len()
            );

            if stage == SearchStage::Primary {
                primary_was_empty = candidates.is_empty();
            }

            if let Some(candidate) = candidates.iter().find(|c| stage.accepts(c, &input)) {
                let details = ResolvedThemeDetails::from_candidate(candidate);
                log::info!(
                    "Matched '{}' from {} ({}) by {} search",
                    details.song_name,
                    details.anime_name,
                    details.theme_label(),
                    stage,
                );
                return Some(ThemeMatch {
                    details,
                    stage,
                    theme_id: candidate.id,
                });
            }
        }

        if failed_searches > 0 {
            log::warn!(
                "No anime theme found for '{}' by '{}' ({} search(es) failed)",
                raw_title,
                raw_artist,
                failed_searches,
            );
        } else {
            log::info!("No anime theme found for '{}' by '{}'", raw_title, raw_artist);
        }
        None
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
