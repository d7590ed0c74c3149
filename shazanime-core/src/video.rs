//! Best-video selection across a theme's entries.
//!
//! A theme usually has several encodes: with and without credits, from
//! different sources, some with the episode bleeding in. The clean visual
//! always wins, so overlap dominates the score and the remaining points only
//! break ties between otherwise equivalent encodes.

use crate::types::{Overlap, ThemeEntry, VideoSource, VideoVariant};

const SCORE_NO_OVERLAP: u32 = 100;
const SCORE_OVER: u32 = 50;
const SCORE_TRANSITION: u32 = 0;
const SCORE_CREDITLESS: u32 = 10;
const SCORE_BLURAY: u32 = 5;
const SCORE_HD: u32 = 2;

const HD_RESOLUTION: u32 = 1080;

/// A video variant with its entry's version label and computed score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedVideo<'a> {
    pub video: &'a VideoVariant,
    pub version: Option<u32>,
    pub score: u32,
}

/// Score a single variant.
pub fn score_video(video: &VideoVariant) -> u32 {
    let mut score = match video.overlap {
        Overlap::None => SCORE_NO_OVERLAP,
        Overlap::Over => SCORE_OVER,
        Overlap::Transition => SCORE_TRANSITION,
    };
    if video.creditless {
        score += SCORE_CREDITLESS;
    }
    if video.source == Some(VideoSource::BluRay) {
        score += SCORE_BLURAY;
    }
    if video.resolution.is_some_and(|r| r >= HD_RESOLUTION) {
        score += SCORE_HD;
    }
    score
}

/// Flatten all variants across `entries` and order them best-first.
///
/// The sort is stable: variants with equal scores keep their input order.
pub fn rank_videos(entries: &[ThemeEntry]) -> Vec<RankedVideo<'_>> {
    let mut ranked: Vec<RankedVideo<'_>> = entries
        .iter()
        .flat_map(|entry| {
            entry.videos.iter().map(move |video| RankedVideo {
                video,
                version: entry.version,
                score: score_video(video),
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Link of the best video, or an empty string if there are no videos.
pub fn select_best_video(entries: &[ThemeEntry]) -> String {
    rank_videos(entries)
        .first()
        .map(|r| r.video.link.clone())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/video_tests.rs"]
mod tests;
