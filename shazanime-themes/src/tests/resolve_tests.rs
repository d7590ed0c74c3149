use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use shazanime_core::{
    Anime, Overlap, Performance, Song, SongMapping, ThemeEntry, ThemeType, VideoSource,
    VideoVariant,
};

use super::*;
use crate::error::SearchError;

/// In-memory theme source keyed by lowercased query.
#[derive(Default)]
struct FakeSource {
    results: HashMap<String, Vec<ThemeCandidate>>,
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeSource {
    fn with(mut self, query: &str, candidates: Vec<ThemeCandidate>) -> Self {
        self.results.insert(query.to_string(), candidates);
        self
    }

    fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ThemeSource for FakeSource {
    async fn search(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError> {
        let query = query.to_lowercase();
        self.queries.lock().unwrap().push(query.clone());
        if self.failing.contains(&query) {
            return Err(SearchError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.results.get(&query).cloned().unwrap_or_default())
    }
}

fn theme(id: u64, title: &str, artist: &str, anime: &str) -> ThemeCandidate {
    ThemeCandidate {
        id,
        theme_type: Some(ThemeType::Opening),
        sequence: Some(1),
        song: Song {
            title: title.to_string(),
            performances: vec![Performance::Solo {
                name: artist.to_string(),
            }],
        },
        anime: Anime {
            name: anime.to_string(),
            year: Some(2021),
            images: vec![],
        },
        entries: vec![ThemeEntry {
            version: None,
            videos: vec![VideoVariant {
                link: format!("https://v.animethemes.moe/{}.webm", id),
                overlap: Overlap::None,
                creditless: true,
                source: Some(VideoSource::BluRay),
                resolution: Some(1080),
            }],
        }],
    }
}

fn resolver(source: FakeSource) -> ThemeResolver<FakeSource> {
    ThemeResolver::new(source, Arc::new(NameMappings::new()))
}

fn resolver_with(source: FakeSource, mappings: NameMappings) -> ThemeResolver<FakeSource> {
    ThemeResolver::new(source, Arc::new(mappings))
}

fn song_mapping(title: &str) -> SongMapping {
    SongMapping {
        title: title.to_string(),
        artist: None,
        theme_type: None,
        anime: None,
        skip_artist_check: false,
    }
}

#[tokio::test]
async fn primary_match_skips_later_stages() {
    let source = FakeSource::default().with(
        "zankyousanka",
        vec![theme(1, "Zankyou Sanka", "Aimer", "Kimetsu no Yaiba: Yuukaku-hen")],
    );
    let resolver = resolver(source);

    let m = resolver.find_match("Aimer", "Zankyousanka").await.unwrap();
    assert_eq!(m.stage, SearchStage::Primary);
    assert_eq!(m.theme_id, 1);
    assert_eq!(m.details.artist_names, vec!["Aimer"]);
    assert_eq!(m.details.video_link, "https://v.animethemes.moe/1.webm");
    assert_eq!(resolver.source().queries(), vec!["zankyousanka"]);
}

#[tokio::test]
async fn partial_title_runs_when_primary_is_empty() {
    let source = FakeSource::default().with(
        "kaikai",
        vec![
            theme(1, "Kaikai", "Someone Else", "Other Show"),
            theme(2, "Kaikai Kitan", "Eve", "Jujutsu Kaisen"),
        ],
    );
    let resolver = resolver(source);

    let m = resolver.find_match("Eve", "Kaikai Kitan").await.unwrap();
    assert_eq!(m.stage, SearchStage::PartialTitle);
    assert_eq!(m.theme_id, 2);
    assert_eq!(resolver.source().queries(), vec!["kaikai kitan", "kaikai"]);
}

#[tokio::test]
async fn partial_title_skipped_when_primary_had_candidates() {
    let source = FakeSource::default()
        .with("kaikai kitan", vec![theme(1, "Kaikai Kitan", "Cover Band", "Tribute")])
        .with("kaikai", vec![theme(2, "Kaikai Kitan", "Eve", "Jujutsu Kaisen")]);
    let resolver = resolver(source);

    assert!(resolver.find_match("Eve", "Kaikai Kitan").await.is_none());
    assert_eq!(resolver.source().queries(), vec!["kaikai kitan", "eve"]);
}

#[tokio::test]
async fn partial_title_skipped_when_too_short() {
    let resolver = resolver(FakeSource::default());

    assert!(resolver.find_match("Ado", "Odo").await.is_none());
    assert_eq!(resolver.source().queries(), vec!["odo", "ado"]);
}

#[tokio::test]
async fn all_stages_exhausted_returns_none() {
    let source = FakeSource::default()
        .with("gurenge", vec![theme(1, "Gurenge", "Someone Else", "Cover Album")])
        .with("lisa", vec![theme(2, "Homura", "Not LiSA", "Mugen Train")]);
    let resolver = resolver(source);

    assert!(resolver.find_anime_theme("LiSA", "Gurenge").await.is_none());
    assert_eq!(resolver.source().queries(), vec!["gurenge", "lisa"]);
}

#[tokio::test]
async fn artist_search_requires_loose_title_match() {
    let source = FakeSource::default().with(
        "lisa",
        vec![
            theme(1, "Homura", "LiSA", "Mugen Train"),
            theme(2, "Gurenge", "LiSA", "Kimetsu no Yaiba"),
        ],
    );
    let resolver = resolver(source);

    let m = resolver
        .find_match("LiSA", "Gurenge (Official Video)")
        .await
        .unwrap();
    assert_eq!(m.stage, SearchStage::ArtistSearch);
    assert_eq!(m.theme_id, 2);
    assert_eq!(
        resolver.source().queries(),
        vec!["gurenge (official video)", "gurenge (off", "lisa"]
    );
}

#[tokio::test]
async fn artist_search_ignores_whitespace_differences() {
    let source = FakeSource::default().with(
        "aimer",
        vec![theme(5, "Zankyou Sanka", "Aimer", "Kimetsu no Yaiba")],
    );
    let resolver = resolver(source);

    let m = resolver.find_match("Aimer", "Zankyousanka").await.unwrap();
    assert_eq!(m.stage, SearchStage::ArtistSearch);
    assert_eq!(m.theme_id, 5);
}

#[tokio::test]
async fn search_failure_is_treated_as_empty() {
    let source = FakeSource::default()
        .failing("kaikai kitan")
        .with("kaikai", vec![theme(2, "Kaikai Kitan", "Eve", "Jujutsu Kaisen")]);
    let resolver = resolver(source);

    let m = resolver.find_match("Eve", "Kaikai Kitan").await.unwrap();
    assert_eq!(m.stage, SearchStage::PartialTitle);
}

#[tokio::test]
async fn every_search_failing_returns_none() {
    let source = FakeSource::default()
        .failing("kaikai kitan")
        .failing("kaikai")
        .failing("eve");
    let resolver = resolver(source);

    assert!(resolver.find_anime_theme("Eve", "Kaikai Kitan").await.is_none());
    assert_eq!(resolver.source().queries().len(), 3);
}

#[tokio::test]
async fn empty_recognition_does_not_search() {
    let resolver = resolver(FakeSource::default());

    assert!(resolver.find_anime_theme("", "  ").await.is_none());
    assert!(resolver.source().queries().is_empty());
}

#[tokio::test]
async fn collaboration_credit_matches_group() {
    let mut candidate = theme(3, "Avid", "", "86");
    candidate.song.performances = vec![Performance::Membership {
        group: "SawanoHiroyuki[nZk]".to_string(),
        member: "mizuki".to_string(),
    }];
    let source = FakeSource::default().with("avid", vec![candidate]);
    let resolver = resolver(source);

    let details = resolver
        .find_anime_theme("SawanoHiroyuki[nZk]:mizuki", "Avid")
        .await
        .unwrap();
    assert_eq!(details.artist_names, vec!["SawanoHiroyuki[nZk]", "mizuki"]);
}

#[tokio::test]
async fn skip_artist_check_accepts_any_performer() {
    let mut mappings = NameMappings::new();
    mappings.insert_song(
        "guren no yumiya",
        SongMapping {
            skip_artist_check: true,
            ..song_mapping("Guren no Yumiya")
        },
    );
    let source = FakeSource::default().with(
        "guren no yumiya",
        vec![theme(4, "Guren no Yumiya", "Revo", "Shingeki no Kyojin")],
    );
    let resolver = resolver_with(source, mappings);

    let m = resolver
        .find_match("Linked Horizon", "Guren No Yumiya")
        .await
        .unwrap();
    assert_eq!(m.stage, SearchStage::Primary);
    assert_eq!(m.theme_id, 4);
}

#[test]
fn artist_stage_ignores_skip_artist_check() {
    let input = NormalizedInput {
        artist: "linked horizon".to_string(),
        song: SongQuery {
            title: "Guren no Yumiya".to_string(),
            skip_artist_check: true,
            ..SongQuery::default()
        },
    };
    let candidate = theme(4, "Guren no Yumiya", "Revo", "Shingeki no Kyojin");
    assert!(SearchStage::Primary.accepts(&candidate, &input));
    assert!(!SearchStage::ArtistSearch.accepts(&candidate, &input));
}

#[tokio::test]
async fn type_filter_picks_matching_theme() {
    let mut mappings = NameMappings::new();
    mappings.insert_song(
        "unravel",
        SongMapping {
            theme_type: Some(ThemeType::Opening),
            ..song_mapping("unravel")
        },
    );
    let mut ending = theme(10, "unravel", "TK from Ling tosite sigure", "Tokyo Ghoul");
    ending.theme_type = Some(ThemeType::Ending);
    let opening = theme(11, "unravel", "TK from Ling tosite sigure", "Tokyo Ghoul");
    let source = FakeSource::default().with("unravel", vec![ending, opening]);
    let resolver = resolver_with(source, mappings);

    let details = resolver
        .find_anime_theme("TK from Ling tosite sigure", "unravel")
        .await
        .unwrap();
    assert_eq!(details.theme_type, Some(ThemeType::Opening));
    assert_eq!(details.video_link, "https://v.animethemes.moe/11.webm");
}

#[tokio::test]
async fn anime_filter_narrows_generic_title() {
    let mut mappings = NameMappings::new();
    mappings.insert_song(
        "again",
        SongMapping {
            artist: Some("yui".to_string()),
            anime: Some("fullmetal".to_string()),
            ..song_mapping("again")
        },
    );
    let source = FakeSource::default().with(
        "again",
        vec![
            theme(20, "Again", "YUI", "Some Other Show"),
            theme(21, "again", "YUI", "Fullmetal Alchemist: Brotherhood"),
        ],
    );
    let resolver = resolver_with(source, mappings);

    let m = resolver.find_match("YUI", "Again").await.unwrap();
    assert_eq!(m.theme_id, 21);
    assert_eq!(m.details.anime_name, "Fullmetal Alchemist: Brotherhood");
}

#[tokio::test]
async fn repeated_resolution_is_identical() {
    let source = FakeSource::default().with(
        "zankyousanka",
        vec![theme(1, "Zankyou Sanka", "Aimer", "Kimetsu no Yaiba: Yuukaku-hen")],
    );
    let resolver = resolver(source);

    let first = resolver.find_anime_theme("Aimer", "Zankyousanka").await;
    let second = resolver.find_anime_theme("Aimer", "Zankyousanka").await;
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn stage_queries() {
    let input = NormalizedInput {
        artist: "aimer".to_string(),
        song: SongQuery {
            title: "Zankyou Sanka".to_string(),
            ..SongQuery::default()
        },
    };
    assert_eq!(SearchStage::Primary.query(&input).as_deref(), Some("Zankyou Sanka"));
    assert_eq!(SearchStage::PartialTitle.query(&input).as_deref(), Some("Zankyo"));
    assert_eq!(SearchStage::ArtistSearch.query(&input).as_deref(), Some("aimer"));

    let short = NormalizedInput {
        artist: String::new(),
        song: SongQuery {
            title: "Lemon".to_string(),
            ..SongQuery::default()
        },
    };
    assert_eq!(SearchStage::PartialTitle.query(&short), None);
    assert_eq!(SearchStage::ArtistSearch.query(&short), None);
}

#[test]
fn partial_length_counts_the_untrimmed_half() {
    let input = |title: &str| NormalizedInput {
        artist: String::new(),
        song: SongQuery {
            title: title.to_string(),
            ..SongQuery::default()
        },
    };
    // Half of "ab cdef" is "ab " (three chars); the query drops the space
    assert_eq!(SearchStage::PartialTitle.query(&input("ab cdef")).as_deref(), Some("ab"));
    // Half of "ab cde" is "ab " as well
    assert_eq!(SearchStage::PartialTitle.query(&input("ab cde")).as_deref(), Some("ab"));
    // Half of "abcde" is "ab"
    assert_eq!(SearchStage::PartialTitle.query(&input("abcde")), None);
    // Trailing whitespace in the half still counts toward the minimum
    assert_eq!(SearchStage::PartialTitle.query(&input("a  bcd")).as_deref(), Some("a"));
}
