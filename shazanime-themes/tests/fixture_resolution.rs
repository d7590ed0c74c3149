//! End-to-end resolution against canned AnimeThemes responses.

use std::collections::HashMap;
use std::sync::Arc;

use shazanime_core::{NameMappings, ThemeCandidate, ThemeType};
use shazanime_themes::types::AnimeThemeListResponse;
use shazanime_themes::{SearchError, SearchStage, ThemeResolver, ThemeSource};

/// Serves raw `/animetheme` JSON bodies keyed by lowercased query.
struct FixtureSource {
    bodies: HashMap<&'static str, &'static str>,
}

impl ThemeSource for FixtureSource {
    async fn search(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError> {
        let body = self
            .bodies
            .get(query.to_lowercase().as_str())
            .copied()
            .unwrap_or(r#"{"animethemes": []}"#);
        let response: AnimeThemeListResponse =
            serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;
        Ok(response
            .animethemes
            .into_iter()
            .map(ThemeCandidate::from)
            .collect())
    }
}

fn resolver(bodies: &[(&'static str, &'static str)]) -> ThemeResolver<FixtureSource> {
    let source = FixtureSource {
        bodies: bodies.iter().copied().collect(),
    };
    ThemeResolver::new(source, Arc::new(NameMappings::defaults().unwrap()))
}

const ZANKYOU_SANKA: &str = r#"{
  "animethemes": [{
    "id": 9001,
    "type": "OP",
    "sequence": 1,
    "song": {
      "title": "Zankyou Sanka",
      "performances": [{ "artist": { "name": "Aimer" } }]
    },
    "anime": {
      "name": "Kimetsu no Yaiba: Yuukaku-hen",
      "year": 2021,
      "images": [
        { "facet": "Small Cover", "link": "https://img.example/small.jpg" },
        { "facet": "Large Cover", "link": "https://img.example/large.jpg" }
      ]
    },
    "animethemeentries": [{
      "version": 1,
      "videos": [
        { "link": "https://v.example/credits.webm", "overlap": "Over", "nc": false, "source": "BD", "resolution": 1080 },
        { "link": "https://v.example/clean.webm", "overlap": "None", "nc": true, "source": "WEB", "resolution": 720 }
      ]
    }]
  }]
}"#;

const CALL_YOUR_NAME: &str = r#"{
  "animethemes": [{
    "id": 512,
    "type": "ED",
    "sequence": 2,
    "song": {
      "title": "call your name",
      "performances": [{
        "artist": { "group": { "name": "SawanoHiroyuki[nZk]" }, "member": { "name": "Gemie" } }
      }]
    },
    "anime": { "name": "Shingeki no Kyojin", "year": 2013, "images": [] },
    "animethemeentries": []
  }]
}"#;

const GUREN_NO_YUMIYA: &str = r#"{
  "animethemes": [{
    "id": 77,
    "type": "OP",
    "sequence": 1,
    "song": { "title": "Guren no Yumiya", "artists": [{ "name": "Linked Horizon" }] },
    "anime": { "name": "Shingeki no Kyojin", "year": 2013 },
    "animethemeentries": [{ "videos": [{ "link": "https://v.example/guren.webm" }] }]
  }]
}"#;

#[tokio::test]
async fn mapped_title_resolves_with_best_video_and_large_cover() {
    let resolver = resolver(&[("zankyou sanka", ZANKYOU_SANKA)]);

    let m = resolver.find_match("Aimer", "Zankyosanka").await.unwrap();
    assert_eq!(m.stage, SearchStage::Primary);
    assert_eq!(m.theme_id, 9001);

    let d = m.details;
    assert_eq!(d.song_name, "Zankyou Sanka");
    assert_eq!(d.artist_names, vec!["Aimer"]);
    assert_eq!(d.anime_image, "https://img.example/large.jpg");
    assert_eq!(d.video_link, "https://v.example/clean.webm");
    assert_eq!(d.theme_type, Some(ThemeType::Opening));
    assert_eq!(d.year, Some(2021));
}

#[tokio::test]
async fn group_membership_credit_matches_collaboration_artist() {
    let resolver = resolver(&[("call your name", CALL_YOUR_NAME)]);

    let d = resolver
        .find_anime_theme("SawanoHiroyuki[nZk]:Gemie", "call your name")
        .await
        .unwrap();
    assert_eq!(d.artist_names, vec!["SawanoHiroyuki[nZk]", "Gemie"]);
    assert_eq!(d.theme_label(), "ED2");
    assert_eq!(d.anime_image, "");
    assert_eq!(d.video_link, "");
}

#[tokio::test]
async fn legacy_artist_list_and_skip_artist_check() {
    let resolver = resolver(&[("guren no yumiya", GUREN_NO_YUMIYA)]);

    // Recognizer credits a different name; the song mapping skips the artist check
    let d = resolver
        .find_anime_theme("Revo", "Guren no Yumiya")
        .await
        .unwrap();
    assert_eq!(d.anime_name, "Shingeki no Kyojin");
    assert_eq!(d.artist_names, vec!["Linked Horizon"]);
    assert_eq!(d.video_link, "https://v.example/guren.webm");
}

#[tokio::test]
async fn malformed_response_is_no_match() {
    let resolver = resolver(&[("zankyou sanka", "{ not json")]);
    assert!(resolver.find_anime_theme("Aimer", "Zankyosanka").await.is_none());
}
