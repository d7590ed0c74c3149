use std::collections::HashMap;

use tokio::time::Duration;

use shazanime_core::ThemeCandidate;

use crate::config::ApiConfig;
use crate::error::{SearchError, snippet};
use crate::types::AnimeThemeListResponse;

/// Relations requested alongside each theme so a single request carries
/// everything the resolver needs.
const INCLUDE: &str = "animethemeentries.videos,anime.images,song.performances.artist";

/// Anything that can answer a free-text theme search.
///
/// The resolver is generic over this so it can be driven by an in-memory
/// source in tests.
#[allow(async_fn_in_trait)]
pub trait ThemeSource {
    /// Search themes for `query`. An empty list means nothing matched.
    async fn search(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError>;
}

impl<S: ThemeSource + ?Sized> ThemeSource for &S {
    async fn search(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError> {
        (**self).search(query).await
    }
}

/// HTTP client for the AnimeThemes API.
///
/// Performs no retries; every call is a single request.
pub struct AnimeThemesClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl AnimeThemesClient {
    pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("shazanime/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_params(&self, query: &str) -> HashMap<&'static str, String> {
        let mut params = HashMap::new();
        params.insert("q", query.trim().to_lowercase());
        params.insert("include", INCLUDE.to_string());
        params.insert("page[size]", self.page_size.to_string());
        params
    }

    /// Search themes matching `query` (sent lowercased).
    pub async fn search_themes(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError> {
        let params = self.search_params(query);
        log::debug!("GET {}/animetheme q='{}'", self.base_url, params["q"]);

        let resp = self
            .http
            .get(format!("{}/animetheme", self.base_url))
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                message: snippet(&text, 200),
            });
        }

        let response: AnimeThemeListResponse = serde_json::from_str(&text).map_err(|e| {
            SearchError::Parse(format!("{e}. Response: {}", snippet(&text, 200)))
        })?;

        Ok(response
            .animethemes
            .into_iter()
            .map(ThemeCandidate::from)
            .collect())
    }
}

impl ThemeSource for AnimeThemesClient {
    async fn search(&self, query: &str) -> Result<Vec<ThemeCandidate>, SearchError> {
        self.search_themes(query).await
    }
}
