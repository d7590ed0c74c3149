//! Client for the song recognition backend.
//!
//! The backend accepts an audio clip as a multipart upload and answers with
//! its best title/artist guess. Resolution only starts once this succeeds.

use std::path::Path;

use tokio::time::Duration;

use shazanime_core::RecognizedSong;

use crate::config::RecognitionConfig;
use crate::error::{RecognizeError, snippet};
use crate::types::RecognitionResponse;

pub struct RecognitionClient {
    http: reqwest::Client,
    url: String,
}

impl RecognitionClient {
    pub fn new(config: &RecognitionConfig) -> Result<Self, RecognizeError> {
        let url = config.url.clone().ok_or_else(|| {
            RecognizeError::Config(
                "No recognition backend configured. Set SHAZANIME_RECOGNIZE_URL or add [recognition] url to the config file"
                    .to_string(),
            )
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self { http, url })
    }

    /// Upload an audio clip and return the identified song.
    pub async fn recognize(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<RecognizedSong, RecognizeError> {
        let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self.http.post(&self.url).multipart(form).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(RecognizeError::Status {
                status: status.as_u16(),
                message: snippet(&text, 200),
            });
        }

        let response: RecognitionResponse = serde_json::from_str(&text).map_err(|e| {
            RecognizeError::Parse(format!("{e}. Response: {}", snippet(&text, 200)))
        })?;

        response.into_song().map_err(RecognizeError::NotIdentified)
    }

    /// Read an audio file from disk and recognize it.
    pub async fn recognize_file(&self, path: &Path) -> Result<RecognizedSong, RecognizeError> {
        let audio = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.webm".to_string());
        log::debug!("Uploading {} ({} bytes) for recognition", file_name, audio.len());
        self.recognize(audio, &file_name).await
    }
}
