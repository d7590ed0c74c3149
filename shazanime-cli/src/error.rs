use thiserror::Error;

use shazanime_lib::HistoryError;
use shazanime_themes::{ConfigError, RecognizeError, SearchError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Endpoint configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The theme database client could not be set up
    #[error("Theme search error: {0}")]
    Search(#[from] SearchError),

    /// Audio recognition failed
    #[error("Recognition error: {0}")]
    Recognize(#[from] RecognizeError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
