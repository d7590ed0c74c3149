use thiserror::Error;

/// Errors that can occur while reading or writing the history log.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
