/// Errors from the theme database search (transport, status or payload).
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse search response: {0}")]
    Parse(String),
}

/// Errors from the recognition backend.
#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse recognition response: {0}")]
    Parse(String),

    #[error("Song not identified: {0}")]
    NotIdentified(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors while reading endpoint configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("Config file error: {0}")]
    File(String),
}

/// First `max` characters of a response body, for error messages.
pub(crate) fn snippet(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
