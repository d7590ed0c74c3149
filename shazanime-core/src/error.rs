use thiserror::Error;

/// Errors that can occur while loading name mapping tables.
#[derive(Debug, Error)]
pub enum MappingError {
    /// I/O error while reading a mapping file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mapping file is not valid TOML or has the wrong shape
    #[error("Invalid mapping file: {0}")]
    Toml(#[from] toml::de::Error),
}
