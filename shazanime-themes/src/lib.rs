pub mod client;
pub mod config;
pub mod error;
pub mod recognize;
pub mod resolve;
pub mod types;

pub use client::{AnimeThemesClient, ThemeSource};
pub use config::{
    ApiConfig, ConfigSource, ConfigSources, RecognitionConfig, ThemesConfig, config_path,
};
pub use error::{ConfigError, RecognizeError, SearchError};
pub use recognize::RecognitionClient;
pub use resolve::{NormalizedInput, SearchStage, ThemeMatch, ThemeResolver};
