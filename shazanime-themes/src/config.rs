use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.animethemes.moe";
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "SHAZANIME_API_URL";
const ENV_PAGE_SIZE: &str = "SHAZANIME_PAGE_SIZE";
const ENV_TIMEOUT: &str = "SHAZANIME_TIMEOUT_SECS";
const ENV_RECOGNIZE_URL: &str = "SHAZANIME_RECOGNIZE_URL";

/// Theme database endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
    /// Per-request transport timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Recognition backend settings. There is no public default backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub url: Option<String>,
    pub timeout_secs: u64,
}

/// All endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemesConfig {
    pub api: ApiConfig,
    pub recognition: RecognitionConfig,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub page_size: ConfigSource,
    pub timeout_secs: ConfigSource,
    pub recognize_url: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    animethemes: Option<AnimeThemesSection>,
    recognition: Option<RecognitionSection>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct AnimeThemesSection {
    base_url: Option<String>,
    page_size: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RecognitionSection {
    url: Option<String>,
}

/// Return the path to the endpoint config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shazanime").join("config.toml"))
}

fn load_config_file() -> Result<Option<ConfigFile>, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::File(format!("{}: {}", path.display(), e))),
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::File(format!("{}: {}", path.display(), e)))
}

/// Resolve one setting: env var > config file > default.
///
/// Values from either source go through `parse`; an unusable value is an
/// error rather than a silent fallback.
fn pick<T>(
    env: &dyn Fn(&str) -> Option<String>,
    var: &'static str,
    file_key: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    from_file: Option<String>,
    default: Option<T>,
) -> Result<(Option<T>, ConfigSource), ConfigError> {
    if let Some(raw) = env(var) {
        let value = parse(&raw).ok_or(ConfigError::Invalid {
            key: var,
            value: raw.clone(),
        })?;
        return Ok((Some(value), ConfigSource::EnvVar(var)));
    }
    if let Some(raw) = from_file {
        let value = parse(&raw).ok_or(ConfigError::Invalid {
            key: file_key,
            value: raw.clone(),
        })?;
        return Ok((Some(value), ConfigSource::ConfigFile));
    }
    match default {
        Some(v) => Ok((Some(v), ConfigSource::Default)),
        None => Ok((None, ConfigSource::Missing)),
    }
}

fn parse_positive<T: std::str::FromStr + Default + PartialOrd>(s: &str) -> Option<T> {
    s.trim().parse::<T>().ok().filter(|n| *n > T::default())
}

fn parse_url(s: &str) -> Option<String> {
    let s = s.trim();
    (s.starts_with("http://") || s.starts_with("https://")).then(|| s.to_string())
}

impl ThemesConfig {
    /// Load settings from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_sources().map(|(config, _)| config)
    }

    /// Like [`ThemesConfig::load`], also reporting where each value came from.
    pub fn load_with_sources() -> Result<(Self, ConfigSources), ConfigError> {
        let file = load_config_file()?;
        Self::from_sources(&|var: &str| std::env::var(var).ok(), file.unwrap_or_default())
    }

    fn from_sources(
        env: &dyn Fn(&str) -> Option<String>,
        file: ConfigFile,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let api_file = file.animethemes.unwrap_or_default();
        let rec_file = file.recognition.unwrap_or_default();

        let (base_url, base_url_src) = pick(
            env,
            ENV_API_URL,
            "animethemes.base_url",
            parse_url,
            api_file.base_url,
            Some(DEFAULT_API_URL.to_string()),
        )?;
        let (page_size, page_size_src) = pick(
            env,
            ENV_PAGE_SIZE,
            "animethemes.page_size",
            parse_positive::<u32>,
            api_file.page_size.map(|n| n.to_string()),
            Some(DEFAULT_PAGE_SIZE),
        )?;
        let (timeout_secs, timeout_src) = pick(
            env,
            ENV_TIMEOUT,
            "animethemes.timeout_secs",
            parse_positive::<u64>,
            api_file.timeout_secs.map(|n| n.to_string()),
            Some(DEFAULT_TIMEOUT_SECS),
        )?;
        let (recognize_url, recognize_src) = pick(
            env,
            ENV_RECOGNIZE_URL,
            "recognition.url",
            parse_url,
            rec_file.url,
            None,
        )?;

        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let config = Self {
            api: ApiConfig {
                base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
                timeout_secs,
            },
            recognition: RecognitionConfig {
                url: recognize_url,
                timeout_secs,
            },
        };
        let sources = ConfigSources {
            base_url: base_url_src,
            page_size: page_size_src,
            timeout_secs: timeout_src,
            recognize_url: recognize_src,
        };
        Ok((config, sources))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
