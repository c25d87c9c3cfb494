//! Client configuration resolved from environment-style keys.
//!
//! # Responsibility
//! - Resolve API backend, base URL, request timeout and logging options.
//! - Fall back to local-development defaults for unset or blank keys.
//!
//! # Invariants
//! - A resolved `base_url` always parses as an `http` or `https` URL.
//! - A resolved `log_dir` is always absolute.

use reqwest::Url;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_BACKEND: &str = "NOTEDESK_API_BACKEND";
pub const ENV_API_URL: &str = "NOTEDESK_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "NOTEDESK_API_TIMEOUT_SECS";
pub const ENV_API_NO_PROXY: &str = "NOTEDESK_API_NO_PROXY";
pub const ENV_LOG_LEVEL: &str = "NOTEDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEDESK_LOG_DIR";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_DIR_NAME: &str = "notedesk-logs";

/// Configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBackend(String),
    InvalidApiUrl(String),
    InvalidTimeout(String),
    InvalidFlag { key: &'static str, value: String },
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBackend(value) => {
                write!(f, "{ENV_API_BACKEND} must be `http` or `memory`, got `{value}`")
            }
            Self::InvalidApiUrl(value) => {
                write!(f, "{ENV_API_URL} must be an http(s) url, got `{value}`")
            }
            Self::InvalidTimeout(value) => write!(
                f,
                "{ENV_API_TIMEOUT_SECS} must be a positive integer, got `{value}`"
            ),
            Self::InvalidFlag { key, value } => {
                write!(f, "{key} must be a boolean flag, got `{value}`")
            }
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Where note requests are served from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiBackend {
    /// Remote notes API at `base_url`.
    #[default]
    Http,
    /// In-process store that starts empty and lives as long as the process.
    Memory,
}

impl ApiBackend {
    pub fn label(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Memory => "memory",
        }
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidBackend(raw.to_string())),
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: ApiBackend,
    /// Base URL of the notes API; the `notes` resource is appended to it.
    pub base_url: String,
    pub request_timeout: Duration,
    /// Skip system proxy settings for API calls.
    pub bypass_proxy: bool,
    /// One of `trace|debug|info|warn|error|off`; checked when logging starts.
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: ApiBackend::default(),
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bypass_proxy: false,
            log_level: default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl ClientConfig {
    /// Resolves configuration through an arbitrary key lookup.
    ///
    /// Unset and whitespace-only values resolve to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = read(ENV_API_BACKEND) {
            config.backend = ApiBackend::parse(&raw)?;
        }
        if let Some(raw) = read(ENV_API_URL) {
            config.base_url = normalize_api_url(&raw)?;
        }
        if let Some(raw) = read(ENV_API_TIMEOUT_SECS) {
            config.request_timeout = parse_timeout(&raw)?;
        }
        if let Some(raw) = read(ENV_API_NO_PROXY) {
            config.bypass_proxy = parse_flag(ENV_API_NO_PROXY, &raw)?;
        }
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.log_level = raw;
        }
        if let Some(raw) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&raw);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(raw));
            }
            config.log_dir = path;
        }

        Ok(config)
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw).map_err(|_| ConfigError::InvalidApiUrl(raw.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(raw.to_string()),
        _ => Err(ConfigError::InvalidApiUrl(raw.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}
