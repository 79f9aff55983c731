//! Bootstrap configuration loading
//!
//! Settings are read once at startup from an optional TOML file. Every field
//! has a built-in default, so the service starts with no file at all.
//!
//! Config file priority:
//! 1. Command-line argument (highest priority)
//! 2. `ECOPICK_CONFIG` environment variable
//! 3. `<config_dir>/ecopick/config.toml` if it exists
//! 4. Built-in defaults
//!
//! Classifier API key priority:
//! 1. Command-line argument
//! 2. `ECOPICK_API_KEY` environment variable
//! 3. `API_KEY` environment variable
//! 4. `[classifier] api_key` in the TOML file

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ECOPICK_CONFIG";

/// Environment variables holding the classifier API key, in priority order
pub const API_KEY_ENV_VARS: [&str; 2] = ["ECOPICK_API_KEY", "API_KEY"];

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Address the HTTP server binds to
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Directory of static pages served at `/` (optional)
    pub static_dir: Option<PathBuf>,

    /// Maximum accepted request body, image uploads included
    pub max_body_bytes: usize,

    pub logging: LoggingConfig,

    pub classifier: ClassifierConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            max_body_bytes: 50 * 1024 * 1024,
            logging: LoggingConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// External classifier settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,

    /// Generative model name, e.g. `gemini-1.5-flash`
    pub model: String,

    /// REST endpoint root of the generative language API
    pub base_url: String,

    /// Request timeout; `None` leaves the HTTP client default in place
    pub timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

// Keeps the key out of startup logs.
impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where the bootstrap configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl ConfigSource {
    /// Pick the configuration file following the priority order
    ///
    /// CLI argument, then `ECOPICK_CONFIG`, then the per-user default file
    /// if it exists. Does no logging so it can run before tracing is set up.
    pub fn locate(cli_path: Option<&Path>) -> Self {
        if let Some(path) = cli_path {
            return ConfigSource::File(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::File(PathBuf::from(path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => ConfigSource::File(path),
            _ => ConfigSource::Defaults,
        }
    }

    /// An explicitly named file (CLI or environment) must exist
    pub fn load(&self) -> Result<TomlConfig> {
        match self {
            ConfigSource::File(path) => TomlConfig::from_file(path),
            ConfigSource::Defaults => Ok(TomlConfig::default()),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl TomlConfig {
    /// Locate and load configuration in one step
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        ConfigSource::locate(cli_path).load()
    }

    /// Parse a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read {} failed: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-user config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecopick").join("config.toml"))
}

/// Resolve the classifier API key from all sources
///
/// Returns `None` when no source holds a usable key; the server then runs
/// in mock mode.
pub fn resolve_api_key(cli_arg: Option<&str>, classifier: &ClassifierConfig) -> Option<String> {
    let mut candidates: Vec<(&str, String)> = Vec::new();

    if let Some(key) = cli_arg {
        candidates.push(("command line", key.to_string()));
    }
    for var in API_KEY_ENV_VARS {
        if let Ok(key) = std::env::var(var) {
            candidates.push((var, key));
        }
    }
    if let Some(key) = &classifier.api_key {
        candidates.push(("TOML", key.clone()));
    }

    candidates.retain(|(_, key)| is_valid_key(key));

    if candidates.len() > 1 {
        let sources: Vec<&str> = candidates.iter().map(|(s, _)| *s).collect();
        warn!(
            "API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    candidates.into_iter().next().map(|(source, key)| {
        info!("API key loaded from {}", source);
        key
    })
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
