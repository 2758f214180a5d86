//! Configuration file parser for ~/.config/shopfront/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Environment variables are layered on top by [`Config::apply_env`], and
//! CLI flags on top of that in `main`.
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::motion::reduced_motion_from_env;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level application configuration.
///
/// Every key is optional; missing keys fall back to `Default::default()`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Base URL of the storefront API, e.g. `https://shop.example.com/api`.
    pub api_url: String,

    /// Products requested per page.
    pub page_size: u32,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Disable decorative animation.
    pub reduced_motion: bool,

    /// Initial product order ("featured", "rating" or "newest").
    pub sort: String,

    /// Keybinding overrides: action name to key string.
    pub keybindings: HashMap<String, String>,

    /// Bearer token for the API. `SHOPFRONT_API_TOKEN` takes precedence.
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 20,
            reduced_motion: false,
            sort: "featured".to_string(),
            keybindings: HashMap::new(),
            api_token: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("theme", &self.theme)
            .field("api_url", &self.api_url)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("reduced_motion", &self.reduced_motion)
            .field("sort", &self.sort)
            .field("keybindings", &self.keybindings)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "theme",
        "api_url",
        "page_size",
        "request_timeout_secs",
        "reduced_motion",
        "sort",
        "keybindings",
        "api_token",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing or blank file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            api_url = %config.api_url,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse TOML text. Blank text yields the defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Layer environment overrides on top of the file values.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHOPFRONT_API_URL").filter(|v| !v.trim().is_empty()) {
            tracing::debug!(api_url = %url, "API URL taken from environment");
            self.api_url = url;
        }
        if let Some(token) = lookup("SHOPFRONT_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(reduced) = reduced_motion_from_env(&lookup) {
            self.reduced_motion = reduced;
        }
    }

    /// The API token wrapped so it cannot leak through Debug or logs.
    pub fn api_token_secret(&self) -> Option<SecretString> {
        self.api_token
            .as_ref()
            .map(|t| SecretString::from(t.clone()))
    }

    fn normalize(&mut self) {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            let clamped = self.page_size.clamp(1, MAX_PAGE_SIZE);
            tracing::warn!(page_size = self.page_size, clamped, "page_size out of range");
            self.page_size = clamped;
        }
    }
}
