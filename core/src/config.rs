//! TOML Configuration File Support
//!
//! Configuration for the chat client, loaded from an optional TOML file at
//! `~/.config/thinkchat/config.toml`.
//!
//! # Configuration Priority
//!
//! Highest first:
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables (`THINKCHAT_ENDPOINT`, `THINKCHAT_LOCALE`,
//!    `THINKCHAT_TIMEOUT_SECS`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! endpoint = "http://localhost:5000/chat"
//! request_timeout_secs = 120
//! locale = "ja"
//!
//! [pacing]
//! char_delay_ms = [28, 58]
//! phrase_delay_ms = [120, 320]
//! trace_char_delay_ms = 4
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::Pacing;
use crate::locale::Locale;

/// Default chat endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/chat";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Where the highest-precedence configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Structure
// =============================================================================

/// On-disk configuration, every key optional
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatToml {
    /// Chat endpoint URL
    pub endpoint: Option<String>,
    /// Request timeout in seconds (0 = none)
    pub request_timeout_secs: Option<u64>,
    /// UI locale
    pub locale: Option<Locale>,
    /// Animation pacing; missing keys keep their defaults
    pub pacing: Option<Pacing>,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved chat client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatConfig {
    /// Full URL of the chat endpoint
    pub endpoint: String,
    /// Request timeout in seconds; `None` waits forever
    pub request_timeout_secs: Option<u64>,
    /// UI locale
    pub locale: Locale,
    /// Animation pacing
    pub pacing: Pacing,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    source: ConfigSource,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            locale: Locale::default(),
            pacing: Pacing::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ChatConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest-precedence source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Request timeout, if any
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/thinkchat/config.toml` or the platform
/// equivalent.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("thinkchat").join("config.toml"))
}

/// Get the default log file path for interactive sessions
///
/// `$XDG_STATE_HOME/thinkchat/thinkchat.log`, falling back to the cache
/// directory on platforms without a state directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|p| p.join("thinkchat").join("thinkchat.log"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// result fails validation. A missing config file is not an error.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    load_config_from_path(default_config_path().as_deref())
}

/// Load configuration from a specific path and the environment
///
/// With `None`, only defaults and environment variables are used.
pub fn load_config_from_path(path: Option<&Path>) -> Result<ChatConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<ChatConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ChatConfig::default();

    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: ChatToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(path = %config_path.display(), "Loaded configuration from file");
        } else {
            tracing::debug!(path = %config_path.display(), "Config file not found, using defaults");
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut ChatConfig, toml: ChatToml) {
    if let Some(endpoint) = toml.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(secs) = toml.request_timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    if let Some(locale) = toml.locale {
        config.locale = locale;
    }
    if let Some(pacing) = toml.pacing {
        config.pacing = pacing;
    }
}

fn apply_env_config<F>(config: &mut ChatConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = env("THINKCHAT_ENDPOINT").filter(|v| !v.trim().is_empty()) {
        config.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(locale) = env("THINKCHAT_LOCALE") {
        match locale.parse::<Locale>() {
            Ok(locale) => {
                config.locale = locale;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!("Ignoring THINKCHAT_LOCALE: {}", e),
        }
    }
    if let Some(timeout) = env("THINKCHAT_TIMEOUT_SECS") {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => {
                config.request_timeout_secs = Some(secs);
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!("Ignoring THINKCHAT_TIMEOUT_SECS='{}': {}", timeout, e),
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Locale override
    pub locale: Option<Locale>,
    /// Timeout override (seconds)
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Create an empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the locale
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Apply overrides to a configuration, then re-validate it
    pub fn apply(&self, config: &mut ChatConfig) -> Result<(), ConfigError> {
        if self.endpoint.is_some() || self.locale.is_some() || self.request_timeout_secs.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = Some(secs);
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
