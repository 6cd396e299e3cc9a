//! Router configuration loading.
//!
//! Deserialized from TOML. Every field has a serde default so an empty file
//! (or no file at all, via [`RouterConfig::default`]) yields a working router.
//!
//! ```toml
//! prefix = "!"
//! resolver_timeout_secs = 5
//!
//! [notices]
//! permission_denied = "You do not have the permission to use this command"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Leading character that marks a message as a command invocation.
    #[serde(default = "defaults::prefix")]
    pub prefix: char,
    /// Deadline for directory-backed permission lookups.
    #[serde(default = "defaults::resolver_timeout_secs")]
    pub resolver_timeout_secs: u64,
    /// Standardized user-facing notices.
    #[serde(default)]
    pub notices: NoticesConfig,
}

/// Standardized notice texts sent by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct NoticesConfig {
    #[serde(default = "defaults::permission_denied")]
    pub permission_denied: String,
    #[serde(default = "defaults::need_more_params")]
    pub need_more_params: String,
    #[serde(default = "defaults::command_failed")]
    pub command_failed: String,
}

impl RouterConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: RouterConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.is_whitespace() {
            return Err(ConfigError::Invalid(
                "prefix must not be a whitespace character".to_string(),
            ));
        }
        if self.resolver_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "resolver_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolver deadline as a [`Duration`].
    #[inline]
    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs(self.resolver_timeout_secs)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: defaults::prefix(),
            resolver_timeout_secs: defaults::resolver_timeout_secs(),
            notices: NoticesConfig::default(),
        }
    }
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            permission_denied: defaults::permission_denied(),
            need_more_params: defaults::need_more_params(),
            command_failed: defaults::command_failed(),
        }
    }
}

/// Default value functions for serde.
mod defaults {
    pub fn prefix() -> char {
        '!'
    }

    pub fn resolver_timeout_secs() -> u64 {
        5
    }

    pub fn permission_denied() -> String {
        "You do not have the permission to use this command".to_string()
    }

    pub fn need_more_params() -> String {
        "That command requires more parameters".to_string()
    }

    pub fn command_failed() -> String {
        "The command failed to run".to_string()
    }
}
