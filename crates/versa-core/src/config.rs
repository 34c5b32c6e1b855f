//! Configuration from environment variables.
//!
//! Settings are read from `VERSA_`-prefixed variables:
//!
//! | variable       | field    | default |
//! |----------------|----------|---------|
//! | `VERSA_PREFIX` | `prefix` | none    |
//! | `VERSA_DEBUG`  | `debug`  | `false` |
//! | `VERSA_ENV`    | see [`Environment`] | development |
//!
//! # Example
//!
//! ```ignore
//! use versa_core::config::{load_dotenv, VersaConfig};
//!
//! load_dotenv();
//! let config = VersaConfig::from_env()?;
//! let routes = registry.build_routes(config.prefix());
//! ```

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Prefix of every Versa environment variable
pub const ENV_PREFIX: &str = "VERSA_";

/// Error type for configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    #[error("configuration error: {0}")]
    Envy(#[from] envy::Error),
}

/// Resolver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersaConfig {
    /// Path segment placed before the version, e.g. `api` for `/api/v1/...`
    #[serde(default)]
    pub prefix: Option<String>,
    /// Log middleware registration and every emitted route
    #[serde(default)]
    pub debug: bool,
}

impl VersaConfig {
    /// Load from `VERSA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .map_err(ConfigError::from)
    }

    /// Load from explicit key/value pairs using the same `VERSA_*` names.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Self>(vars)
            .map_err(ConfigError::from)
    }

    /// Set the route prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Route prefix, treating an empty value as unset
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }
}

/// Environment profile for the application.
///
/// Detected from the `VERSA_ENV` environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Development environment with debug logging.
    Development,
    /// Production environment.
    Production,
    /// Custom environment name for specialized deployments.
    Custom(String),
}

impl Environment {
    /// Detect the current environment from `VERSA_ENV`.
    pub fn current() -> Self {
        Self::from_value(std::env::var("VERSA_ENV").ok().as_deref())
    }

    /// Interpret a `VERSA_ENV` value; unset means development.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("production") | Some("prod") => Self::Production,
            Some("development") | Some("dev") | None => Self::Development,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Get the environment name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Default log level for this environment.
    ///
    /// - Development: "debug"
    /// - Production and custom: "info"
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production | Self::Custom(_) => "info",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load environment variables from a `.env` file.
///
/// Existing variables are not overridden. A missing file is not an error.
/// Returns `true` if a file was loaded.
pub fn load_dotenv() -> bool {
    dotenvy::dotenv().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = VersaConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config, VersaConfig::default());
        assert_eq!(config.prefix(), None);
    }

    #[test]
    fn test_reads_prefixed_vars() {
        let config = VersaConfig::from_vars(vars(&[
            ("VERSA_PREFIX", "api"),
            ("VERSA_DEBUG", "true"),
        ]))
        .unwrap();

        assert_eq!(config.prefix(), Some("api"));
        assert!(config.debug);
    }

    #[test]
    fn test_empty_prefix_is_unset() {
        let config = VersaConfig::from_vars(vars(&[("VERSA_PREFIX", "")])).unwrap();
        assert_eq!(config.prefix(), None);
        assert_eq!(VersaConfig::default().with_prefix("x").prefix(), Some("x"));
    }

    #[test]
    fn test_invalid_bool_is_an_error() {
        let err = VersaConfig::from_vars(vars(&[("VERSA_DEBUG", "maybe")])).unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn test_environment_from_value() {
        assert_eq!(Environment::from_value(None), Environment::Development);
        assert_eq!(Environment::from_value(Some("prod")), Environment::Production);
        assert_eq!(
            Environment::from_value(Some("staging")),
            Environment::Custom("staging".to_string())
        );
        assert_eq!(Environment::Production.default_log_level(), "info");
        assert_eq!(Environment::Development.default_log_level(), "debug");
        assert_eq!(Environment::from_value(Some("staging")).to_string(), "staging");
    }
}
