//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; every section has
//! defaults, so an empty file is valid. `DATABASE_URL` overrides
//! `[database].url`.
//!
//! # Example
//!
//! ```no_run
//! use schoolyard::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::client::ClientConfig;
use super::database::DatabaseConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::server::ServerConfig;
use super::upload::UploadConfig;
use crate::error::{ConfigError, Error, Result};

/// Environment variable that replaces `[database].url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
    pub client: ClientConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Same as [`parse_toml`](Self::parse_toml) with a custom environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(url) = env(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.database.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults (still applying
    /// `DATABASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            Error::from(ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            })
        })
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.uploads.dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "uploads.dir",
            }
            .into());
        }
        let public = &self.uploads.public_path;
        if !public.starts_with('/') || public.len() < 2 || public.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "uploads.public_path",
                reason: "must start with '/' and name a path segment, e.g. /schoolImages"
                    .to_string(),
            }
            .into());
        }
        if public == "/schools" || public == "/health" {
            return Err(ConfigError::InvalidValue {
                field: "uploads.public_path",
                reason: format!("{public} is an API route"),
            }
            .into());
        }
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "uploads.max_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.uploads.allowed_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "uploads.allowed_types",
                reason: "must list at least one content type".to_string(),
            }
            .into());
        }
        if let Some(bad) = self
            .uploads
            .allowed_types
            .iter()
            .find(|t| !t.trim().to_ascii_lowercase().starts_with("image/"))
        {
            return Err(ConfigError::InvalidValue {
                field: "uploads.allowed_types",
                reason: format!("'{bad}' is not an image type"),
            }
            .into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }

        Url::parse(&self.client.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "client.base_url",
            reason: e.to_string(),
        })?;
        if self.client.success_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.success_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
