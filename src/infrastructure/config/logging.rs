//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` wins over the configured level. A second call is a no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
