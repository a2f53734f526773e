//! SQLite database configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, optionally prefixed with `sqlite://`.
    ///
    /// The `DATABASE_URL` environment variable overrides this.
    pub url: String,
    pub max_connections: u32,
    /// How long a writer waits on a locked database.
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "schoolyard.db".into(),
            max_connections: 8,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// The URL as Diesel's SQLite driver expects it.
    #[must_use]
    pub fn connection_url(&self) -> &str {
        self.url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url)
    }
}
