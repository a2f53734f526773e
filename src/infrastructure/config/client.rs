//! Settings for the API client used by the CLI and view models.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of a running server.
    pub base_url: String,
    /// How long a success message stays up before the form resets.
    pub success_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".into(),
            success_timeout_ms: 3_000,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn success_timeout(&self) -> Duration {
        Duration::from_millis(self.success_timeout_ms)
    }
}
