//! HTTP listener configuration.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow cross-origin requests from browser clients.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Address to bind.
    ///
    /// # Errors
    /// Returns an error if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::InvalidValue {
            field: "server.host",
            reason: format!("'{}' is not an IP address", self.host),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
