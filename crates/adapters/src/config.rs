use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Prefix every route is nested under, e.g. `/api`. Empty for none.
    pub api_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            api_root: "/api".to_string(),
        }
    }
}

impl ServerConfig {
    /// Check the values can be used to build a router
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.api_root.is_empty() {
            return Ok(());
        }

        if !self.api_root.starts_with('/') || self.api_root.ends_with('/') {
            return Err(ServerError::Config {
                reason: format!(
                    "api_root must start with '/' and must not end with '/', got '{}'",
                    self.api_root
                ),
            });
        }

        Ok(())
    }
}
