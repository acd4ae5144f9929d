//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 1323,
        }
    }
}

impl ServerConfig {
    /// Load from `SERVER_HOST` / `SERVER_PORT`, falling back to defaults.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let host = std::env::var("SERVER_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("SERVER_PORT is not a valid port: {raw}"))?,
            Err(_) => defaults.port,
        };

        Ok(Self { host, port })
    }

    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
