//! Database configuration

use serde::{Deserialize, Serialize};

/// Database connection pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Postgres connection URL
    pub url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,
}

impl DatabaseConfig {
    /// Load from the environment. `DATABASE_URL` is required; pool settings
    /// have sensible defaults.
    pub fn from_env() -> Result<Self, String> {
        let url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL env not set".to_string())?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            Err(_) => 10,
        };

        let connect_timeout = match std::env::var("DATABASE_CONNECT_TIMEOUT") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| format!("DATABASE_CONNECT_TIMEOUT is not a number: {raw}"))?,
            Err(_) => 30,
        };

        Ok(Self {
            url,
            max_connections,
            connect_timeout,
        })
    }
}
