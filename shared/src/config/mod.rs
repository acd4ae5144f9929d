//! Configuration types loaded from environment variables

mod auth;
mod database;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Aggregated application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load the full configuration from the process environment.
    ///
    /// Returns an error message naming the variable that is missing or
    /// malformed; callers treat this as a fatal startup condition.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
        })
    }
}
