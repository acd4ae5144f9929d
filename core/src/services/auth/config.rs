//! Auth service configuration

use chrono::Duration;

/// Tunables for the auth service.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Validity window of issued login tokens.
    pub token_ttl: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(6),
        }
    }
}

impl AuthServiceConfig {
    pub fn new(token_ttl: Duration) -> Self {
        Self { token_ttl }
    }
}
