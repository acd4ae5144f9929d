//! Authentication configuration
//!
//! Signing key material itself is not configured here; it reaches the
//! process through `JWT_PRIVATE_KEY` / `JWT_PUBLIC_KEY` (base64-encoded PEM)
//! and is handled by the core key manager.

use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 6 * 60 * 60;

/// Token issuance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Validity window for issued tokens, in seconds
    pub token_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

impl AuthConfig {
    /// Load from `AUTH_TOKEN_TTL_SECONDS`, defaulting to six hours.
    pub fn from_env() -> Result<Self, String> {
        let token_ttl_seconds = match std::env::var("AUTH_TOKEN_TTL_SECONDS") {
            Ok(raw) => {
                let seconds = raw
                    .parse::<i64>()
                    .map_err(|_| format!("AUTH_TOKEN_TTL_SECONDS is not a number: {raw}"))?;
                if seconds <= 0 {
                    return Err(format!("AUTH_TOKEN_TTL_SECONDS must be positive: {seconds}"));
                }
                seconds
            }
            Err(_) => DEFAULT_TOKEN_TTL_SECONDS,
        };

        Ok(Self { token_ttl_seconds })
    }
}
