//! Token service: issue and verify signed identity tokens

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::key_manager::KeyManager;

/// Issues and verifies RS256-signed, time-bound identity tokens.
///
/// Verification is pure given the keypair: no I/O, no side effects, no
/// server-side revocation. Clients discard tokens after expiry.
pub struct TokenService {
    keys: Arc<KeyManager>,
    validation: Validation,
}

impl TokenService {
    pub fn new(keys: Arc<KeyManager>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // No leeway; verify enforces the exact expiry boundary on top
        validation.leeway = 0;
        validation.validate_exp = true;

        Self { keys, validation }
    }

    /// Issue a token for `subject_id`, valid for `ttl` from now.
    pub fn issue(&self, subject_id: i64, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: subject_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.keys.encoding_key(),
        )
        .map_err(|_| TokenError::SigningFailed)
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// Malformed input, a bad signature, or the wrong claim shape all fail
    /// with [`TokenError::Invalid`]; a structurally valid token past its
    /// expiry fails with [`TokenError::Expired`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        // The decode above still accepts exp == now; the token must
        // already be invalid the instant now >= exp.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
