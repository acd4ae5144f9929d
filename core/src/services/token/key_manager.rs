//! RS256 key management for token signing and verification
//!
//! The keypair is created exactly once, at process start, and injected
//! into everything that needs it (token service, auth middleware). If the
//! environment supplies `JWT_PRIVATE_KEY` / `JWT_PUBLIC_KEY` (base64-encoded
//! PEM), those are decoded and any failure is fatal: the process cannot
//! serve traffic with broken keys. With no environment keys a fresh
//! 2048-bit RSA keypair is generated and kept only in memory, so a restart
//! invalidates every previously issued token.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

use crate::errors::TokenError;

/// Environment variable holding the base64-encoded private key PEM.
pub const PRIVATE_KEY_ENV: &str = "JWT_PRIVATE_KEY";
/// Environment variable holding the base64-encoded public key PEM.
pub const PUBLIC_KEY_ENV: &str = "JWT_PUBLIC_KEY";

const RSA_KEY_BITS: usize = 2048;

/// Holder of the RS256 keypair used for signing and verifying tokens.
/// Immutable after construction; safe for unsynchronized concurrent reads.
#[derive(Clone)]
pub struct KeyManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    private_key_pem: String,
    public_key_pem: String,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs
        f.debug_struct("KeyManager").finish()
    }
}

impl KeyManager {
    /// Build the keypair from the process environment.
    ///
    /// Both `JWT_PRIVATE_KEY` and `JWT_PUBLIC_KEY` present: decode and
    /// parse them, propagating any failure. Otherwise: generate an
    /// ephemeral keypair.
    pub fn from_env() -> Result<Self, TokenError> {
        // An empty variable counts as absent
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self::from_env_values(read(PRIVATE_KEY_ENV), read(PUBLIC_KEY_ENV))
    }

    fn from_env_values(
        private_b64: Option<String>,
        public_b64: Option<String>,
    ) -> Result<Self, TokenError> {
        match (private_b64, public_b64) {
            (Some(private_b64), Some(public_b64)) => {
                Self::from_base64_pem(&private_b64, &public_b64)
            }
            _ => {
                tracing::warn!(
                    "no signing keys in environment; generated an ephemeral keypair \
                     (tokens will not survive a restart)"
                );
                Self::generate()
            }
        }
    }

    /// Build the keypair from base64-encoded PEM strings.
    pub fn from_base64_pem(private_b64: &str, public_b64: &str) -> Result<Self, TokenError> {
        let private_pem = decode_base64(private_b64, "private key")?;
        let public_pem = decode_base64(public_b64, "public key")?;
        Self::from_pem(&private_pem, &public_pem)
    }

    /// Build the keypair from PEM strings.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> Result<Self, TokenError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(private_pem.as_bytes()).map_err(|e| TokenError::KeyLoad {
                message: format!("invalid private key PEM: {e}"),
            })?;

        let decoding_key =
            DecodingKey::from_rsa_pem(public_pem.as_bytes()).map_err(|e| TokenError::KeyLoad {
                message: format!("invalid public key PEM: {e}"),
            })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_pem: private_pem.to_string(),
            public_key_pem: public_pem.to_string(),
        })
    }

    /// Generate a fresh 2048-bit RSA keypair, retained only in memory.
    pub fn generate() -> Result<Self, TokenError> {
        let mut rng = rand::thread_rng();
        let private_key =
            RsaPrivateKey::new(&mut rng, RSA_KEY_BITS).map_err(|e| TokenError::KeyGeneration {
                message: e.to_string(),
            })?;

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGeneration {
                message: e.to_string(),
            })?
            .to_string();

        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGeneration {
                message: e.to_string(),
            })?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Private key for signing tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Public key for verifying tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// PEM form of the public key.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// PEM form of the private key. Intended for persisting a generated
    /// keypair outside the process; never log it.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }
}

fn decode_base64(value: &str, what: &str) -> Result<String, TokenError> {
    let bytes = BASE64.decode(value.trim()).map_err(|e| TokenError::KeyLoad {
        message: format!("{what} is not valid base64: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| TokenError::KeyLoad {
        message: format!("{what} is not valid UTF-8 PEM: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    use super::*;
    use crate::test_support::test_keys;

    #[test]
    fn base64_pem_roundtrip_yields_working_keys() {
        let keys = test_keys();
        let private_b64 = BASE64.encode(keys.private_key_pem());
        let public_b64 = BASE64.encode(keys.public_key_pem());

        let reloaded =
            KeyManager::from_env_values(Some(private_b64), Some(public_b64)).unwrap();
        assert_eq!(reloaded.public_key_pem(), keys.public_key_pem());
    }

    #[test]
    fn invalid_base64_is_a_key_load_error() {
        let err =
            KeyManager::from_base64_pem("not base64!!", "also not base64!!").unwrap_err();
        assert!(matches!(err, TokenError::KeyLoad { .. }));
    }

    #[test]
    fn invalid_pem_is_a_key_load_error() {
        let garbage = BASE64.encode("-----BEGIN GARBAGE-----\nabc\n-----END GARBAGE-----");
        let err = KeyManager::from_base64_pem(&garbage, &garbage).unwrap_err();
        assert!(matches!(err, TokenError::KeyLoad { .. }));
    }

    #[test]
    fn missing_env_values_generate_an_ephemeral_keypair() {
        let keys = KeyManager::from_env_values(None, None).unwrap();
        assert!(keys.public_key_pem().contains("BEGIN PUBLIC KEY"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_holders_observe_the_same_keypair() {
        let keys: Arc<KeyManager> = test_keys();

        let a = {
            let keys = Arc::clone(&keys);
            tokio::spawn(async move { keys.public_key_pem().to_string() })
        };
        let b = {
            let keys = Arc::clone(&keys);
            tokio::spawn(async move { keys.public_key_pem().to_string() })
        };

        assert_eq!(a.await.unwrap(), b.await.unwrap());
    }
}
