//! Password hashing boundary
//!
//! The algorithm is external and swappable; the core only consumes this
//! capability pair. The bcrypt implementation lives in `us_infra`.

use crate::errors::HasherError;

/// Hash-and-compare capability consumed by the auth service.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &str) -> Result<String, HasherError>;

    /// Check `password` against a stored hash. `Ok(false)` is a mismatch;
    /// `Err` means the stored hash itself could not be processed.
    fn verify(&self, hashed: &str, password: &str) -> Result<bool, HasherError>;
}

/// Deterministic hasher for tests: `hash` prefixes the password, `verify`
/// compares the prefixed form.
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HasherError> {
        Ok(format!("hashed::{password}"))
    }

    fn verify(&self, hashed: &str, password: &str) -> Result<bool, HasherError> {
        Ok(hashed == format!("hashed::{password}"))
    }
}
