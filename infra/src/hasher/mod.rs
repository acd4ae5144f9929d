//! Bcrypt implementation of the password hashing boundary

use us_core::errors::HasherError;
use us_core::services::hasher::PasswordHasher;

/// Cost-factor salted hashing via bcrypt.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Lower costs are only appropriate for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, HasherError> {
        bcrypt::hash(password, self.cost).map_err(|e| HasherError::new(e.to_string()))
    }

    fn verify(&self, hashed: &str, password: &str) -> Result<bool, HasherError> {
        bcrypt::verify(password, hashed).map_err(|e| HasherError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts, to keep the test fast
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let hashed = hasher.hash("s3cret").unwrap();

        assert!(hasher.verify(&hashed, "s3cret").unwrap());
        assert!(!hasher.verify(&hashed, "wrong").unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::new();
        assert!(hasher.verify("not-a-bcrypt-hash", "pw").is_err());
    }
}
