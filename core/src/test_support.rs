//! Shared fixtures for unit tests

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::services::token::KeyManager;

// RSA keygen is expensive; every test module shares one keypair (and a
// second, foreign one for negative signature tests).
static TEST_KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::generate().expect("test keypair generation")));

static OTHER_KEYS: Lazy<Arc<KeyManager>> =
    Lazy::new(|| Arc::new(KeyManager::generate().expect("test keypair generation")));

pub(crate) fn test_keys() -> Arc<KeyManager> {
    Arc::clone(&TEST_KEYS)
}

pub(crate) fn other_keys() -> Arc<KeyManager> {
    Arc::clone(&OTHER_KEYS)
}
