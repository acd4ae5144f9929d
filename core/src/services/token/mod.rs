//! Token issuance and verification

mod key_manager;
mod service;

pub use key_manager::{KeyManager, PRIVATE_KEY_ENV, PUBLIC_KEY_ENV};
pub use service::TokenService;
