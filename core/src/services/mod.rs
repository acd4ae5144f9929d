//! Service layer: authentication, token handling, password hashing

pub mod auth;
pub mod hasher;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig};
pub use hasher::PasswordHasher;
pub use token::{KeyManager, TokenService};
