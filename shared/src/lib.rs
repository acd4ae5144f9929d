//! Shared configuration and wire types for the user service
//!
//! This crate provides the pieces used by more than one server crate:
//! - Configuration types loaded from the environment
//! - The error response body shape used by every endpoint

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
pub use types::ErrorResponse;
