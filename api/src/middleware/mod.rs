//! HTTP middleware stack.

pub mod auth;

pub use auth::{AuthGate, CurrentUser};
