//! JSON request and response bodies.

pub mod auth;
pub mod user;
