//! HTTP layer of the user service.
//!
//! Exposes the actix-web application builder, the token-checking
//! middleware and the JSON request/response types used by the routes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
