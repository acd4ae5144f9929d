//! Authentication and profile service

mod config;
mod service;

pub use config::AuthServiceConfig;
pub use service::AuthService;
