//! Infrastructure layer for the user service
//!
//! Concrete implementations of the core's capability traits: a Postgres
//! `UserRepository` and a bcrypt `PasswordHasher`.

pub mod database;
pub mod hasher;

pub use database::connection::create_pool;
pub use database::postgres::PgUserRepository;
pub use hasher::BcryptPasswordHasher;

use thiserror::Error;

/// Errors raised while constructing infrastructure components.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),
}
