//! Database connection pooling and the Postgres repository

pub mod connection;
pub mod postgres;
