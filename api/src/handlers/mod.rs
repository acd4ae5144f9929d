//! Shared handler plumbing.

pub mod error;

pub use error::{bad_request_response, service_error_response};
