//! Error type definitions

use thiserror::Error;

/// Message returned for a failed credential check. Wrong phone and wrong
/// password deliberately share this text so callers cannot tell which
/// factor failed.
pub const WRONG_PHONE_PASSWORD_MESSAGE: &str = "password or phone number is incorrect.";

/// Message returned when the authenticated user's record is missing.
pub const USER_NOT_FOUND_MESSAGE: &str = "user data not found.";

/// Message for a phone number that is already registered.
pub fn phone_already_used_message(phone: &str) -> String {
    format!("phone number {phone} already used.")
}

/// Classification of a service-level failure, mapped by the boundary layer
/// to an externally visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-correctable problem; maps to a client-fault outcome
    BadRequest,
    /// Uniqueness violation discovered during a write
    Conflict,
    /// Unexpected storage/crypto failure; maps to a server-fault outcome
    System,
}

/// A service-level error: a message plus its [`ErrorKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub kind: ErrorKind,
}

impl ServiceError {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::BadRequest)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Conflict)
    }

    /// Wrap an unexpected failure, keeping only its message text.
    pub fn system(err: impl std::fmt::Display) -> Self {
        Self::new(err.to_string(), ErrorKind::System)
    }

    pub fn wrong_credentials() -> Self {
        Self::bad_request(WRONG_PHONE_PASSWORD_MESSAGE)
    }

    pub fn user_not_found() -> Self {
        Self::bad_request(USER_NOT_FOUND_MESSAGE)
    }
}

/// Token issuance and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token signing failed")]
    SigningFailed,

    #[error("invalid signing key material: {message}")]
    KeyLoad { message: String },

    #[error("key generation failed: {message}")]
    KeyGeneration { message: String },
}

/// Storage-boundary errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("unique constraint violated: {message}")]
    UniqueViolation { message: String },
}

impl RepositoryError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Password hashing boundary errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("password hashing failed: {message}")]
pub struct HasherError {
    pub message: String,
}

impl HasherError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_credentials_is_bad_request_with_shared_message() {
        let err = ServiceError::wrong_credentials();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, WRONG_PHONE_PASSWORD_MESSAGE);
    }

    #[test]
    fn system_wrap_keeps_message_text() {
        let err = ServiceError::system(RepositoryError::database("connection reset"));
        assert_eq!(err.kind, ErrorKind::System);
        assert_eq!(err.message, "database error: connection reset");
    }

    #[test]
    fn phone_already_used_message_includes_phone() {
        assert_eq!(
            phone_already_used_message("+628232482440"),
            "phone number +628232482440 already used."
        );
    }
}
