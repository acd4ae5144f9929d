//! Error taxonomy for the user service core
//!
//! Every internal failure is wrapped once at its origin into one of the
//! types defined here and passed up unchanged. The presentation layer maps
//! `ErrorKind` to an HTTP status; nothing below it retries or swallows.

mod types;

pub use types::{
    phone_already_used_message, ErrorKind, HasherError, RepositoryError, ServiceError,
    TokenError, USER_NOT_FOUND_MESSAGE, WRONG_PHONE_PASSWORD_MESSAGE,
};
