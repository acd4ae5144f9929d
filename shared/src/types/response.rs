//! Error response body

use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error_msg: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_msg: message.into(),
        }
    }
}
