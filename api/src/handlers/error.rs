//! Mapping from service errors to HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};
use us_core::errors::{ErrorKind, ServiceError};
use us_shared::types::ErrorResponse;

/// HTTP status for each error classification.
pub fn error_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::System => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a service error as a JSON body with the matching status.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    HttpResponse::build(error_status(err.kind)).json(ErrorResponse::new(err.message.clone()))
}

/// A 400 with the standard error body, for handler-level validation.
pub fn bad_request_response(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds_to_statuses() {
        assert_eq!(error_status(ErrorKind::BadRequest), StatusCode::BAD_REQUEST);
        assert_eq!(error_status(ErrorKind::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            error_status(ErrorKind::System),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn renders_message_in_body() {
        let err = ServiceError::bad_request("password or phone number is incorrect.");
        let resp = service_error_response(&err);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
