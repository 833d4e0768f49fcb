use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every authentication failure.
///
/// Missing and mismatched keys share this text so the response does not
/// reveal which of the two happened.
pub const UNAUTHORIZED_DETAIL: &str = "Invalid or missing API key";

/// Application-wide error types with appropriate HTTP status codes.
///
/// Client errors (everything but `Internal` and `ConfigError`) carry messages
/// that are safe to show verbatim. Server errors are logged in full and
/// rendered with a generic message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("{}", UNAUTHORIZED_DETAIL)]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Shorthand for a 400 with a user-facing message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client in the `detail` field.
    fn detail(&self) -> &str {
        match self {
            AppError::BadRequest(msg) => msg,
            AppError::Unauthorized => UNAUTHORIZED_DETAIL,
            AppError::NotFound => "Not Found",
            AppError::MethodNotAllowed => "Method Not Allowed",
            AppError::PayloadTooLarge => "Request body too large",
            // Never expose internal details to clients
            AppError::Internal(_) | AppError::ConfigError(_) => "Internal server error",
        }
    }
}

/// Error response body for API endpoints.
///
/// The envelope middleware adds `request_id` and `duration_ms` afterwards.
#[derive(Serialize)]
struct ErrorResponse<'a> {
    detail: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = axum::Json(ErrorResponse {
            detail: self.detail(),
        });

        if matches!(self, AppError::Unauthorized) {
            (status, [(WWW_AUTHENTICATE, "API-Key")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Raw body extraction failures, most often the configured size limit.
impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            tracing::debug!(error = %rejection.body_text(), "Failed to read request body");
            AppError::bad_request("Failed to read request body")
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
