//! API error type and JSON error body.
//!
//! Every failure is returned as `{"error": "..."}`. Internal detail is
//! logged where the error happens and never written to the body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use brightline_chat::ChatError;
use brightline_mail::IntakeError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid input.
    BadRequest(String),
    /// 413 Payload Too Large - body over the configured limit.
    PayloadTooLarge(String),
    /// 429 Too Many Requests - upstream provider or local limiter.
    TooManyRequests(String),
    /// 500 Internal Server Error.
    Internal(String),
    /// 503 Service Unavailable - provider credentials rejected.
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::TooManyRequests(msg)
            | ApiError::Internal(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        let message = err.user_message();
        match err {
            ChatError::InvalidRequest(_) => ApiError::BadRequest(message),
            ChatError::ProviderAuth => ApiError::ServiceUnavailable(message),
            ChatError::ProviderRateLimited => ApiError::TooManyRequests(message),
            ChatError::Provider(_) => ApiError::Internal(message),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(msg) => ApiError::BadRequest(msg),
            IntakeError::Dispatch(_) => ApiError::Internal(
                "Failed to send email. Please try again later.".to_string(),
            ),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge("Request body too large".to_string());
        }
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest("Expected a JSON request body".to_string())
            }
            _ => ApiError::BadRequest("Invalid request body".to_string()),
        }
    }
}
