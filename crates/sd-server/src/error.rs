//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sd_core::SdError;
use serde_json::json;

/// API error with status code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, code: "not_found", message: msg.into() }
    }
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, code: "bad_request", message: msg.into() }
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, code: "conflict", message: msg.into() }
    }
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::SERVICE_UNAVAILABLE, code: "dictionary_unavailable", message: msg.into() }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "internal_error", message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<SdError> for ApiError {
    fn from(err: SdError) -> Self {
        match &err {
            SdError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            SdError::AlreadyExists { .. } => ApiError::conflict(err.to_string()),
            SdError::SessionNotFound { .. } => ApiError::not_found(err.to_string()),
            SdError::DictionaryUnavailable
            | SdError::SourceNotFound { .. }
            | SdError::MalformedSource(_)
            | SdError::BuildFailed(_) => ApiError::unavailable(err.to_string()),
            SdError::PersistFailed(_) => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "persist_failed",
                message: err.to_string(),
            },
            _ => ApiError::internal(err.to_string()),
        }
    }
}
