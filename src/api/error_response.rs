//! HTTP error response handling for the API
//!
//! Converts domain errors to HTTP responses. The wire format is small and
//! fixed: validation failures are `400 {"detail": "<message>"}`, everything
//! else is `500 {"error": "<message>"}`. Always structured JSON, never a
//! raw panic or backtrace surface.

use crate::error::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Implement IntoResponse for Error to automatically convert errors to HTTP responses
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self {
            Error::Validation(message) => json!({ "detail": message }),
            other => json!({ "error": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}
