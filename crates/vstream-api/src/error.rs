//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to HTTP clients.
///
/// The display strings double as the wire-visible error messages, so they
/// stay stable: clients only ever see a status code plus `{"error": <text>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Video not found in the database.")]
    VideoNotFound,

    #[error("Error generating presigned URL: {0}")]
    Presign(String),

    #[error("Error fetching video with byte range: {0}")]
    RangeFetch(String),

    #[error("Error fetching videos: {0}")]
    List(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn presign(detail: impl Into<String>) -> Self {
        Self::Presign(detail.into())
    }

    pub fn range_fetch(detail: impl Into<String>) -> Self {
        Self::RangeFetch(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::VideoNotFound => StatusCode::NOT_FOUND,
            ApiError::RangeFetch(_) => StatusCode::BAD_REQUEST,
            ApiError::Presign(_) | ApiError::List(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
