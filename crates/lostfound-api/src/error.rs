use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use lostfound_types::api::ErrorResponse;
use tracing::error;

use crate::validation::ValidationError;

/// Every failure a route can return. Rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Registration number already exists")]
    DuplicateRegistration,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Malformed request body")]
    MalformedBody,
    #[error("Unsupported content type")]
    UnsupportedContentType,
    /// Storage or hashing failure. The detail is logged, only the message is sent.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub(crate) fn internal(route: &str, message: &'static str, err: anyhow::Error) -> Self {
        error!("Database error in {}: {:#}", route, err);
        ApiError::Internal(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::DuplicateRegistration => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::UnsupportedContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
