use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::MissingCity;
use crate::domain::weather_provider::UpstreamError;
use crate::infrastructure::cache::CacheError;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced at the HTTP boundary.
///
/// Server-side variants carry a `reason` that is logged when the response is
/// built and never sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    MissingParameter { message: String },

    #[error("upstream unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    #[error("internal failure: {reason}")]
    Internal { reason: String },

    #[error("route not found")]
    NotFound,
}

impl AppError {
    pub fn missing_parameter(message: impl Into<String>) -> Self {
        Self::MissingParameter {
            message: message.into(),
        }
    }
    pub fn upstream_unavailable(reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            reason: reason.into(),
        }
    }
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<MissingCity> for AppError {
    fn from(e: MissingCity) -> Self {
        AppError::missing_parameter(e.to_string())
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::upstream_unavailable(e.to_string())
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::internal(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal(format!("serialization error: {}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::MissingParameter { message } => message,
            AppError::UpstreamUnavailable { reason } => {
                tracing::warn!("Upstream unavailable: {}", reason);
                INTERNAL_MESSAGE.to_string()
            }
            AppError::Internal { reason } => {
                tracing::error!("Internal failure: {}", reason);
                INTERNAL_MESSAGE.to_string()
            }
            AppError::NotFound => "Route not found".to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
