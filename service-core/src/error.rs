use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy shared by the persona services.
///
/// Every request ends in exactly one of these; there are no partial
/// results. The client always receives a `{ success: false, error }`
/// envelope with the mapped status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    /// Network failure, non-success status, or an error payload from
    /// the model endpoint. Carries the upstream message verbatim.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    /// The model's completion could not be reduced to valid,
    /// schema-conforming JSON. The inner description is for logs only;
    /// clients get a generic message.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            success: bool,
            error: String,
        }

        let (status, error_message) = match self {
            AppError::ValidationError(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::UpstreamFailure(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::MalformedResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse model response".to_string(),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::ConfigError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: error_message,
            }),
        )
            .into_response()
    }
}
