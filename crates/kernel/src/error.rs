//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Navigation registry configuration errors.
///
/// These only occur while a registry is being built. A process must not
/// start serving with a registry that failed validation.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation entry '{label}' has an empty path")]
    EmptyPath { label: String },

    #[error("navigation entry '{path}' lists no allowed roles")]
    NoAllowedRoles { path: String },

    #[error("navigation entry '{path}' references unknown role '{role}'")]
    UnknownRole { path: String, role: String },

    #[error("invalid navigation YAML")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid navigation JSON")]
    Json(#[from] serde_json::Error),
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
        };

        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
