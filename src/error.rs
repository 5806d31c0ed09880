use std::path::PathBuf;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures while loading the similarity model artifact.
///
/// Any of these is fatal at startup: the process must not serve requests
/// without a consistent store.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Model artifact not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("I/O error reading model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt model artifact: {0}")]
    Corrupt(String),

    #[error("Inconsistent model artifact: {0}")]
    Inconsistent(String),

    #[error("Non-finite similarity score at row {row}, column {col}")]
    NonFiniteScore { row: usize, col: usize },

    #[error("Model artifact contains no titles")]
    Empty,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
