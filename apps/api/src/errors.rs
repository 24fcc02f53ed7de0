use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::compose::ComposeError;
use crate::render::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Compose(ComposeError::MissingRecord) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resume not found".to_string(),
            ),
            AppError::Export(e @ ExportError::ConversionFailed { .. }) => {
                tracing::error!("PDF export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_CONVERSION_FAILED",
                    "Error generating PDF".to_string(),
                )
            }
            AppError::Export(e @ ExportError::Timeout(_)) => {
                tracing::error!("PDF export error: {e}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "PDF_CONVERSION_TIMEOUT",
                    "PDF generation took too long, please retry".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
