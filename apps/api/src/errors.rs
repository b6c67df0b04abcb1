use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::document::IngestError;
use crate::ner_client::RecognizerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Entity recognition error: {0}")]
    Recognizer(#[from] RecognizerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Ingest(IngestError::Io { path, .. }) => {
                tracing::error!("Ingestion I/O error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INGEST_ERROR",
                    format!("Could not read documents from '{path}'"),
                )
            }
            AppError::Ingest(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_DOCUMENT",
                e.to_string(),
            ),
            AppError::Recognizer(e) => {
                tracing::error!("Entity recognition error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "RECOGNIZER_ERROR",
                    "The entity recognition service failed".to_string(),
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
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
