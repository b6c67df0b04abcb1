use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::ingest::{run_documents, run_folder, write_results, BatchReport, PendingDocument};
use crate::models::candidate::CandidateRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// POST /api/v1/candidates/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<CandidateRecord>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let record = state.builder.build(&req.text).await?;
    let record = match req.filename {
        Some(filename) => record.with_filename(filename),
        None => record,
    };
    Ok(Json(record))
}

/// POST /api/v1/candidates/upload
/// Every file field is one document; undecodable files land in `skipped`.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchReport>, AppError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(String::from) else {
            let name = field.name().unwrap_or("<unnamed>").to_string();
            return Err(AppError::Validation(format!(
                "Multipart field '{name}' is not a file"
            )));
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{filename}': {e}")))?;
        documents.push(PendingDocument::Upload { filename, bytes });
    }

    if documents.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let report = run_documents(
        Arc::clone(&state.builder),
        documents,
        state.config.batch_options(),
    )
    .await;
    Ok(Json(report))
}

/// POST /api/v1/candidates/batch
/// Scans the configured folder and persists the records as a JSON array.
pub async fn handle_batch(State(state): State<AppState>) -> Result<Json<BatchReport>, AppError> {
    let config = &state.config;
    info!("Batch scan of {}", config.cv_folder.display());

    let report = run_folder(
        Arc::clone(&state.builder),
        &config.cv_folder,
        config.batch_options(),
    )
    .await?;

    let path = config.results_path.clone();
    let records = report.records.clone();
    tokio::task::spawn_blocking(move || write_results(&path, &records))
        .await
        .context("results writer task failed")??;
    Ok(Json(report))
}
