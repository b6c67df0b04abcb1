//! Batch driver: documents in, `BatchReport` out.
//!
//! Each document is decoded on the blocking pool, run through the builder under
//! a timeout, and tagged with its filename. A document that fails at any step is
//! logged and listed in `skipped`; it never aborts the rest of the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::CandidateRecordBuilder;
use crate::ingest::document::{decode_document, display_name, list_documents, read_document, IngestError};
use crate::models::candidate::CandidateRecord;

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub concurrency: usize,
    pub document_timeout: Duration,
}

/// A document waiting to be converted to text.
#[derive(Debug, Clone)]
pub enum PendingDocument {
    File(PathBuf),
    Upload { filename: String, bytes: Bytes },
}

impl PendingDocument {
    pub fn filename(&self) -> String {
        match self {
            PendingDocument::File(path) => display_name(path),
            PendingDocument::Upload { filename, .. } => filename.clone(),
        }
    }

    fn load(&self) -> Result<String, IngestError> {
        match self {
            PendingDocument::File(path) => read_document(path),
            PendingDocument::Upload { filename, bytes } => decode_document(filename, bytes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub documents_seen: usize,
    pub records: Vec<CandidateRecord>,
    pub skipped: Vec<SkippedDocument>,
}

/// Runs every supported document in `folder`. Only an unreadable folder is an error.
pub async fn run_folder(
    builder: Arc<CandidateRecordBuilder>,
    folder: &Path,
    options: BatchOptions,
) -> Result<BatchReport, IngestError> {
    let documents = list_documents(folder)?
        .into_iter()
        .map(PendingDocument::File)
        .collect::<Vec<_>>();
    info!("Found {} documents in {}", documents.len(), folder.display());
    Ok(run_documents(builder, documents, options).await)
}

/// Records come back in input order regardless of completion order.
pub async fn run_documents(
    builder: Arc<CandidateRecordBuilder>,
    documents: Vec<PendingDocument>,
    options: BatchOptions,
) -> BatchReport {
    let batch_id = Uuid::new_v4();
    let started_at = Utc::now();
    let documents_seen = documents.len();
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));

    info!("Batch {batch_id}: processing {documents_seen} documents");

    let handles: Vec<_> = documents
        .into_iter()
        .map(|doc| {
            let filename = doc.filename();
            let builder = Arc::clone(&builder);
            let semaphore = Arc::clone(&semaphore);
            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                process_document(&builder, doc, options.document_timeout).await
            });
            (filename, handle)
        })
        .collect();

    // Each task owns its result; merging happens here, in input order.
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (filename, handle) in handles {
        let outcome = handle
            .await
            .unwrap_or_else(|e| Err(format!("extraction task failed: {e}")));
        match outcome {
            Ok(record) => records.push(record.with_filename(filename)),
            Err(reason) => {
                warn!("Skipping '{}': {}", filename, reason);
                skipped.push(SkippedDocument { filename, reason });
            }
        }
    }

    info!(
        "Batch {batch_id}: {} records, {} skipped",
        records.len(),
        skipped.len()
    );

    BatchReport {
        batch_id,
        started_at,
        finished_at: Utc::now(),
        documents_seen,
        records,
        skipped,
    }
}

/// The timeout covers decoding and recognition. A decode still running on the
/// blocking pool when it fires is detached, not cancelled.
async fn process_document(
    builder: &CandidateRecordBuilder,
    doc: PendingDocument,
    timeout: Duration,
) -> Result<CandidateRecord, String> {
    match tokio::time::timeout(timeout, extract_record(builder, doc)).await {
        Ok(result) => result,
        Err(_) => Err(format!("timed out after {}s", timeout.as_secs())),
    }
}

async fn extract_record(
    builder: &CandidateRecordBuilder,
    doc: PendingDocument,
) -> Result<CandidateRecord, String> {
    // PDF/DOCX decoding is CPU-bound.
    let text = tokio::task::spawn_blocking(move || doc.load())
        .await
        .map_err(|e| format!("decoding task failed: {e}"))?
        .map_err(|e| e.to_string())?;

    builder
        .build(&text)
        .await
        .map_err(|e| format!("entity recognition failed: {e}"))
}
