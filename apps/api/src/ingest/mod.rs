// Document ingestion and batch orchestration around the extraction core.
// Decoding is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod batch;
pub mod document;
pub mod results;

pub use batch::{run_documents, run_folder, BatchOptions, BatchReport, PendingDocument};
pub use results::write_results;
