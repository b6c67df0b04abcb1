use std::sync::Arc;

use crate::config::Config;
use crate::extraction::CandidateRecordBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup around the shared recognizer handle.
    pub builder: Arc<CandidateRecordBuilder>,
}
