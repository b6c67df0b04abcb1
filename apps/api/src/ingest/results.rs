use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

use crate::models::candidate::CandidateRecord;

/// Writes the records as a pretty-printed JSON array.
///
/// The content goes to a temporary file next to `path` and is renamed into
/// place, so readers never see a half-written file.
pub fn write_results(path: &Path, records: &[CandidateRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize records")?;

    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file in {}", parent_dir.display()))?;
    temp_file
        .write_all(json.as_bytes())
        .with_context(|| format!("Failed to write results for {}", path.display()))?;
    temp_file
        .flush()
        .with_context(|| format!("Failed to flush results for {}", path.display()))?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist results to {}", path.display()))?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
