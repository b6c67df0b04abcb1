use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::extraction::keywords::parse_keyword_list;
use crate::extraction::name::DEFAULT_PERSON_LABELS;
use crate::extraction::ExtractionKeywords;
use crate::ingest::BatchOptions;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub ner_service_url: String,
    pub ner_model: String,
    pub person_labels: Vec<String>,
    pub keywords: ExtractionKeywords,
    pub cv_folder: PathBuf,
    pub results_path: PathBuf,
    pub batch_concurrency: usize,
    pub document_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let list = |key: &str| lookup(key).map(|raw| parse_keyword_list(&raw));

        Ok(Config {
            ner_service_url: lookup("NER_SERVICE_URL").with_context(|| {
                "Required environment variable 'NER_SERVICE_URL' is not set".to_string()
            })?,
            ner_model: var_or("NER_MODEL", "es_core_news_sm"),
            person_labels: list("NER_PERSON_LABELS")
                .filter(|labels| !labels.is_empty())
                .unwrap_or_else(|| DEFAULT_PERSON_LABELS.iter().map(|s| s.to_string()).collect()),
            keywords: ExtractionKeywords::with_overrides(
                list("EXPERIENCE_PHRASES"),
                list("AI_SKILL_KEYWORDS"),
            ),
            cv_folder: PathBuf::from(var_or("CV_FOLDER", "./CVs")),
            results_path: PathBuf::from(var_or("RESULTS_PATH", "cv_extraction_results.json")),
            batch_concurrency: var_or("BATCH_CONCURRENCY", "4")
                .parse::<usize>()
                .context("BATCH_CONCURRENCY must be a positive integer")?
                .max(1),
            document_timeout_secs: var_or("DOCUMENT_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("DOCUMENT_TIMEOUT_SECS must be a number of seconds")?,
            port: var_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            concurrency: self.batch_concurrency,
            document_timeout: Duration::from_secs(self.document_timeout_secs),
        }
    }
}
