use serde::{Deserialize, Serialize};

/// Contact details pulled from the document text. Absent fields stay `None`,
/// never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Per-field confidence. One field per extracted value so the serialized
/// mapping always carries exactly these five keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldScores {
    pub name: f64,
    pub email: f64,
    pub phone: f64,
    pub experience_years: f64,
    pub ai_formation: f64,
}

/// Structured output for one résumé document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub contact: ContactInfo,
    /// 0.0 means "not detected" as well as "no experience".
    pub experience_years: f64,
    pub ai_formation: bool,
    pub scores: FieldScores,
    /// Attached by the caller after extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl CandidateRecord {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}
