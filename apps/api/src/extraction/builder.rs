use std::sync::Arc;

use tracing::debug;

use crate::extraction::contact::extract_contact_info;
use crate::extraction::experience::ExperienceEstimator;
use crate::extraction::keywords::ExtractionKeywords;
use crate::extraction::name::NameExtractor;
use crate::extraction::scoring::compute_field_scores;
use crate::extraction::skills::SkillSignalDetector;
use crate::models::candidate::CandidateRecord;
use crate::ner_client::{EntityRecognizer, RecognizerError};

/// Runs every extractor over one document's text and assembles the scored record.
///
/// Holds no per-document state; the recognizer handle is shared read-only, so a
/// single builder can serve concurrent documents.
#[derive(Clone)]
pub struct CandidateRecordBuilder {
    names: NameExtractor,
    experience: ExperienceEstimator,
    skills: SkillSignalDetector,
}

impl CandidateRecordBuilder {
    pub fn new(
        recognizer: Arc<dyn EntityRecognizer>,
        person_labels: Vec<String>,
        keywords: &ExtractionKeywords,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            names: NameExtractor::new(recognizer, person_labels),
            experience: ExperienceEstimator::new(&keywords.experience_phrases)?,
            skills: SkillSignalDetector::new(&keywords.ai_keywords),
        })
    }

    /// Only call with text that was actually obtained; ingestion failures never reach here.
    pub async fn build(&self, text: &str) -> Result<CandidateRecord, RecognizerError> {
        // Independent extractors. Scoring waits for all four.
        let contact = extract_contact_info(text);
        let estimate = self.experience.estimate(text);
        let ai_formation = self.skills.has_ai_formation(text);
        let name = self.names.extract(text).await?;

        let experience_years = estimate.years();
        let scores = compute_field_scores(name.as_deref(), &contact, experience_years, ai_formation);

        debug!(
            "Built record: name={}, email={}, phone={}, experience={:?}, ai_formation={}",
            name.is_some(),
            contact.email.is_some(),
            contact.phone.is_some(),
            estimate,
            ai_formation
        );

        Ok(CandidateRecord {
            name,
            contact,
            experience_years,
            ai_formation,
            scores,
            filename: None,
        })
    }
}
