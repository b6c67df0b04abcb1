use std::sync::Arc;

use tracing::debug;

use crate::ner_client::{Entity, EntityRecognizer, RecognizerError};

/// Labels the recognizer uses for person spans (spaCy `PER`/`PERSON`, BERT `PER`).
pub const DEFAULT_PERSON_LABELS: &[&str] = &["PER", "PERSON"];

/// Picks the candidate's name from the recognizer's person entities.
#[derive(Clone)]
pub struct NameExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    person_labels: Vec<String>,
}

impl NameExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, person_labels: Vec<String>) -> Self {
        let person_labels = if person_labels.is_empty() {
            DEFAULT_PERSON_LABELS.iter().map(|s| s.to_string()).collect()
        } else {
            person_labels
        };
        Self {
            recognizer,
            person_labels,
        }
    }

    /// Returns the first person entity in document order, or `None`.
    pub async fn extract(&self, text: &str) -> Result<Option<String>, RecognizerError> {
        let entities = self.recognizer.recognize(text).await?;
        let name = first_person(&entities, &self.person_labels);
        debug!(
            "Name extraction: {} entities, person found: {}",
            entities.len(),
            name.is_some()
        );
        Ok(name)
    }
}

/// Résumés put the candidate's own name near the top, so the earliest person
/// span wins. Offsets decide order when present; otherwise response order does.
fn first_person(entities: &[Entity], person_labels: &[String]) -> Option<String> {
    entities
        .iter()
        .enumerate()
        .filter(|(_, e)| person_labels.iter().any(|l| l.eq_ignore_ascii_case(&e.label)))
        .filter(|(_, e)| !e.text.trim().is_empty())
        .min_by_key(|(idx, e)| (e.start.unwrap_or(usize::MAX), *idx))
        .map(|(_, e)| e.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedRecognizer(Vec<Entity>);

    #[async_trait]
    impl EntityRecognizer for FixedRecognizer {
        async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, RecognizerError> {
            Ok(self.0.clone())
        }

        async fn ensure_available(&self) -> Result<(), RecognizerError> {
            Ok(())
        }
    }

    fn labels() -> Vec<String> {
        DEFAULT_PERSON_LABELS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_person_in_response_order() {
        let entities = vec![
            Entity::new("Universidad Nacional", "ORG"),
            Entity::new("Laura Martínez", "PER"),
            Entity::new("Pedro Ruiz", "PER"),
        ];
        assert_eq!(
            first_person(&entities, &labels()).as_deref(),
            Some("Laura Martínez")
        );
    }

    #[test]
    fn test_offsets_override_response_order() {
        let entities = vec![
            Entity::new("Pedro Ruiz", "PER").at(300),
            Entity::new("Laura Martínez", "PER").at(0),
        ];
        assert_eq!(
            first_person(&entities, &labels()).as_deref(),
            Some("Laura Martínez")
        );
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let entities = vec![Entity::new("John Smith", "person")];
        assert_eq!(
            first_person(&entities, &labels()).as_deref(),
            Some("John Smith")
        );
    }

    #[test]
    fn test_blank_person_spans_are_skipped() {
        let entities = vec![Entity::new("  ", "PER"), Entity::new(" Ana Gómez\n", "PER")];
        assert_eq!(first_person(&entities, &labels()).as_deref(), Some("Ana Gómez"));
    }

    #[test]
    fn test_no_person_is_none() {
        let entities = vec![Entity::new("Bogotá", "LOC"), Entity::new("Ecopetrol", "ORG")];
        assert_eq!(first_person(&entities, &labels()), None);
    }

    #[tokio::test]
    async fn test_extract_uses_injected_recognizer() {
        let recognizer = Arc::new(FixedRecognizer(vec![
            Entity::new("Medellín", "LOC"),
            Entity::new("Camilo Torres", "PER"),
        ]));
        let extractor = NameExtractor::new(recognizer, vec![]);
        let name = extractor.extract("irrelevant").await.unwrap();
        assert_eq!(name.as_deref(), Some("Camilo Torres"));
    }

    #[tokio::test]
    async fn test_custom_labels_replace_defaults() {
        let recognizer = Arc::new(FixedRecognizer(vec![Entity::new("Camilo Torres", "PER")]));
        let extractor = NameExtractor::new(recognizer, vec!["B-PER".to_string()]);
        assert_eq!(extractor.extract("irrelevant").await.unwrap(), None);
    }
}
