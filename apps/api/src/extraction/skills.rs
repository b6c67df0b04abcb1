/// Detects AI/ML formation by keyword containment.
#[derive(Debug, Clone)]
pub struct SkillSignalDetector {
    keywords: Vec<String>,
}

impl SkillSignalDetector {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Plain substring check on the lower-cased text, no word boundaries.
    pub fn has_ai_formation(&self, text: &str) -> bool {
        let text_lower = text.to_lowercase();
        self.keywords.iter().any(|k| text_lower.contains(k.as_str()))
    }
}
