/// Phrases that anchor a stated experience figure ("8 years of experience").
pub const DEFAULT_EXPERIENCE_PHRASES: &[&str] = &[
    "años de experiencia",
    "years of experience",
    "experiencia profesional",
    "professional experience",
];

/// Bilingual AI/ML formation signals.
pub const DEFAULT_AI_KEYWORDS: &[&str] = &[
    "inteligencia artificial",
    "machine learning",
    "deep learning",
    "aprendizaje profundo",
    "neural networks",
    "redes neuronales",
    "data science",
    "ciencia de datos",
];

/// Keyword lists consumed by the extractors. Locale data, overridable from config.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionKeywords {
    pub experience_phrases: Vec<String>,
    pub ai_keywords: Vec<String>,
}

impl Default for ExtractionKeywords {
    fn default() -> Self {
        Self {
            experience_phrases: to_owned_list(DEFAULT_EXPERIENCE_PHRASES),
            ai_keywords: to_owned_list(DEFAULT_AI_KEYWORDS),
        }
    }
}

impl ExtractionKeywords {
    /// Replaces each list that has an override; a missing or empty override keeps the default.
    pub fn with_overrides(
        experience_phrases: Option<Vec<String>>,
        ai_keywords: Option<Vec<String>>,
    ) -> Self {
        let mut keywords = Self::default();
        if let Some(phrases) = experience_phrases.filter(|p| !p.is_empty()) {
            keywords.experience_phrases = phrases;
        }
        if let Some(ai) = ai_keywords.filter(|k| !k.is_empty()) {
            keywords.ai_keywords = ai;
        }
        keywords
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
