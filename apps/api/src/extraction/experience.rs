//! Years-of-experience heuristic.
//!
//! Strategies, first success wins:
//! 1. Stated figure: `<integer> <phrase>` for each configured phrase, maximum across matches.
//! 2. Date span: max year − min year over standalone 1900–2099 tokens.
//! 3. Undetermined.
//!
//! Figures are ASCII digits only; other decimal scripts are not read as numbers.

use std::sync::LazyLock;

use regex::Regex;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19[0-9]{2}|20[0-9]{2})\b").expect("valid year regex"));

/// How the experience figure was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceEstimate {
    Stated(u32),
    DateSpan(u32),
    Undetermined,
}

impl ExperienceEstimate {
    /// Wire value. `Undetermined` collapses to 0.0, same as a stated zero.
    pub fn years(&self) -> f64 {
        match self {
            ExperienceEstimate::Stated(n) | ExperienceEstimate::DateSpan(n) => f64::from(*n),
            ExperienceEstimate::Undetermined => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceEstimator {
    /// `None` when no phrases are configured.
    keyword_regex: Option<Regex>,
}

impl ExperienceEstimator {
    pub fn new(phrases: &[String]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();

        let keyword_regex = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)([0-9]+)\s*(?:{})",
                alternatives.join("|")
            ))?)
        };

        Ok(Self { keyword_regex })
    }

    pub fn estimate(&self, text: &str) -> ExperienceEstimate {
        if let Some(years) = self.max_stated_years(text) {
            return ExperienceEstimate::Stated(years);
        }
        if let Some(span) = year_span(text) {
            return ExperienceEstimate::DateSpan(span);
        }
        ExperienceEstimate::Undetermined
    }

    /// A résumé may state experience per skill and overall; the largest figure
    /// is taken as the overall one.
    fn max_stated_years(&self, text: &str) -> Option<u32> {
        let regex = self.keyword_regex.as_ref()?;
        regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().parse::<u32>().ok())
            .max()
    }
}

fn year_span(text: &str) -> Option<u32> {
    let years: Vec<u32> = YEAR_REGEX
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .collect();

    if years.len() < 2 {
        return None;
    }
    let max = years.iter().max()?;
    let min = years.iter().min()?;
    Some(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::keywords::ExtractionKeywords;

    fn estimator() -> ExperienceEstimator {
        ExperienceEstimator::new(&ExtractionKeywords::default().experience_phrases).unwrap()
    }

    #[test]
    fn test_stated_maximum_across_matches() {
        let est = estimator().estimate("Tengo 5 años de experiencia y 8 años de experiencia en ventas");
        assert_eq!(est, ExperienceEstimate::Stated(8));
        assert_eq!(est.years(), 8.0);
    }

    #[test]
    fn test_maximum_is_numeric_not_lexicographic() {
        let est = estimator().estimate("9 years of experience in Python, 12 years of experience overall");
        assert_eq!(est, ExperienceEstimate::Stated(12));
    }

    #[test]
    fn test_phrase_match_is_case_insensitive() {
        let est = estimator().estimate("Más de 10 AÑOS DE EXPERIENCIA liderando equipos");
        assert_eq!(est, ExperienceEstimate::Stated(10));
    }

    #[test]
    fn test_number_may_touch_phrase() {
        let est = estimator().estimate("4professional experience");
        assert_eq!(est, ExperienceEstimate::Stated(4));
    }

    #[test]
    fn test_stated_figure_beats_dates() {
        let est = estimator().estimate("2 years of experience. Acme 2001 - 2020");
        assert_eq!(est, ExperienceEstimate::Stated(2));
    }

    #[test]
    fn test_date_span_fallback() {
        let est = estimator().estimate("Analista, Bancolombia (2015) — Líder técnico (2021)");
        assert_eq!(est, ExperienceEstimate::DateSpan(6));
        assert_eq!(est.years(), 6.0);
    }

    #[test]
    fn test_single_year_is_undetermined() {
        let est = estimator().estimate("Graduado en 2019");
        assert_eq!(est, ExperienceEstimate::Undetermined);
        assert_eq!(est.years(), 0.0);
    }

    #[test]
    fn test_no_signal_is_undetermined() {
        assert_eq!(
            estimator().estimate("Ingeniero de sistemas con ganas de aprender"),
            ExperienceEstimate::Undetermined
        );
    }

    #[test]
    fn test_out_of_range_and_embedded_numbers_are_not_years() {
        // 1899 and 2100 are out of range, 120150 is not a standalone token.
        let est = estimator().estimate("Ref 1899, lote 2100, código 120150, ingreso 2010");
        assert_eq!(est, ExperienceEstimate::Undetermined);
    }

    #[test]
    fn test_repeated_same_year_spans_zero() {
        let est = estimator().estimate("Curso 2020, certificado 2020");
        assert_eq!(est, ExperienceEstimate::DateSpan(0));
        assert_eq!(est.years(), 0.0);
    }

    #[test]
    fn test_custom_phrases_replace_defaults() {
        let est = ExperienceEstimator::new(&["anos na area".to_string()])
            .unwrap()
            .estimate("7 anos na area, 3 years of experience");
        assert_eq!(est, ExperienceEstimate::Stated(7));
    }

    #[test]
    fn test_phrases_are_matched_literally() {
        let est = ExperienceEstimator::new(&["yrs. exp".to_string()])
            .unwrap()
            .estimate("6 yrsX exp, 5 yrs. exp");
        assert_eq!(est, ExperienceEstimate::Stated(5));
    }

    #[test]
    fn test_no_phrases_falls_through_to_dates() {
        let est = ExperienceEstimator::new(&[])
            .unwrap()
            .estimate("5 years of experience, 2012 to 2018");
        assert_eq!(est, ExperienceEstimate::DateSpan(6));
    }

    #[test]
    fn test_non_ascii_digits_are_not_figures() {
        assert_eq!(
            estimator().estimate("Desde ２０１５ hasta ２０２１"),
            ExperienceEstimate::Undetermined
        );
        // The Arabic-Indic digit is not swallowed into the figure.
        let est = estimator().estimate("٥5 años de experiencia, 2010 2020");
        assert_eq!(est, ExperienceEstimate::Stated(5));
    }

    #[test]
    fn test_overflowing_figures_are_ignored() {
        let est = estimator().estimate("99999999999999 years of experience, 3 years of experience");
        assert_eq!(est, ExperienceEstimate::Stated(3));
    }
}
