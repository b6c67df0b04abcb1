use crate::models::candidate::{ContactInfo, FieldScores};

// Fixed trust per extractor, not measured accuracy. Email shape is the most
// reliable signal; the phone pattern is noisier.
pub const NAME_SCORE: f64 = 0.8;
pub const EMAIL_SCORE: f64 = 0.9;
pub const PHONE_SCORE: f64 = 0.7;
pub const EXPERIENCE_SCORE: f64 = 0.6;
pub const AI_FORMATION_SCORE: f64 = 0.7;

/// Presence-based confidence lookup. Pure: same inputs, same scores.
pub fn compute_field_scores(
    name: Option<&str>,
    contact: &ContactInfo,
    experience_years: f64,
    ai_formation: bool,
) -> FieldScores {
    FieldScores {
        name: presence(name.is_some(), NAME_SCORE),
        email: presence(contact.email.is_some(), EMAIL_SCORE),
        phone: presence(contact.phone.is_some(), PHONE_SCORE),
        experience_years: presence(experience_years > 0.0, EXPERIENCE_SCORE),
        ai_formation: presence(ai_formation, AI_FORMATION_SCORE),
    }
}

fn presence(present: bool, score: f64) -> f64 {
    if present {
        score
    } else {
        0.0
    }
}
