//! Pattern-based email and phone extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::candidate::ContactInfo;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

// Optional +57 prefix, then 3-3-4 digits with optional `-`/`.` separators.
// Group 1 is the national number without the country code.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?57\s?)?(\d{3}[-.]?\d{3}[-.]?\d{4})\b").expect("valid phone regex")
});

/// Extracts the first email and the first phone number in document order.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        email: first_email(text),
        phone: first_phone(text),
    }
}

/// `find` returns the leftmost match, i.e. the first occurrence in the text.
fn first_email(text: &str) -> Option<String> {
    EMAIL_REGEX.find(text).map(|m| m.as_str().to_string())
}

fn first_phone(text: &str) -> Option<String> {
    PHONE_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
