//! Contact details: mobile phone numbers and email addresses.

use std::collections::BTreeSet;

use super::patterns::{PatternSet, EMAIL_PATTERNS, PHONE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};

/// Tanzanian mobile number extractor.
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    patterns: PatternSet,
}

impl PhoneExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("phone", PHONE_PATTERNS)?,
        })
    }

    /// Every distinct number in the text, in national `0XXXXXXXXX` form.
    pub fn extract_set(&self, text: &str) -> BTreeSet<String> {
        self.extract_all(text).into_iter().map(|m| m.value).collect()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |_, caps| Some(normalize_phone(&caps[0])))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |_, caps| Some(normalize_phone(&caps[0]))),
        )
    }
}

/// Drop separators and fold the `+255`/`255` country code into a leading `0`.
fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.strip_prefix("255") {
        Some(local) if local.len() == 9 => format!("0{}", local),
        _ => digits,
    }
}

/// Email address extractor.
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    patterns: PatternSet,
}

impl EmailExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("email", EMAIL_PATTERNS)?,
        })
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |_, caps| Some(clean_email(&caps[0])))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |_, caps| Some(clean_email(&caps[0]))),
        )
    }
}

// A sentence-final dot is captured by the domain part.
fn clean_email(raw: &str) -> String {
    raw.trim_end_matches('.').to_lowercase()
}
