//! National identification number (NIDA) extraction.

use super::patterns::{group, PatternSet, NATIONAL_ID_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};

/// Accepted national ID lengths, in digits, after separator removal.
pub const NATIONAL_ID_LENGTHS: [usize; 2] = [16, 17];

/// National ID field extractor.
#[derive(Debug, Clone)]
pub struct NationalIdExtractor {
    patterns: PatternSet,
}

impl NationalIdExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("national_id", NATIONAL_ID_PATTERNS)?,
        })
    }
}

impl FieldExtractor for NationalIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |_, caps| normalize_national_id(group(caps, 1)?))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |_, caps| normalize_national_id(group(caps, 1)?)),
        )
    }
}

/// Strip separators and check the digit count.
///
/// Returns `None` unless the result is 16 or 17 digits long.
pub fn normalize_national_id(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    NATIONAL_ID_LENGTHS
        .contains(&digits.len())
        .then_some(digits)
}
