//! Employment status classification.

use super::patterns::{PatternSet, EMPLOYMENT_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};
use crate::models::EmploymentStatus;

// Same order as EMPLOYMENT_PATTERNS.
const STATUSES: [EmploymentStatus; 7] = [
    EmploymentStatus::SelfEmployed,
    EmploymentStatus::Unemployed,
    EmploymentStatus::BusinessOwner,
    EmploymentStatus::Retired,
    EmploymentStatus::Student,
    EmploymentStatus::Farmer,
    EmploymentStatus::Employed,
];

/// Employment status extractor.
#[derive(Debug, Clone)]
pub struct EmploymentExtractor {
    patterns: PatternSet,
}

impl EmploymentExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("employment_status", EMPLOYMENT_PATTERNS)?,
        })
    }
}

impl FieldExtractor for EmploymentExtractor {
    type Output = ExtractionMatch<EmploymentStatus>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |rule, _| STATUSES.get(rule).copied())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |rule, _| STATUSES.get(rule).copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str) -> Option<EmploymentStatus> {
        EmploymentExtractor::new().unwrap().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_every_pattern_has_a_status() {
        assert_eq!(STATUSES.len(), EMPLOYMENT_PATTERNS.len());
    }

    #[test]
    fn test_statuses() {
        assert_eq!(status("I am self-employed"), Some(EmploymentStatus::SelfEmployed));
        assert_eq!(status("Self employed tailor"), Some(EmploymentStatus::SelfEmployed));
        assert_eq!(status("currently unemployed"), Some(EmploymentStatus::Unemployed));
        assert_eq!(status("Retired nurse"), Some(EmploymentStatus::Retired));
        assert_eq!(status("Employed by NMB Bank"), Some(EmploymentStatus::Employed));
    }

    #[test]
    fn test_vocabulary_order_wins() {
        // "employed" appears first in the text, but "business owner" is listed earlier.
        assert_eq!(
            status("Previously employed, now a business owner."),
            Some(EmploymentStatus::BusinessOwner)
        );
    }

    #[test]
    fn test_no_status() {
        assert_eq!(status("Employment: see attached"), None);
        assert!(EmploymentExtractor::new().unwrap().extract_all("").is_empty());
    }
}
