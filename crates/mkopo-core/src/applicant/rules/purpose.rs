//! Loan purpose classification.

use super::patterns::{group, PatternSet, LOAN_PURPOSE_LINE, LOAN_PURPOSE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};
use crate::models::LoanPurpose;

// Same order as LOAN_PURPOSE_PATTERNS.
const PURPOSES: [LoanPurpose; 6] = [
    LoanPurpose::Business,
    LoanPurpose::SchoolFees,
    LoanPurpose::Health,
    LoanPurpose::Agriculture,
    LoanPurpose::HomeImprovement,
    LoanPurpose::Wedding,
];

/// Loan purpose extractor.
///
/// An explicit purpose statement ("Purpose: ...", "the loan is for ...") is
/// classified first; otherwise the whole text is searched for the purpose
/// vocabulary.
#[derive(Debug, Clone)]
pub struct LoanPurposeExtractor {
    statement: PatternSet,
    vocabulary: PatternSet,
}

impl LoanPurposeExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            statement: PatternSet::compile("loan_purpose_line", LOAN_PURPOSE_LINE)?,
            vocabulary: PatternSet::compile("loan_purpose", LOAN_PURPOSE_PATTERNS)?,
        })
    }

    /// First vocabulary entry found in `text`.
    pub fn classify(&self, text: &str) -> Option<LoanPurpose> {
        self.vocabulary
            .first_accepted(text, |rule, _| PURPOSES.get(rule).copied())
            .map(|m| m.value)
    }
}

impl FieldExtractor for LoanPurposeExtractor {
    type Output = ExtractionMatch<LoanPurpose>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.statement
            .first_accepted(text, |_, caps| self.classify(group(caps, 1)?))
            .or_else(|| {
                self.vocabulary
                    .first_accepted(text, |rule, _| PURPOSES.get(rule).copied())
            })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = self
            .statement
            .all_accepted(text, |_, caps| self.classify(group(caps, 1)?));
        results.extend(
            self.vocabulary
                .all_accepted(text, |rule, _| PURPOSES.get(rule).copied()),
        );
        super::dedup_by_value(results)
    }
}
