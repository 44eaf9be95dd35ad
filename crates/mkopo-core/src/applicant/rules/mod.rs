//! Rule-based field extractors for loan applicant documents.

pub mod age;
pub mod amounts;
pub mod contact;
pub mod employment;
pub mod job;
pub mod name;
pub mod national_id;
pub mod patterns;
pub mod purpose;

pub use age::{AgeExtractor, MAX_AGE};
pub use amounts::{parse_amount, AmountExtractor, AmountField};
pub use contact::{EmailExtractor, PhoneExtractor};
pub use employment::EmploymentExtractor;
pub use job::{JobExtractor, OccupationExtractor, WorkplaceExtractor};
pub use name::NameExtractor;
pub use national_id::{normalize_national_id, NationalIdExtractor, NATIONAL_ID_LENGTHS};
pub use patterns::PatternSet;
pub use purpose::LoanPurposeExtractor;

use regex::Captures;

use crate::error::ExtractionError;

/// Result type for building extractors.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all accepted occurrences of the field, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An accepted value together with the rule and text that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the pattern that produced the value.
    pub rule: usize,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Build from a regex match, recording its span.
    pub fn from_captures(value: T, rule: usize, caps: &Captures) -> Self {
        match caps.get(0) {
            Some(m) => Self::new(value, rule, m.as_str()).with_position(m.start(), m.end()),
            None => Self::new(value, rule, ""),
        }
    }
}

/// Keep the first occurrence of every value.
pub(crate) fn dedup_by_value<T: PartialEq>(matches: Vec<ExtractionMatch<T>>) -> Vec<ExtractionMatch<T>> {
    let mut unique: Vec<ExtractionMatch<T>> = Vec::with_capacity(matches.len());
    for m in matches {
        if !unique.iter().any(|u| u.value == m.value) {
            unique.push(m);
        }
    }
    unique
}
