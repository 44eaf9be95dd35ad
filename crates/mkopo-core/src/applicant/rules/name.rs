//! Applicant name extraction.

use regex::Captures;

use super::patterns::{PatternSet, NAME_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};

// Capitalized words that open a sentence or title but never a person's name.
const NOT_A_NAME: &[&str] = &[
    "The", "This", "That", "Applicant", "Client", "Customer", "Borrower", "Our", "His", "Her",
    "Loan", "Application", "Form", "Personal", "Details", "Dear",
];

// Rule for a bare name on its own line; only honored near the top.
const HEADING_RULE: usize = 3;
const HEADING_LINES: usize = 5;

/// Applicant name extractor.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    patterns: PatternSet,
}

impl NameExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("name", NAME_PATTERNS)?,
        })
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |rule, caps| accept_name(text, rule, caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |rule, caps| accept_name(text, rule, caps)),
        )
    }
}

fn accept_name(text: &str, rule: usize, caps: &Captures) -> Option<String> {
    let candidate = caps.get(1)?;
    if rule == HEADING_RULE && text[..candidate.start()].matches('\n').count() >= HEADING_LINES {
        return None;
    }

    let words: Vec<&str> = candidate.as_str().split_whitespace().collect();
    if words.iter().any(|w| NOT_A_NAME.contains(w)) {
        return None;
    }
    Some(words.join(" "))
}
