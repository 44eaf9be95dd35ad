//! Age extraction, directly stated or derived from a birth year.

use chrono::Datelike;

use super::patterns::{group, PatternSet, AGE_PATTERNS, BIRTH_YEAR_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};

/// Ages must be strictly below this bound (and above zero).
pub const MAX_AGE: u32 = 120;

/// Age field extractor.
#[derive(Debug, Clone)]
pub struct AgeExtractor {
    direct: PatternSet,
    birth_year: PatternSet,
    current_year: i32,
}

impl AgeExtractor {
    /// Create an extractor that derives ages against the local calendar year.
    pub fn new() -> Result<Self> {
        Ok(Self {
            direct: PatternSet::compile("age", AGE_PATTERNS)?,
            birth_year: PatternSet::compile("birth_year", BIRTH_YEAR_PATTERNS)?,
            current_year: chrono::Local::now().year(),
        })
    }

    /// Use a fixed year when deriving age from a birth year.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    fn derive(&self, birth_year: &str) -> Option<u32> {
        let born: i32 = birth_year.parse().ok()?;
        let age = u32::try_from(self.current_year.checked_sub(born)?).ok()?;
        plausible(age)
    }
}

impl FieldExtractor for AgeExtractor {
    type Output = ExtractionMatch<u32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.direct
            .first_accepted(text, |_, caps| plausible(group(caps, 1)?.parse().ok()?))
            .or_else(|| {
                self.birth_year
                    .first_accepted(text, |_, caps| self.derive(group(caps, 1)?))
                    .map(|m| ExtractionMatch {
                        rule: m.rule + self.direct.len(),
                        ..m
                    })
            })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = self
            .direct
            .all_accepted(text, |_, caps| plausible(group(caps, 1)?.parse().ok()?));
        let offset = self.direct.len();
        results.extend(
            self.birth_year
                .all_accepted(text, |_, caps| self.derive(group(caps, 1)?))
                .into_iter()
                .map(|m| ExtractionMatch {
                    rule: m.rule + offset,
                    ..m
                }),
        );
        results
    }
}

fn plausible(age: u32) -> Option<u32> {
    (age > 0 && age < MAX_AGE).then_some(age)
}
