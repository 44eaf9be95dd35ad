//! Occupation and workplace extraction.

use super::patterns::{group, PatternSet, OCCUPATIONS, WORKPLACE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};
use crate::models::JobInfo;

/// Occupation extractor over a closed vocabulary.
#[derive(Debug, Clone)]
pub struct OccupationExtractor {
    vocabulary: PatternSet,
}

impl OccupationExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            vocabulary: PatternSet::vocabulary("occupation", OCCUPATIONS)?,
        })
    }
}

impl FieldExtractor for OccupationExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.vocabulary
            .first_accepted(text, |rule, _| OCCUPATIONS.get(rule).map(|o| o.to_string()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.vocabulary
                .all_accepted(text, |rule, _| OCCUPATIONS.get(rule).map(|o| o.to_string())),
        )
    }
}

/// Employer name extractor.
#[derive(Debug, Clone)]
pub struct WorkplaceExtractor {
    patterns: PatternSet,
}

impl WorkplaceExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile("workplace", WORKPLACE_PATTERNS)?,
        })
    }
}

impl FieldExtractor for WorkplaceExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |_, caps| clean_org(group(caps, 1)?))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        super::dedup_by_value(
            self.patterns
                .all_accepted(text, |_, caps| clean_org(group(caps, 1)?)),
        )
    }
}

fn clean_org(raw: &str) -> Option<String> {
    let name = raw.trim_end_matches(['.', ',', '-']).trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Occupation and workplace together.
#[derive(Debug, Clone)]
pub struct JobExtractor {
    occupation: OccupationExtractor,
    workplace: WorkplaceExtractor,
}

impl JobExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            occupation: OccupationExtractor::new()?,
            workplace: WorkplaceExtractor::new()?,
        })
    }

    /// Extract both parts; either may be absent.
    pub fn extract_job(&self, text: &str) -> JobInfo {
        JobInfo {
            occupation: self.occupation.extract(text).map(|m| m.value),
            workplace: self.workplace.extract(text).map(|m| m.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_occupation_vocabulary_order() {
        let extractor = OccupationExtractor::new().unwrap();
        // "driver" appears first in the text, "teacher" first in the vocabulary.
        let m = extractor.extract("Former driver, now a Teacher.").unwrap();
        assert_eq!(m.value, "teacher");
        assert_eq!(m.rule, 0);
    }

    #[test]
    fn test_occupation_whole_words() {
        let extractor = OccupationExtractor::new().unwrap();
        assert!(extractor.extract("uses a screwdriver daily").is_none());
        assert_eq!(
            extractor.extract("She is a police officer").map(|m| m.value),
            Some("police officer".to_string())
        );
    }

    #[test]
    fn test_workplace_templates() {
        let extractor = WorkplaceExtractor::new().unwrap();
        assert_eq!(
            extractor
                .extract("He works at Muhimbili National Hospital.")
                .map(|m| m.value),
            Some("Muhimbili National Hospital".to_string())
        );
        assert_eq!(
            extractor
                .extract("employed by Bank of Tanzania as a clerk")
                .map(|m| m.value),
            Some("Bank of Tanzania".to_string())
        );
        assert_eq!(
            extractor.extract("Employer: CRDB Bank, Mwanza").map(|m| m.value),
            Some("CRDB Bank".to_string())
        );
    }

    #[test]
    fn test_workplace_needs_capitalized_name() {
        let extractor = WorkplaceExtractor::new().unwrap();
        assert!(extractor.extract("works at home most days").is_none());
    }

    #[test]
    fn test_job_info() {
        let job = JobExtractor::new()
            .unwrap()
            .extract_job("Asha is a nurse and works at Aga Khan Hospital in Dar.");
        assert_eq!(
            job,
            JobInfo {
                occupation: Some("nurse".to_string()),
                workplace: Some("Aga Khan Hospital".to_string()),
            }
        );

        let empty = JobExtractor::new().unwrap().extract_job("nothing here");
        assert!(empty.is_empty());
    }
}
