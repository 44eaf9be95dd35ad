//! Loan applicant field extraction module.

pub mod location;
mod parser;
pub mod rules;

pub use location::LocationResolver;
pub use parser::{loan_ceiling, ApplicantParser, ExtractionResult, RecordParser, LOAN_CEILING_MULTIPLIER};

use std::path::Path;

use crate::error::ExtractionError;
use crate::models::ApplicantRecord;

/// Result type for extraction setup.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for applicant record extractors.
pub trait ApplicantExtractor {
    /// Extract an applicant record from a `.txt`, `.pdf` or `.docx` file.
    fn extract_from_file(&self, path: &Path) -> crate::Result<ApplicantRecord>;

    /// Extract an applicant record from plain text.
    fn extract_from_text(&self, text: &str) -> ApplicantRecord;
}
