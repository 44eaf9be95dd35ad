//! Applicant parser: runs every field extractor and the location resolver.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::document;
use crate::models::{ApplicantRecord, MkopoConfig};
use crate::taxonomy::GeoTaxonomy;

use super::location::LocationResolver;
use super::rules::{
    AgeExtractor, AmountExtractor, EmailExtractor, EmploymentExtractor, FieldExtractor,
    JobExtractor, LoanPurposeExtractor, NameExtractor, NationalIdExtractor, PhoneExtractor,
};
use super::{ApplicantExtractor, Result};

/// Multiplier applied to monthly income to estimate the loan ceiling.
pub const LOAN_CEILING_MULTIPLIER: u32 = 5;

/// Result of applicant extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted applicant record.
    pub record: ApplicantRecord,
    /// Fields that could not be found.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for applicant text parsing.
pub trait RecordParser {
    /// Parse an applicant record from text. Missing fields are absent, never errors.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based applicant parser.
///
/// All patterns are compiled once at construction; a parser is immutable
/// afterwards and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ApplicantParser {
    taxonomy: Arc<GeoTaxonomy>,
    name: NameExtractor,
    national_id: NationalIdExtractor,
    phones: PhoneExtractor,
    email: EmailExtractor,
    age: AgeExtractor,
    employment: EmploymentExtractor,
    job: JobExtractor,
    income: AmountExtractor,
    balance: AmountExtractor,
    requested_loan: AmountExtractor,
    purpose: LoanPurposeExtractor,
    currency: String,
}

impl ApplicantParser {
    /// Create a parser over the given taxonomy.
    pub fn new(taxonomy: Arc<GeoTaxonomy>) -> Result<Self> {
        Ok(Self {
            taxonomy,
            name: NameExtractor::new()?,
            national_id: NationalIdExtractor::new()?,
            phones: PhoneExtractor::new()?,
            email: EmailExtractor::new()?,
            age: AgeExtractor::new()?,
            employment: EmploymentExtractor::new()?,
            job: JobExtractor::new()?,
            income: AmountExtractor::income()?,
            balance: AmountExtractor::bank_balance()?,
            requested_loan: AmountExtractor::requested_loan()?,
            purpose: LoanPurposeExtractor::new()?,
            currency: "TZS".to_string(),
        })
    }

    /// Create a parser from configuration, loading the configured taxonomy.
    pub fn from_config(config: &MkopoConfig) -> crate::Result<Self> {
        let taxonomy = config.load_taxonomy()?;
        let mut parser =
            Self::new(Arc::new(taxonomy))?.with_currency(config.extraction.currency.clone());
        if let Some(year) = config.extraction.current_year {
            parser = parser.with_current_year(year);
        }
        Ok(parser)
    }

    /// Set the currency code attached to records.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Fix the year used to derive age from a birth year.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.age = self.age.with_current_year(year);
        self
    }

    pub fn taxonomy(&self) -> &GeoTaxonomy {
        &self.taxonomy
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl RecordParser for ApplicantParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing applicant from {} characters of text", text.len());

        let monthly_income = self.income.extract(text).map(|m| m.value);

        let record = ApplicantRecord {
            name: self.name.extract(text).map(|m| m.value),
            national_id: self.national_id.extract(text).map(|m| m.value),
            phones: self.phones.extract_set(text),
            email: self.email.extract(text).map(|m| m.value),
            age: self.age.extract(text).map(|m| m.value),
            employment_status: self.employment.extract(text).map(|m| m.value),
            job: self.job.extract_job(text),
            monthly_income,
            bank_balance: self.balance.extract(text).map(|m| m.value),
            requested_loan: self.requested_loan.extract(text).map(|m| m.value),
            loan_purpose: self.purpose.extract(text).map(|m| m.value),
            location: LocationResolver::new(&self.taxonomy).resolve(text),
            estimated_loan_ceiling: monthly_income.and_then(loan_ceiling),
            currency: self.currency.clone(),
        };

        let warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Extracted applicant {:?} with {} missing fields",
            record.name,
            warnings.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl ApplicantExtractor for ApplicantParser {
    fn extract_from_file(&self, path: &Path) -> crate::Result<ApplicantRecord> {
        let text = document::extract_text(path)?;
        Ok(self.parse(&text).record)
    }

    fn extract_from_text(&self, text: &str) -> ApplicantRecord {
        self.parse(text).record
    }
}

/// Loan ceiling for a monthly income; `None` if the product overflows.
pub fn loan_ceiling(monthly_income: Decimal) -> Option<Decimal> {
    monthly_income.checked_mul(Decimal::from(LOAN_CEILING_MULTIPLIER))
}
