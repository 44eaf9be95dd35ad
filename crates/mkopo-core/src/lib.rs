//! Core library for loan applicant document processing.
//!
//! This crate provides:
//! - Text extraction from plain text, PDF and DOCX documents
//! - Rule-based applicant field extraction (name, NIDA number, phones, age, amounts, job)
//! - Region / district / ward resolution against a location taxonomy
//! - The structured applicant record with its derived loan ceiling

pub mod applicant;
pub mod document;
pub mod error;
pub mod models;
pub mod taxonomy;

pub use applicant::{
    ApplicantExtractor, ApplicantParser, ExtractionResult, LocationResolver, RecordParser,
};
pub use document::{extract_text, DocumentFormat};
pub use error::{MkopoError, Result};
pub use models::{ApplicantRecord, EmploymentStatus, JobInfo, LoanPurpose, LocationMatch, MkopoConfig};
pub use taxonomy::GeoTaxonomy;
