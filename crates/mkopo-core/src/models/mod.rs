//! Data models: the extracted applicant record and configuration.

pub mod config;
pub mod record;

pub use config::MkopoConfig;
pub use record::{ApplicantRecord, EmploymentStatus, JobInfo, LoanPurpose, LocationMatch};
