//! Structured applicant record produced from one document.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All fields extracted from one document.
///
/// The shape is fixed: every field is always present, absent values are
/// `None` (or an empty set for phones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    /// Full name (two or three capitalized words).
    pub name: Option<String>,

    /// National identification number, digits only.
    pub national_id: Option<String>,

    /// Mobile numbers with separators removed.
    #[serde(default)]
    pub phones: BTreeSet<String>,

    /// Email address.
    pub email: Option<String>,

    /// Age in years, direct or derived from birth year.
    pub age: Option<u32>,

    /// Employment status keyword.
    pub employment_status: Option<EmploymentStatus>,

    /// Occupation and employer.
    #[serde(default)]
    pub job: JobInfo,

    /// Monthly income, unit-less.
    pub monthly_income: Option<Decimal>,

    /// Bank or savings balance, unit-less.
    pub bank_balance: Option<Decimal>,

    /// Requested loan amount, unit-less.
    pub requested_loan: Option<Decimal>,

    /// Declared purpose of the loan.
    pub loan_purpose: Option<LoanPurpose>,

    /// Region / district / ward.
    #[serde(default)]
    pub location: LocationMatch,

    /// Derived ceiling: five times monthly income.
    pub estimated_loan_ceiling: Option<Decimal>,

    /// Currency code for all amounts (attached by the caller).
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "TZS".to_string()
}

impl ApplicantRecord {
    /// An empty record in the given currency.
    pub fn empty(currency: impl Into<String>) -> Self {
        Self {
            name: None,
            national_id: None,
            phones: BTreeSet::new(),
            email: None,
            age: None,
            employment_status: None,
            job: JobInfo::default(),
            monthly_income: None,
            bank_balance: None,
            requested_loan: None,
            loan_purpose: None,
            location: LocationMatch::default(),
            estimated_loan_ceiling: None,
            currency: currency.into(),
        }
    }

    /// Names of fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.name.is_none() {
            missing.push("name");
        }
        if self.national_id.is_none() {
            missing.push("national_id");
        }
        if self.phones.is_empty() {
            missing.push("phones");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self.employment_status.is_none() {
            missing.push("employment_status");
        }
        if self.job.occupation.is_none() {
            missing.push("occupation");
        }
        if self.job.workplace.is_none() {
            missing.push("workplace");
        }
        if self.monthly_income.is_none() {
            missing.push("monthly_income");
        }
        if self.bank_balance.is_none() {
            missing.push("bank_balance");
        }
        if self.requested_loan.is_none() {
            missing.push("requested_loan");
        }
        if self.loan_purpose.is_none() {
            missing.push("loan_purpose");
        }
        if self.location.region().is_none() {
            missing.push("location");
        }

        missing
    }

    /// Format an amount with thousands separators and the record currency.
    pub fn format_amount(&self, amount: Option<Decimal>) -> String {
        match amount {
            Some(value) => format!("{} {}", self.currency, format_thousands(value)),
            None => "-".to_string(),
        }
    }
}

/// Format a decimal as `1,234,567` (fraction kept if non-zero).
pub fn format_thousands(value: Decimal) -> String {
    let normalized = value.normalize().to_string();
    let (sign, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Occupation keyword and workplace, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Occupation from the closed vocabulary.
    pub occupation: Option<String>,
    /// Employer or workplace name.
    pub workplace: Option<String>,
}

impl JobInfo {
    pub fn is_empty(&self) -> bool {
        self.occupation.is_none() && self.workplace.is_none()
    }
}

/// Employment status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    SelfEmployed,
    Unemployed,
    BusinessOwner,
    Retired,
    Student,
    Farmer,
    Employed,
}

impl EmploymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfEmployed => "Self-employed",
            Self::Unemployed => "Unemployed",
            Self::BusinessOwner => "Business owner",
            Self::Retired => "Retired",
            Self::Student => "Student",
            Self::Farmer => "Farmer",
            Self::Employed => "Employed",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Loan purpose vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    Business,
    SchoolFees,
    Health,
    Agriculture,
    HomeImprovement,
    Wedding,
}

impl LoanPurpose {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::SchoolFees => "School fees",
            Self::Health => "Health",
            Self::Agriculture => "Agriculture",
            Self::HomeImprovement => "Home improvement",
            Self::Wedding => "Wedding",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolved location. Levels are never skipped: a district implies a
/// region and a ward implies a district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct LocationMatch {
    region: Option<String>,
    district: Option<String>,
    ward: Option<String>,
}

impl LocationMatch {
    /// A match at region level.
    pub fn in_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            district: None,
            ward: None,
        }
    }

    /// Descend to a district. Ignored when no region is set.
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        if self.region.is_some() {
            self.district = Some(district.into());
        }
        self
    }

    /// Descend to a ward. Ignored when no district is set.
    pub fn with_ward(mut self, ward: impl Into<String>) -> Self {
        if self.district.is_some() {
            self.ward = Some(ward.into());
        }
        self
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn ward(&self) -> Option<&str> {
        self.ward.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none()
    }

    /// Number of resolved levels (0-3).
    pub fn depth(&self) -> usize {
        [&self.region, &self.district, &self.ward]
            .iter()
            .filter(|level| level.is_some())
            .count()
    }

    /// Format as "ward, district, region", most specific first.
    pub fn format(&self) -> String {
        [&self.ward, &self.district, &self.region]
            .iter()
            .filter_map(|level| level.as_deref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize)]
struct RawLocation {
    region: Option<String>,
    district: Option<String>,
    ward: Option<String>,
}

impl TryFrom<RawLocation> for LocationMatch {
    type Error = String;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        if raw.district.is_some() && raw.region.is_none() {
            return Err("district set without region".to_string());
        }
        if raw.ward.is_some() && raw.district.is_none() {
            return Err("ward set without district".to_string());
        }
        Ok(Self {
            region: raw.region,
            district: raw.district,
            ward: raw.ward,
        })
    }
}
