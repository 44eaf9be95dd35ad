//! Pattern library for applicant field extraction.
//!
//! Every table below is a priority list: the first pattern that yields an
//! acceptable value decides the field, so reordering a table changes output.
//! Sources may use the `{AMOUNT}`, `{CURRENCY}`, `{ORG}` and `{PERSON}`
//! placeholders, which are expanded before compilation.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::trace;

use super::{ExtractionMatch, Result};
use crate::error::ExtractionError;

/// Number with optional thousands separators and decimals.
///
/// One number uses one separator style throughout. The `amount` group holds
/// the number; `overrun` catches a digit group glued onto its end
/// (`1,2345`), which makes the candidate malformed.
pub const AMOUNT: &str = r"(?P<amount>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d{1,3}(?: \d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)\b(?P<overrun>[.,]\d)?";

/// Optional Tanzanian shilling marker in front of an amount.
pub const CURRENCY: &str = r"(?:(?i:TZS|Tshs?|TSh|Shs?)\.?\s*)?";

/// Capitalized organization name, allowing lowercase connectives.
pub const ORG: &str = r"[A-Z][A-Za-z0-9&'.\-]*(?:[ \t]+(?:(?:of|and|for|the|&)[ \t]+)*[A-Z0-9][A-Za-z0-9&'.\-]*)*";

/// Two or three capitalized words on one line.
const PERSON: &str = r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2}";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([A-Z]+)\}").unwrap();
}

// Name templates: introduction, self-declaration, labeled field, bare
// heading line.
pub const NAME_PATTERNS: &[&str] = &[
    r"\b({PERSON})[ \t]+is[ \t]+an?\b",
    r"(?i:\bmy[ \t]+name[ \t]+is)[ \t]+({PERSON})\b",
    r"(?i:\b(?:full[ \t]+)?name)[ \t]*[:\-][ \t]*({PERSON})\b",
    r"(?m)^[ \t]*({PERSON})[ \t]*\r?$",
];

// National ID: labeled first, then a bare token in NIDA grouping
// (birth date, then five digits, then three or four).
pub const NATIONAL_ID_PATTERNS: &[&str] = &[
    r"(?i)\b(?:NIDA|NIN|national[ \t]+id(?:entification)?|ID)\b(?:[ \t]+(?:number|no\.?|#))?[ \t]*[:\-#]?[ \t]*(\d(?:[ \-]?\d)+)",
    r"\b(\d{8}[ \-]?\d{5}[ \-]?\d{3,4})\b",
];

// Tanzanian mobile numbers.
pub const PHONE_PATTERNS: &[&str] = &[
    r"(?:\+|\b)255[ \-]?[67]\d{2}[ \-]?\d{3}[ \-]?\d{3}\b",
    r"\b0[67]\d{2}[ \-]?\d{3}[ \-]?\d{3}\b",
];

pub const EMAIL_PATTERNS: &[&str] = &[r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}"];

// Direct age statements.
pub const AGE_PATTERNS: &[&str] = &[
    r"(?i)\baged?[ \t]*(?:is|of)?[ \t]*[:\-]?[ \t]*(\d{1,3})\b",
    r"(?i)\b(\d{1,3})[ \t]*(?:years?|yrs?)(?:[ \t]+|-)old\b",
];

// Four-digit birth year near a birth keyword, optionally after day and month.
pub const BIRTH_YEAR_PATTERNS: &[&str] = &[
    r"(?i)\b(?:born(?:[ \t]+(?:in|on))?|birth[ \t]*year|year[ \t]+of[ \t]+birth|date[ \t]+of[ \t]+birth|d\.?o\.?b\.?)[ \t]*[:\-]?[ \t]*(?:\d{1,2}[./\-]\d{1,2}[./\-]|\d{1,2}(?:st|nd|rd|th)?[ \t]+[A-Za-z]+,?[ \t]+|[A-Za-z]+[ \t]+\d{1,2},?[ \t]+)?(\d{4})\b",
];

pub const INCOME_PATTERNS: &[&str] = &[
    r"(?i)\b(?:monthly[ \t]+)?income[ \t]+of[ \t]+(?:about[ \t]+|around[ \t]+|approximately[ \t]+)?{CURRENCY}{AMOUNT}",
    r"(?i)\bearns?[ \t]+(?:about[ \t]+|around[ \t]+)?{CURRENCY}{AMOUNT}",
    r"(?i)\b(?:monthly[ \t]+)?income[ \t]*(?:\([ \t]*\w+[ \t]*\)[ \t]*)?[:\-=]?[ \t]*{CURRENCY}{AMOUNT}",
    r"(?i)\b(?:monthly[ \t]+|net[ \t]+|gross[ \t]+)?(?:salary|earnings|wages?)[ \t]*(?:of|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
];

pub const BALANCE_PATTERNS: &[&str] = &[
    r"(?i)\b(?:bank|account)[ \t]+balance[ \t]*(?:of|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
    r"(?i)\bsavings[ \t]*(?:of|are|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
    r"(?i)\bbalance[ \t]*(?:of|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
];

pub const LOAN_REQUEST_PATTERNS: &[&str] = &[
    r"(?i)\brequested[ \t]+loan(?:[ \t]+amount)?[ \t]*(?:of|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
    r"(?i)\bloan[ \t]+(?:amount|request(?:ed)?)[ \t]*(?:of|is|:|-)?[ \t]*{CURRENCY}{AMOUNT}",
    r"(?i)\b(?:requests?|requesting|applies[ \t]+for|applying[ \t]+for|apply[ \t]+for|seeks?|seeking)[ \t]+an?[ \t]+loan[ \t]+of[ \t]+{CURRENCY}{AMOUNT}",
];

// Employer templates.
pub const WORKPLACE_PATTERNS: &[&str] = &[
    r"(?i:\bworks[ \t]+(?:at|for))[ \t]+(?:the[ \t]+)?({ORG})",
    r"(?i:\bemployed[ \t]+(?:by|at))[ \t]+(?:the[ \t]+)?({ORG})",
    r"(?i:\bworking[ \t]+(?:at|for))[ \t]+(?:the[ \t]+)?({ORG})",
    r"(?i:\bemployee[ \t]+(?:of|at))[ \t]+(?:the[ \t]+)?({ORG})",
    r"(?i:\b(?:employer|workplace)[ \t]*[:\-])[ \t]*({ORG})",
];

// Closed occupation vocabulary, in priority order.
pub const OCCUPATIONS: &[&str] = &[
    "teacher",
    "nurse",
    "doctor",
    "engineer",
    "accountant",
    "lawyer",
    "pharmacist",
    "lecturer",
    "banker",
    "police officer",
    "soldier",
    "civil servant",
    "driver",
    "mechanic",
    "electrician",
    "plumber",
    "carpenter",
    "tailor",
    "mason",
    "fisherman",
    "farmer",
    "trader",
    "shopkeeper",
    "vendor",
    "businessman",
    "businesswoman",
    "entrepreneur",
    "clerk",
    "secretary",
    "security guard",
];

// Employment status keywords; more specific terms come before "employed".
pub const EMPLOYMENT_PATTERNS: &[&str] = &[
    r"(?i)\bself[ \t\-]?employed\b",
    r"(?i)\b(?:unemployed|jobless)\b",
    r"(?i)\bbusiness[ \t]+owner\b",
    r"(?i)\b(?:retired|pensioner)\b",
    r"(?i)\bstudent\b",
    r"(?i)\bfarmer\b",
    r"(?i)\bemployed\b",
];

// Line that states the loan purpose explicitly.
pub const LOAN_PURPOSE_LINE: &[&str] = &[
    r"(?i)\b(?:loan[ \t]+)?purpose(?:[ \t]+of[ \t]+(?:the[ \t]+)?loan)?[ \t]*(?:is|:|-)?[ \t]*([^\n]+)",
    r"(?i)\bloan[ \t]+(?:is[ \t]+)?(?:for|to)[ \t]+([^\n]+)",
];

pub const LOAN_PURPOSE_PATTERNS: &[&str] = &[
    r"(?i)\bbusiness\b",
    r"(?i)\b(?:school[ \t]+fees?|tuition)\b",
    r"(?i)\b(?:health|medical|hospital)\b",
    r"(?i)\b(?:agricultur(?:e|al)|farming)\b",
    r"(?i)\b(?:home[ \t]+improvement|(?:house[ \t]+)?construction|renovation)\b",
    r"(?i)\bwedding\b",
];

/// An ordered, named list of compiled patterns for one field.
#[derive(Debug, Clone)]
pub struct PatternSet {
    field: &'static str,
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile pattern sources for `field`, expanding placeholders.
    ///
    /// Fails if no sources are given, a placeholder is unknown, or a
    /// pattern does not compile.
    pub fn compile(field: &'static str, sources: &[&str]) -> Result<Self> {
        if sources.is_empty() {
            return Err(ExtractionError::EmptyPatternSet {
                field: field.to_string(),
            });
        }

        let patterns = sources
            .iter()
            .map(|source| {
                let expanded = expand_placeholders(field, source)?;
                Regex::new(&expanded).map_err(|source_err| ExtractionError::InvalidPattern {
                    field: field.to_string(),
                    pattern: source.to_string(),
                    source: source_err,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { field, patterns })
    }

    /// Compile a closed vocabulary of plain terms: each becomes a
    /// case-insensitive whole-word pattern, in the given order.
    pub fn vocabulary(field: &'static str, terms: &[&str]) -> Result<Self> {
        let sources: Vec<String> = terms
            .iter()
            .map(|term| format!(r"(?i)\b{}\b", regex::escape(term).replace(' ', r"[ \t]+")))
            .collect();
        let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
        Self::compile(field, &sources)
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All matches in priority order: every match of the first pattern
    /// (left to right), then every match of the second, and so on.
    pub fn candidates<'s, 't>(
        &'s self,
        text: &'t str,
    ) -> impl Iterator<Item = (usize, Captures<'t>)> + 's
    where
        't: 's,
    {
        self.patterns
            .iter()
            .enumerate()
            .flat_map(move |(rule, re)| re.captures_iter(text).map(move |caps| (rule, caps)))
    }

    /// First candidate accepted by `accept`, in priority order.
    pub fn first_accepted<T>(
        &self,
        text: &str,
        mut accept: impl FnMut(usize, &Captures) -> Option<T>,
    ) -> Option<ExtractionMatch<T>> {
        for (rule, caps) in self.candidates(text) {
            match accept(rule, &caps) {
                Some(value) => {
                    trace!("{}: rule {} accepted '{}'", self.field, rule, &caps[0]);
                    return Some(ExtractionMatch::from_captures(value, rule, &caps));
                }
                None => trace!("{}: rule {} rejected '{}'", self.field, rule, &caps[0]),
            }
        }
        None
    }

    /// Every candidate accepted by `accept`, in priority order.
    pub fn all_accepted<T>(
        &self,
        text: &str,
        mut accept: impl FnMut(usize, &Captures) -> Option<T>,
    ) -> Vec<ExtractionMatch<T>> {
        self.candidates(text)
            .filter_map(|(rule, caps)| {
                accept(rule, &caps).map(|value| ExtractionMatch::from_captures(value, rule, &caps))
            })
            .collect()
    }
}

fn expand_placeholders(field: &str, source: &str) -> Result<String> {
    let mut unknown = None;
    let expanded = PLACEHOLDER.replace_all(source, |caps: &Captures| match &caps[1] {
        "AMOUNT" => AMOUNT.to_string(),
        "CURRENCY" => CURRENCY.to_string(),
        "ORG" => ORG.to_string(),
        "PERSON" => PERSON.to_string(),
        other => {
            unknown.get_or_insert_with(|| other.to_string());
            caps[0].to_string()
        }
    });

    match unknown {
        Some(name) => Err(ExtractionError::UnknownPlaceholder {
            field: field.to_string(),
            placeholder: name,
        }),
        None => Ok(expanded.into_owned()),
    }
}

/// Text of capture group `group`, trimmed; `None` if it did not participate.
pub fn group<'t>(caps: &Captures<'t>, group: usize) -> Option<&'t str> {
    caps.get(group).map(|m| m.as_str().trim())
}
