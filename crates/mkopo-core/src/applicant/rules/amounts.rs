//! Monetary fields: monthly income, bank balance and requested loan.

use regex::Captures;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{PatternSet, BALANCE_PATTERNS, INCOME_PATTERNS, LOAN_REQUEST_PATTERNS};
use super::{ExtractionMatch, FieldExtractor, Result};

/// Which monetary field an [`AmountExtractor`] looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Income,
    BankBalance,
    RequestedLoan,
}

impl AmountField {
    pub fn name(&self) -> &'static str {
        match self {
            AmountField::Income => "monthly_income",
            AmountField::BankBalance => "bank_balance",
            AmountField::RequestedLoan => "requested_loan",
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            AmountField::Income => INCOME_PATTERNS,
            AmountField::BankBalance => BALANCE_PATTERNS,
            AmountField::RequestedLoan => LOAN_REQUEST_PATTERNS,
        }
    }
}

/// Amount field extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    patterns: PatternSet,
}

impl AmountExtractor {
    pub fn new(field: AmountField) -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile(field.name(), field.patterns())?,
        })
    }

    pub fn income() -> Result<Self> {
        Self::new(AmountField::Income)
    }

    pub fn bank_balance() -> Result<Self> {
        Self::new(AmountField::BankBalance)
    }

    pub fn requested_loan() -> Result<Self> {
        Self::new(AmountField::RequestedLoan)
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .first_accepted(text, |_, caps| accept_amount(caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.patterns
            .all_accepted(text, |_, caps| accept_amount(caps))
    }
}

// A number with a digit group glued onto its end is malformed, not truncated.
fn accept_amount(caps: &Captures) -> Option<Decimal> {
    if caps.name("overrun").is_some() {
        return None;
    }
    parse_amount(caps.name("amount")?.as_str())
}

/// Parse an amount such as "1,200,000", "1 500 000" or "250000.50".
///
/// Thousands separators are dropped; anything that still is not a number
/// gives `None`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_' | '\u{00a0}'))
        .collect();

    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn amount(extractor: Result<AmountExtractor>, text: &str) -> Option<Decimal> {
        extractor.unwrap().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("500,000"), Some(dec(500_000)));
        assert_eq!(parse_amount("1 500 000"), Some(dec(1_500_000)));
        assert_eq!(parse_amount("2_000"), Some(dec(2_000)));
        assert_eq!(parse_amount("1,200.50"), Decimal::from_str("1200.50").ok());
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_income_templates() {
        assert_eq!(
            amount(AmountExtractor::income(), "Income: TZS 500,000"),
            Some(dec(500_000))
        );
        assert_eq!(
            amount(AmountExtractor::income(), "She earns Tsh 750,000 per month"),
            Some(dec(750_000))
        );
        assert_eq!(
            amount(AmountExtractor::income(), "has a monthly income of about 1,200,000/="),
            Some(dec(1_200_000))
        );
        assert_eq!(
            amount(AmountExtractor::income(), "Net salary: 900000"),
            Some(dec(900_000))
        );
    }

    #[test]
    fn test_income_template_priority() {
        let m = AmountExtractor::income()
            .unwrap()
            .extract("Salary: 100,000. He has an income of 300,000.")
            .unwrap();
        assert_eq!(m.value, dec(300_000));
        assert_eq!(m.rule, 0);
    }

    #[test]
    fn test_balance() {
        assert_eq!(
            amount(AmountExtractor::bank_balance(), "Bank balance: TZS 2,000,000"),
            Some(dec(2_000_000))
        );
        assert_eq!(
            amount(AmountExtractor::bank_balance(), "savings of 350,000"),
            Some(dec(350_000))
        );
        assert_eq!(amount(AmountExtractor::income(), "Bank balance: 2,000,000"), None);
    }

    #[test]
    fn test_requested_loan() {
        assert_eq!(
            amount(AmountExtractor::requested_loan(), "Requested loan amount: 3,000,000"),
            Some(dec(3_000_000))
        );
        assert_eq!(
            amount(
                AmountExtractor::requested_loan(),
                "I would like to apply for a loan of TZS 1,000,000"
            ),
            Some(dec(1_000_000))
        );
    }

    #[test]
    fn test_amount_stops_at_next_number() {
        assert_eq!(
            amount(AmountExtractor::income(), "Income: 500,000 300,000 400,000"),
            Some(dec(500_000))
        );
        assert_eq!(
            amount(AmountExtractor::bank_balance(), "Bank balance: 2,000,000 123 shares"),
            Some(dec(2_000_000))
        );
        assert_eq!(
            amount(AmountExtractor::income(), "Income: 1 500 000, paid monthly"),
            Some(dec(1_500_000))
        );
    }

    #[test]
    fn test_malformed_grouping_is_absent() {
        assert_eq!(amount(AmountExtractor::income(), "Income: 1,2345"), None);
        assert_eq!(amount(AmountExtractor::income(), "Income: 12,50 per day"), None);
        assert_eq!(
            amount(AmountExtractor::requested_loan(), "Loan amount: 3,000,0000"),
            None
        );
    }

    #[test]
    fn test_malformed_candidate_falls_through() {
        let m = AmountExtractor::income()
            .unwrap()
            .extract("Income: 1,2345. Salary: 400,000")
            .unwrap();
        assert_eq!(m.value, dec(400_000));
        assert_eq!(m.rule, 3);
    }

    #[test]
    fn test_no_amount() {
        for extractor in [
            AmountExtractor::income(),
            AmountExtractor::bank_balance(),
            AmountExtractor::requested_loan(),
        ] {
            assert!(extractor.unwrap().extract_all("nothing to see here").is_empty());
        }
    }
}
