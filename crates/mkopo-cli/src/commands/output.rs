//! Rendering applicant records as JSON, CSV or plain text.

use mkopo_core::ApplicantRecord;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_record(record: &ApplicantRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

const CSV_HEADER: [&str; 17] = [
    "name",
    "national_id",
    "phones",
    "email",
    "age",
    "employment_status",
    "occupation",
    "workplace",
    "monthly_income",
    "bank_balance",
    "requested_loan",
    "loan_purpose",
    "region",
    "district",
    "ward",
    "estimated_loan_ceiling",
    "currency",
];

/// One CSV row for a record, in `CSV_HEADER` order.
pub fn csv_fields(record: &ApplicantRecord) -> Vec<String> {
    let amount = |value: Option<rust_decimal::Decimal>| value.map(|v| v.to_string()).unwrap_or_default();

    vec![
        record.name.clone().unwrap_or_default(),
        record.national_id.clone().unwrap_or_default(),
        record.phones.iter().cloned().collect::<Vec<_>>().join(";"),
        record.email.clone().unwrap_or_default(),
        record.age.map(|a| a.to_string()).unwrap_or_default(),
        record
            .employment_status
            .map(|s| s.label().to_string())
            .unwrap_or_default(),
        record.job.occupation.clone().unwrap_or_default(),
        record.job.workplace.clone().unwrap_or_default(),
        amount(record.monthly_income),
        amount(record.bank_balance),
        amount(record.requested_loan),
        record
            .loan_purpose
            .map(|p| p.label().to_string())
            .unwrap_or_default(),
        record.location.region().unwrap_or_default().to_string(),
        record.location.district().unwrap_or_default().to_string(),
        record.location.ward().unwrap_or_default().to_string(),
        amount(record.estimated_loan_ceiling),
        record.currency.clone(),
    ]
}

pub fn csv_header() -> &'static [&'static str] {
    &CSV_HEADER
}

fn format_csv(record: &ApplicantRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_fields(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ApplicantRecord) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut output = String::new();

    output.push_str(&format!("Applicant: {}\n", text(&record.name)));
    output.push_str(&format!("National ID: {}\n", text(&record.national_id)));
    if record.phones.is_empty() {
        output.push_str("Phones: -\n");
    } else {
        output.push_str(&format!(
            "Phones: {}\n",
            record.phones.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    output.push_str(&format!("Email: {}\n", text(&record.email)));
    output.push_str(&format!(
        "Age: {}\n",
        record.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
    ));
    output.push('\n');

    output.push_str("Work:\n");
    output.push_str(&format!(
        "  Status:     {}\n",
        record
            .employment_status
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!("  Occupation: {}\n", text(&record.job.occupation)));
    output.push_str(&format!("  Workplace:  {}\n", text(&record.job.workplace)));
    output.push('\n');

    let location = if record.location.is_empty() {
        "-".to_string()
    } else {
        record.location.format()
    };
    output.push_str(&format!("Location: {}\n", location));
    output.push('\n');

    output.push_str("Finances:\n");
    output.push_str(&format!(
        "  Monthly income: {}\n",
        record.format_amount(record.monthly_income)
    ));
    output.push_str(&format!(
        "  Bank balance:   {}\n",
        record.format_amount(record.bank_balance)
    ));
    output.push_str(&format!(
        "  Requested loan: {}\n",
        record.format_amount(record.requested_loan)
    ));
    output.push_str(&format!(
        "  Loan purpose:   {}\n",
        record
            .loan_purpose
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "  Loan ceiling:   {}\n",
        record.format_amount(record.estimated_loan_ceiling)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkopo_core::LocationMatch;
    use rust_decimal::Decimal;

    fn record() -> ApplicantRecord {
        let mut record = ApplicantRecord::empty("TZS");
        record.name = Some("Juma Mkono".to_string());
        record.phones.insert("0712345678".to_string());
        record.phones.insert("0754000111".to_string());
        record.monthly_income = Some(Decimal::from(500_000));
        record.estimated_loan_ceiling = Some(Decimal::from(2_500_000));
        record.location = LocationMatch::in_region("Dar es Salaam").with_district("Kinondoni");
        record
    }

    #[test]
    fn test_csv_row_matches_header() {
        assert_eq!(csv_fields(&record()).len(), csv_header().len());

        let csv = format_record(&record(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("name,national_id,phones"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Juma Mkono,,0712345678;0754000111,"));
        assert!(row.contains("Dar es Salaam,Kinondoni,,2500000,TZS"));
    }

    #[test]
    fn test_text_output() {
        let text = format_record(&record(), OutputFormat::Text).unwrap();
        assert!(text.contains("Applicant: Juma Mkono"));
        assert!(text.contains("Location: Kinondoni, Dar es Salaam"));
        assert!(text.contains("Monthly income: TZS 500,000"));
        assert!(text.contains("Loan ceiling:   TZS 2,500,000"));
        assert!(text.contains("Bank balance:   -"));
    }

    #[test]
    fn test_json_output() {
        let json = format_record(&record(), OutputFormat::Json).unwrap();
        let back: ApplicantRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record());
    }
}
