//! Process command - extract applicant data from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use mkopo_core::document;
use mkopo_core::{ApplicantParser, RecordParser};

use super::load_config;
use super::output::{format_record, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt, .pdf or .docx)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the beginning of the extracted document text
    #[arg(long)]
    preview: bool,

    /// Year used to derive age from a birth year
    #[arg(long)]
    current_year: Option<i32>,

    /// List fields that could not be extracted
    #[arg(long)]
    show_missing: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(year) = args.current_year {
        config.extraction.current_year = Some(year);
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting text...");
    pb.set_position(10);
    let text = document::extract_text(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", args.input.display());
    }

    pb.set_message("Loading location taxonomy...");
    pb.set_position(40);
    let parser = ApplicantParser::from_config(&config)?;

    pb.set_message("Extracting applicant data...");
    pb.set_position(70);
    let result = parser.parse(&text);

    pb.set_position(100);
    pb.finish_and_clear();

    if args.preview {
        let preview: String = text.chars().take(config.output.preview_chars).collect();
        eprintln!("{}", style("Document text:").bold());
        eprintln!("{}", preview.trim_end());
        if text.chars().count() > config.output.preview_chars {
            eprintln!("{}", style("...").dim());
        }
        eprintln!();
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing && !result.warnings.is_empty() {
        eprintln!();
        eprintln!("{}", style("Missing fields:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!(
        "Total processing time: {:?} (extraction {}ms)",
        start.elapsed(),
        result.processing_time_ms
    );

    Ok(())
}
