//! Batch processing command for multiple applicant documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use mkopo_core::document;
use mkopo_core::{ApplicantParser, ApplicantRecord, RecordParser};

use super::load_config;
use super::output::{csv_fields, csv_header, format_record, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Year used to derive age from a birth year
    #[arg(long)]
    current_year: Option<i32>,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    record: Option<ApplicantRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(year) = args.current_year {
        config.extraction.current_year = Some(year);
    }

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && document::is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let parser = Arc::new(ApplicantParser::from_config(&config)?);

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // At most `jobs` blocking workers share one parser. A finished file is
    // collected before the next one is spawned once the pool is full.
    let jobs = args.jobs.max(1);
    let mut tasks = JoinSet::new();
    let mut results: Vec<(usize, FileResult)> = Vec::new();

    for (index, path) in files.into_iter().enumerate() {
        while tasks.len() >= jobs {
            if let Some(joined) = tasks.join_next().await {
                collect(joined?, &mut results, &overall_pb, args.continue_on_error)?;
            }
        }

        let parser = Arc::clone(&parser);
        tasks.spawn_blocking(move || {
            let file_start = Instant::now();
            let outcome = process_single_file(&path, &parser);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(record) => FileResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    record: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                },
            };
            (index, result)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        collect(joined?, &mut results, &overall_pb, args.continue_on_error)?;
    }

    overall_pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = results.into_iter().map(|(_, r)| r).collect();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(record) = &result.record {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("applicant");

                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));
                fs::write(&output_path, format_record(record, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Record one finished file. Fails on the first error unless errors are tolerated.
fn collect(
    (index, result): (usize, FileResult),
    results: &mut Vec<(usize, FileResult)>,
    pb: &ProgressBar,
    continue_on_error: bool,
) -> anyhow::Result<()> {
    pb.inc(1);

    if let Some(error_msg) = &result.error {
        if continue_on_error {
            warn!("Failed to process {}: {}", result.path.display(), error_msg);
        } else {
            error!("Failed to process {}: {}", result.path.display(), error_msg);
            pb.abandon();
            anyhow::bail!(
                "Processing failed for {}: {}",
                result.path.display(),
                error_msg
            );
        }
    }

    results.push((index, result));
    Ok(())
}

fn process_single_file(path: &Path, parser: &ApplicantParser) -> anyhow::Result<ApplicantRecord> {
    let text = document::extract_text(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", path.display());
    }

    Ok(parser.parse(&text).record)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend_from_slice(csv_header());
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut row = vec![filename];
        match &result.record {
            Some(record) => {
                row.push("success".to_string());
                row.extend(csv_fields(record));
            }
            None => {
                row.push("error".to_string());
                row.extend(std::iter::repeat_n(String::new(), csv_header().len()));
            }
        }
        row.push(result.processing_time_ms.to_string());
        row.push(result.error.clone().unwrap_or_default());

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
