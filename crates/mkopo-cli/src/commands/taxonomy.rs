//! Taxonomy command - inspect and validate location data.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use mkopo_core::GeoTaxonomy;

use super::load_config;

/// Arguments for the taxonomy command.
#[derive(Args)]
pub struct TaxonomyArgs {
    #[command(subcommand)]
    command: TaxonomyCommand,
}

#[derive(Subcommand)]
enum TaxonomyCommand {
    /// Validate a taxonomy file (default: the configured taxonomy)
    Validate {
        /// JSON file with region -> district -> wards
        path: Option<PathBuf>,
    },

    /// List regions, or the districts and wards of one region
    Show {
        /// Region to expand
        #[arg(short, long)]
        region: Option<String>,
    },
}

pub async fn run(args: TaxonomyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        TaxonomyCommand::Validate { path } => validate(path, config_path),
        TaxonomyCommand::Show { region } => show(region.as_deref(), config_path),
    }
}

fn load(path: Option<PathBuf>, config_path: Option<&str>) -> anyhow::Result<(GeoTaxonomy, String)> {
    let path = match path {
        Some(path) => Some(path),
        None => load_config(config_path)?.taxonomy.path,
    };

    let source = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded taxonomy".to_string());
    let taxonomy = GeoTaxonomy::load(path.as_deref())?;

    Ok((taxonomy, source))
}

fn validate(path: Option<PathBuf>, config_path: Option<&str>) -> anyhow::Result<()> {
    let (taxonomy, source) = load(path, config_path)?;

    println!(
        "{} {} is valid: {} regions, {} districts, {} wards",
        style("✓").green(),
        source,
        taxonomy.len(),
        taxonomy.district_count(),
        taxonomy.ward_count()
    );

    Ok(())
}

fn show(region: Option<&str>, config_path: Option<&str>) -> anyhow::Result<()> {
    let (taxonomy, source) = load(None, config_path)?;

    match region {
        Some(name) => {
            let region = taxonomy
                .region(name)
                .ok_or_else(|| anyhow::anyhow!("Region not found in {}: {}", source, name))?;

            println!("{}", style(region.name()).bold());
            for district in region.districts() {
                let wards: Vec<&str> = district.wards().iter().map(|w| w.name()).collect();
                println!("  {}", style(district.name()).cyan());
                if !wards.is_empty() {
                    println!("    {}", wards.join(", "));
                }
            }
        }
        None => {
            for region in taxonomy.regions() {
                println!(
                    "{} ({} districts)",
                    region.name(),
                    region.districts().len()
                );
            }
        }
    }

    Ok(())
}
