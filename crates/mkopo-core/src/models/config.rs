//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::taxonomy::GeoTaxonomy;

/// Main configuration for mkopo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MkopoConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Location taxonomy source.
    pub taxonomy: TaxonomyConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency code attached to every amount.
    pub currency: String,

    /// Year used to derive age from a birth year (default: current year).
    pub current_year: Option<i32>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            currency: "TZS".to_string(),
            current_year: None,
        }
    }
}

/// Where to load the location taxonomy from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// JSON file with region -> district -> wards (embedded data when unset).
    pub path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of characters shown in a document text preview.
    pub preview_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { preview_chars: 500 }
    }
}

impl MkopoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configured taxonomy.
    pub fn load_taxonomy(&self) -> Result<GeoTaxonomy, ConfigError> {
        GeoTaxonomy::load(self.taxonomy.path.as_deref())
    }
}
