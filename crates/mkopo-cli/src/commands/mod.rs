//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;
pub mod taxonomy;

use std::path::{Path, PathBuf};

use tracing::debug;

use mkopo_core::MkopoConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mkopo")
        .join("config.json")
}

/// Config file in effect: the explicit path if given, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit path must exist; the default location is optional and falls
/// back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MkopoConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(MkopoConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(MkopoConfig::from_file(&default_path)?)
    } else {
        Ok(MkopoConfig::default())
    }
}
