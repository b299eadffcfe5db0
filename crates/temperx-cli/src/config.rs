//! Calibration configuration.
//!
//! Factors and offsets come from, in order of precedence: command line
//! flags, the TOML config file, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use temperx_core::Calibration;
use tracing::info;

use crate::cli::Cli;

/// Contents of `~/.temperx.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Factor for temperature
    pub tf: Option<f64>,
    /// Offset for temperature
    pub to: Option<f64>,
    /// Factor for humidity
    pub hf: Option<f64>,
    /// Offset for humidity
    pub ho: Option<f64>,
}

/// Load configuration from `path`, or defaults if it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(?path, "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {path:?}"))?;
    Ok(config)
}

/// The config file to read, if any.
///
/// `--conf ""` disables the config file.
pub fn config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.conf {
        Some(path) if path.is_empty() => None,
        Some(path) => Some(PathBuf::from(path)),
        None => default_config_path(),
    }
}

/// `$HOME/.temperx.toml`.
fn default_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".temperx.toml"))
}

/// Merge flags, file values and defaults into the effective calibration.
#[must_use]
pub fn resolve_calibration(cli: &Cli, config: &Config) -> Calibration {
    let defaults = Calibration::default();
    Calibration {
        temperature_factor: cli.tf.or(config.tf).unwrap_or(defaults.temperature_factor),
        temperature_offset: cli.to.or(config.to).unwrap_or(defaults.temperature_offset),
        humidity_factor: cli.hf.or(config.hf).unwrap_or(defaults.humidity_factor),
        humidity_offset: cli.ho.or(config.ho).unwrap_or(defaults.humidity_offset),
    }
}
