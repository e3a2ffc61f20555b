//! TOML configuration file support.
//!
//! Cell constants and reduction parameters that rarely change between runs
//! can live in a config file instead of CLI flags:
//!
//! ```toml
//! # fcmetrics.toml
//! [cell]
//! id = "ST8C5"
//! area_cm2 = 50.0
//! loading_mg_cm2 = 0.253
//!
//! [ecsa]
//! mode = "voltage"
//! v_up = 0.40
//! v_down = 0.40
//! range = [13801, 18400]
//! points = [[0.08, -30.0], [0.35, -8.0], [0.35, 8.0], [0.08, 25.0]]
//!
//! [mass_activity]
//! r_proton = 0.036186
//! voltage_cutoff = 0.85
//! ```
//!
//! Flags given on the command line take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for fcmetrics.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Test article constants.
    #[serde(default)]
    pub cell: CellConfig,

    /// ECSA reduction settings.
    #[serde(default)]
    pub ecsa: EcsaConfig,

    /// Mass activity reduction settings.
    #[serde(default)]
    pub mass_activity: MassActivityConfig,
}

/// Physical constants of the cell under test.
#[derive(Debug, Default, Deserialize)]
pub struct CellConfig {
    /// Cell identifier used in reports.
    pub id: Option<String>,

    /// Electrode area in cm^2.
    pub area_cm2: Option<f64>,

    /// Catalyst loading in mg/cm^2.
    pub loading_mg_cm2: Option<f64>,
}

/// Configuration for the ecsa command.
#[derive(Debug, Default, Deserialize)]
pub struct EcsaConfig {
    /// Bound selection mode ("voltage" or "edge").
    pub mode: Option<String>,

    /// Upper branch start voltage for voltage mode.
    pub v_up: Option<f64>,

    /// Lower branch end voltage for voltage mode.
    pub v_down: Option<f64>,

    /// Half-open sample window of the cycle to reduce.
    pub range: Option<[usize; 2]>,

    /// Four picked (potential, current density) points.
    pub points: Option<Vec<[f64; 2]>>,

    /// Sample spacing in seconds when the table has no time column.
    pub sample_interval_s: Option<f64>,

    /// Lines before the column header.
    pub header_line: Option<usize>,

    /// Input is a raw DTA file with a units row and TABLE markers.
    pub dta: Option<bool>,
}

/// Configuration for the mass-activity command.
#[derive(Debug, Default, Deserialize)]
pub struct MassActivityConfig {
    /// Proton transport resistance in Ohm*cm^2.
    pub r_proton: Option<f64>,

    /// Points at or below this corrected voltage are not fitted.
    pub voltage_cutoff: Option<f64>,

    /// Voltage at which activity is reported.
    pub reference_voltage: Option<f64>,

    /// Trailing crossover samples to average.
    pub crossover_window: Option<usize>,

    /// O2 rows per sweep direction.
    pub sweep_points: Option<usize>,

    /// Lines before the column header of crossover files.
    pub header_line: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Resolve a setting: flag first, then config file, else an error naming it.
pub fn required<T>(flag: Option<T>, file: Option<T>, name: &str) -> Result<T> {
    flag.or(file)
        .with_context(|| format!("Missing required setting '{}' (flag or config file)", name))
}
