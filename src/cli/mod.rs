use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fcmetrics::bounds::Point;
use fcmetrics::metrics::Cell;

mod config;
mod ecsa;
mod extrema;
mod mass_activity;

pub use config::Config;

/// fcmetrics - ECSA and mass activity from fuel-cell test data
#[derive(Parser)]
#[command(name = "fcmetrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Cell constants shared by every command
#[derive(Args, Debug, Default)]
pub struct CellArgs {
    /// Cell identifier
    #[arg(long)]
    pub cell_id: Option<String>,

    /// Electrode area (cm^2)
    #[arg(long)]
    pub area: Option<f64>,

    /// Catalyst loading (mg/cm^2)
    #[arg(long)]
    pub loading: Option<f64>,
}

impl CellArgs {
    /// Build the cell from flags, falling back to the config file
    pub fn resolve(&self, config: &Config) -> Result<Cell> {
        let id = self
            .cell_id
            .clone()
            .or_else(|| config.cell.id.clone())
            .unwrap_or_else(|| "cell".to_string());
        let area = config::required(self.area, config.cell.area_cm2, "area_cm2")?;
        let loading = config::required(self.loading, config.cell.loading_mg_cm2, "loading_mg_cm2")?;
        Cell::new(id, area, loading).context("Invalid cell constants")
    }
}

/// Options of the ecsa command
#[derive(Args, Debug)]
pub struct EcsaArgs {
    /// Potentiostat export of the CV measurement
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub cell: CellArgs,

    /// Stage label used in the report
    #[arg(long, default_value = "BOT")]
    pub label: String,

    /// Bound selection mode (voltage | edge)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Upper branch start voltage (voltage mode)
    #[arg(long, allow_hyphen_values = true)]
    pub v_up: Option<f64>,

    /// Lower branch end voltage (voltage mode)
    #[arg(long, allow_hyphen_values = true)]
    pub v_down: Option<f64>,

    /// Sample window START END of the cycle to reduce (defaults to the whole file)
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<usize>>,

    /// Picked point as POTENTIAL,CURRENT_DENSITY; give four
    #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true)]
    pub points: Vec<Point>,

    /// Sample spacing in seconds when the file has no time column
    #[arg(long)]
    pub sample_interval: Option<f64>,

    /// Lines before the column header
    #[arg(long)]
    pub header_line: Option<usize>,

    /// Input is a raw DTA file
    #[arg(long)]
    pub dta: bool,

    /// Write the full reduction as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

/// Options of the mass-activity command
#[derive(Args, Debug)]
pub struct MassActivityArgs {
    /// Stage directories, each holding a polarization export and an h2x crossover file
    #[arg(value_name = "STAGE_DIR", required = true)]
    pub stages: Vec<PathBuf>,

    #[command(flatten)]
    pub cell: CellArgs,

    /// Proton transport resistance (Ohm*cm^2)
    #[arg(long)]
    pub r_proton: Option<f64>,

    /// Only fit points with corrected voltage above this (V)
    #[arg(long)]
    pub voltage_cutoff: Option<f64>,

    /// Voltage at which activity is reported (V)
    #[arg(long)]
    pub reference_voltage: Option<f64>,

    /// O2 rows per sweep direction
    #[arg(long)]
    pub sweep_points: Option<usize>,

    /// Trailing crossover samples averaged
    #[arg(long)]
    pub crossover_window: Option<usize>,

    /// Write the full reduction as JSON
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

/// Options of the extrema command
#[derive(Args, Debug)]
pub struct ExtremaArgs {
    /// Potentiostat export of the CV measurement
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub cell: CellArgs,

    /// Sample window START END to scan
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<usize>>,

    /// Neighbours compared on each side
    #[arg(long, default_value_t = fcmetrics::extrema::DEFAULT_ORDER)]
    pub order: usize,

    /// Lines before the column header
    #[arg(long)]
    pub header_line: Option<usize>,

    /// Input is a raw DTA file
    #[arg(long)]
    pub dta: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ECSA from a CV measurement
    Ecsa(EcsaArgs),

    /// Compute mass activity at the reference voltage for one or more stages
    MassActivity(MassActivityArgs),

    /// List local current extrema to help choose picking points
    Extrema(ExtremaArgs),
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected POTENTIAL,CURRENT_DENSITY, got '{}'", s))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad potential '{}': {}", x, e))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad current '{}': {}", y, e))?;
    Ok(Point::new(x, y))
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Ecsa(args) => ecsa::run(args, &config),
        Commands::MassActivity(args) => mass_activity::run(args, &config),
        Commands::Extrema(args) => extrema::run(args, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("0.08,-30").unwrap(), Point::new(0.08, -30.0));
        assert_eq!(parse_point(" -0.1 , 2.5 ").unwrap(), Point::new(-0.1, 2.5));
        assert!(parse_point("0.08").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_ecsa_flags() {
        let cli = Cli::try_parse_from([
            "fcmetrics",
            "ecsa",
            "cv.txt",
            "--area",
            "50",
            "--mode",
            "voltage",
            "--range",
            "10",
            "20",
            "--point",
            "0.1,-2",
            "--point",
            "-0.05,3",
        ])
        .unwrap();

        match cli.command {
            Commands::Ecsa(args) => {
                assert_eq!(args.cell.area, Some(50.0));
                assert_eq!(args.range, Some(vec![10, 20]));
                assert_eq!(args.points.len(), 2);
                assert_eq!(args.points[1], Point::new(-0.05, 3.0));
            }
            _ => panic!("expected ecsa command"),
        }
    }

    #[test]
    fn test_cell_args_fall_back_to_config() {
        let config = Config::from_str("[cell]\narea_cm2 = 25.0\nloading_mg_cm2 = 0.1\n").unwrap();
        let args = CellArgs {
            loading: Some(0.2),
            ..Default::default()
        };
        let cell = args.resolve(&config).unwrap();
        assert_eq!(cell.area_cm2(), 25.0);
        assert_eq!(cell.loading_mg_cm2(), 0.2);
        assert_eq!(cell.id(), "cell");
    }
}
