use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use fcmetrics::pipeline::{merge, reduce_mass_activity_cycles, MassActivityInput};
use fcmetrics::report::ReductionReport;
use fcmetrics::series::{read_polarization_path, PotentiostatTable, CURRENT_COLUMNS};
use fcmetrics::tafel::{TafelParams, DEFAULT_SWEEP_POINTS};

use super::ecsa::table_layout;
use super::{Config, MassActivityArgs};

/// Marker in the file name of the crossover measurement
const CROSSOVER_MARKER: &str = "h2x";

/// Files found in one stage directory
#[derive(Debug, PartialEq)]
struct StageFiles {
    label: String,
    polarization: PathBuf,
    crossover: PathBuf,
}

pub fn run(args: MassActivityArgs, config: &Config) -> Result<()> {
    let mut cell = args.cell.resolve(config)?;
    let ma = &config.mass_activity;

    let params = tafel_params(&args, config);
    let sweep_points = args
        .sweep_points
        .or(ma.sweep_points)
        .unwrap_or(DEFAULT_SWEEP_POINTS);
    if params.r_proton == 0.0 {
        warn!("r_proton is zero, no proton transport correction applied");
    }

    let mut inputs = Vec::with_capacity(args.stages.len());
    for dir in &args.stages {
        let files = find_stage_files(dir)?;
        info!(
            "Stage {}: polarization {}, crossover {}",
            files.label,
            files.polarization.display(),
            files.crossover.display()
        );

        let polarization = read_polarization_path(&files.polarization).with_context(|| {
            format!(
                "Failed to read polarization data: {}",
                files.polarization.display()
            )
        })?;
        let layout = table_layout(ma.header_line, false);
        let crossover = PotentiostatTable::from_path(&files.crossover, layout)
            .and_then(|table| table.column(CURRENT_COLUMNS))
            .with_context(|| {
                format!("Failed to read crossover data: {}", files.crossover.display())
            })?;

        inputs.push(MassActivityInput {
            label: files.label,
            polarization,
            crossover_amps: crossover,
        });
    }

    let results = reduce_mass_activity_cycles(&inputs, &cell, &params, sweep_points);
    let mut reductions = Vec::with_capacity(results.len());
    for (input, result) in inputs.iter().zip(results) {
        let reduction =
            result.with_context(|| format!("Mass activity reduction failed for {}", input.label))?;
        reductions.push(reduction);
    }
    merge(&mut cell, &reductions).context("Failed to record mass activity on cell")?;

    let mut report = ReductionReport::new(cell);
    report.mass_activity = reductions;
    println!("{}", report.format_colored());

    if let Some(path) = &args.json {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Fit parameters from flags, then the config file, then defaults
fn tafel_params(args: &MassActivityArgs, config: &Config) -> TafelParams {
    let ma = &config.mass_activity;
    let defaults = TafelParams::default();
    TafelParams {
        r_proton: args.r_proton.or(ma.r_proton).unwrap_or(defaults.r_proton),
        voltage_cutoff: args
            .voltage_cutoff
            .or(ma.voltage_cutoff)
            .unwrap_or(defaults.voltage_cutoff),
        reference_voltage: args
            .reference_voltage
            .or(ma.reference_voltage)
            .unwrap_or(defaults.reference_voltage),
        crossover_window: args
            .crossover_window
            .or(ma.crossover_window)
            .unwrap_or(defaults.crossover_window),
    }
}

/// Locate the polarization export and the crossover file of a stage
fn find_stage_files(dir: &Path) -> Result<StageFiles> {
    let label = dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.strip_prefix("data_").unwrap_or(name).to_string())
        .with_context(|| format!("Stage directory has no name: {}", dir.display()))?;

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list stage directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut polarization = None;
    let mut crossover = None;
    for path in entries {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_ascii_lowercase(),
            None => continue,
        };
        if name.contains(CROSSOVER_MARKER) {
            if crossover.is_none() {
                crossover = Some(path);
            }
        } else if is_table(&name) && polarization.is_none() {
            polarization = Some(path);
        } else {
            debug!("Ignoring {}", path.display());
        }
    }

    match (polarization, crossover) {
        (Some(polarization), Some(crossover)) => Ok(StageFiles {
            label,
            polarization,
            crossover,
        }),
        (None, _) => bail!("No polarization export (.csv/.tsv) in {}", dir.display()),
        (_, None) => bail!(
            "No crossover file (name containing '{}') in {}",
            CROSSOVER_MARKER,
            dir.display()
        ),
    }
}

fn is_table(name: &str) -> bool {
    name.ends_with(".csv") || name.ends_with(".tsv")
}
