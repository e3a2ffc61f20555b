//! Integration tests for the mass activity reduction
//!
//! Polarization exports and crossover measurements are written to disk,
//! read back and reduced to mass activity at 0.9 V.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use fcmetrics::integrate::{AreaResult, BranchArea};
use fcmetrics::metrics::{Cell, CycleResult, MetricKind, MetricsError};
use fcmetrics::pipeline::{
    merge, reduce_mass_activity, reduce_mass_activity_cycles, MassActivityInput, PipelineError,
};
use fcmetrics::series::{read_polarization_path, PotentiostatTable, TableLayout, CURRENT_COLUMNS};
use fcmetrics::tafel::{TafelError, TafelParams};
use fcmetrics::units::platinum_mass_g;
use tempfile::tempdir;

// ============================================================================
// Helper Functions
// ============================================================================

const AREA: f64 = 50.0;
const LOADING: f64 = 0.253;
const SLOPE: f64 = -0.065;
const HFR: f64 = 0.05;
const R_PROTON: f64 = 0.036;
/// Crossover current in A; 0.02 mA/cm2 on 50 cm2
const CROSSOVER_AMPS: f64 = 0.001;

/// Anodic O2 sweep current densities in mA/cm2; the last point is not fitted
const ANODIC: [f64; 10] = [0.02, 0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 200.0];

/// Load bank voltage whose corrected value lies on `SLOPE * log10(j + x) + intercept`
fn load_voltage(j: f64, intercept: f64) -> f64 {
    let crossover = CROSSOVER_AMPS * 1000.0 / AREA;
    let corrected = SLOPE * (j + crossover).log10() + intercept;
    corrected - j / 1000.0 * HFR - j * R_PROTON / 1000.0
}

/// Averaged polarization export with air rows, an earlier O2 run and the final O2 run
fn polarization_csv(intercept: f64) -> String {
    let mut csv = String::from(
        "Sub Protocol,Current Density FB (A/cm2),Load Bank Voltage (V),HFR (Ohm-cm2)\n",
    );
    writeln!(csv, "H2/Air Pol,0.1,0.8,{}", HFR).unwrap();
    writeln!(csv, "H2/Air Pol,1.0,0.6,{}", HFR).unwrap();
    for _ in 0..4 {
        writeln!(csv, "O2 Pol,0.5,0.1,{}", HFR).unwrap();
    }
    let cathodic = ANODIC.iter().rev();
    for &j in ANODIC.iter().chain(cathodic) {
        writeln!(
            csv,
            "O2 Pol,{},{},{}",
            j / 1000.0,
            load_voltage(j, intercept),
            HFR
        )
        .unwrap();
    }
    csv
}

/// Crossover export; only the trailing 100 samples are at steady state
fn crossover_text() -> String {
    let mut text = String::new();
    for i in 0..14 {
        writeln!(text, "# preamble line {}", i).unwrap();
    }
    writeln!(text, "Pt\tTime\tVolts\tAmps").unwrap();
    for i in 0..150 {
        let amps = if i < 50 { 0.005 } else { CROSSOVER_AMPS };
        writeln!(text, "{}\t{}\t0.4\t{}", i, i as f64, amps).unwrap();
    }
    text
}

fn write_stage(dir: &Path, intercept: f64) {
    fs::write(dir.join("pol.csv"), polarization_csv(intercept)).unwrap();
    fs::write(dir.join("h2x.txt"), crossover_text()).unwrap();
}

fn read_stage(dir: &Path, label: &str) -> MassActivityInput {
    let polarization = read_polarization_path(dir.join("pol.csv")).unwrap();
    let layout = TableLayout::exported_text();
    let crossover_amps = PotentiostatTable::from_path(dir.join("h2x.txt"), layout)
        .unwrap()
        .column(CURRENT_COLUMNS)
        .unwrap();
    MassActivityInput {
        label: label.to_string(),
        polarization,
        crossover_amps,
    }
}

fn params() -> TafelParams {
    TafelParams {
        r_proton: R_PROTON,
        ..TafelParams::default()
    }
}

/// Mass activity of a line with the given intercept, mA/mg_Pt
fn expected_mass_activity(intercept: f64) -> f64 {
    let current = 10f64.powf((0.9 - intercept) / SLOPE);
    current * AREA / (platinum_mass_g(LOADING, AREA) * 1000.0)
}

fn assert_close(got: f64, want: f64, tol: f64) {
    assert!(
        ((got - want) / want).abs() < tol,
        "got {got}, expected {want}"
    );
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_mass_activity_from_files() {
    let dir = tempdir().unwrap();
    write_stage(dir.path(), 0.83);
    let input = read_stage(dir.path(), "BOT");
    assert_eq!(input.polarization.len(), 26);
    assert_eq!(input.crossover_amps.len(), 150);

    let cell = Cell::new("ST8C5", AREA, LOADING).unwrap();
    let reduction = reduce_mass_activity(&input, &cell, &params(), 10).unwrap();

    assert_eq!(reduction.sweeps.anodic.len(), 10);
    assert_eq!(reduction.sweeps.tafel_points().len(), 9);
    assert_eq!(reduction.sweeps.incomplete(), 0);
    // Cathodic sweep is reported in ascending current order
    let cathodic: Vec<f64> = reduction
        .sweeps
        .cathodic
        .iter()
        .flatten()
        .map(|p| p.current_density)
        .collect();
    assert_eq!(cathodic.len(), 10);
    assert!(cathodic.windows(2).all(|w| w[0] <= w[1]));

    assert_close(reduction.fit.crossover, 0.02, 1e-9);
    assert_close(reduction.fit.slope(), SLOPE, 1e-6);
    assert_close(reduction.fit.intercept(), 0.83, 1e-6);
    assert_eq!(reduction.fit.line.n, 9);
    assert_close(reduction.mass_activity, expected_mass_activity(0.83), 1e-6);
}

#[test]
fn test_stage_comparison() {
    let root = tempdir().unwrap();
    let mut inputs = Vec::new();
    for (label, intercept) in [("BOT", 0.83), ("30K", 0.82), ("60K", 0.81)] {
        let dir = root.path().join(label);
        fs::create_dir(&dir).unwrap();
        write_stage(&dir, intercept);
        inputs.push(read_stage(&dir, label));
    }

    let mut cell = Cell::new("ST8C5", AREA, LOADING).unwrap();
    let results = reduce_mass_activity_cycles(&inputs, &cell, &params(), 10);
    let reductions: Vec<_> = results.into_iter().map(Result::unwrap).collect();
    let labels: Vec<&str> = reductions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["BOT", "30K", "60K"]);

    merge(&mut cell, &reductions).unwrap();

    let activity = cell.series(MetricKind::Activity);
    assert_eq!(activity.len(), 3);
    for ((_, got), intercept) in activity.iter().zip([0.83, 0.82, 0.81]) {
        assert_close(*got, expected_mass_activity(intercept), 1e-6);
    }

    let changes = cell.relative_change(MetricKind::Activity);
    let want = 100.0 * (expected_mass_activity(0.81) / expected_mass_activity(0.83) - 1.0);
    assert!(changes[2].1 < 0.0);
    assert_close(changes[2].1, want, 1e-6);
}

#[test]
fn test_failed_stage_keeps_position() {
    let dir = tempdir().unwrap();
    write_stage(dir.path(), 0.83);
    let good = read_stage(dir.path(), "BOT");
    let mut short = read_stage(dir.path(), "30K");
    short.polarization.truncate(12);

    let cell = Cell::new("ST8C5", AREA, LOADING).unwrap();
    let results = reduce_mass_activity_cycles(&[good, short], &cell, &params(), 10);

    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(PipelineError::Tafel(TafelError::MissingO2Sweeps {
            required: 20,
            found: 10,
        }))
    ));
}

#[test]
fn test_merge_rejects_geometric_basis_cell() {
    let dir = tempdir().unwrap();
    write_stage(dir.path(), 0.83);
    let input = read_stage(dir.path(), "BOT");

    let mut cell = Cell::new("ST8C5", AREA, LOADING).unwrap();
    let branch = BranchArea {
        start: 0,
        end: 10,
        baseline_level: 0.0,
        charge: 0.04,
        area: 0.19,
    };
    let area = AreaResult {
        upper: branch.clone(),
        lower: branch,
    };
    cell.record(CycleResult::ecsa_per_area("BOT", &area)).unwrap();

    let reduction = reduce_mass_activity(&input, &cell, &params(), 10).unwrap();
    let err = merge(&mut cell, [&reduction]).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Metrics(MetricsError::UnitMismatch { .. })
    ));
    assert_eq!(cell.series(MetricKind::Activity).len(), 0);
}
