//! # fcmetrics - Fuel-Cell Catalyst Metrics
//!
//! `fcmetrics` reduces raw electrochemical test-cell recordings into the two
//! scalar metrics used to track catalyst degradation: Electrochemical Surface
//! Area (ECSA) from cyclic voltammetry and Mass Activity (MA) at 0.9 V from
//! O2 polarization curves.
//!
//! ## Key Features
//!
//! - **Typed Inputs**: Potentiostat and polarization exports are validated once
//!   at the loading boundary into aligned numeric records.
//!
//! - **Reproducible Bound Selection**: Integration bounds come from picked
//!   points supplied as plain data, snapped to the nearest samples, plus a
//!   voltage target or the current extrema.
//!
//! - **Baseline-Subtracted Integration**: Hydrogen adsorption/desorption
//!   charge is integrated against elapsed time with the trapezoid rule on
//!   non-uniform spacing.
//!
//! - **Crossover-Corrected Tafel Fit**: HFR, proton transport and hydrogen
//!   crossover corrections are applied before a least-squares fit in the
//!   kinetic region.
//!
//! - **Explicit Aggregation**: Each reduction returns a value that the caller
//!   merges into its [`metrics::Cell`]; cells reject mixed normalization bases.
//!
//! ## Quick Start - ECSA
//!
//! ```rust
//! use fcmetrics::bounds::{Point, SelectionMode};
//! use fcmetrics::metrics::Cell;
//! use fcmetrics::pipeline::{reduce_ecsa, EcsaInput};
//! use fcmetrics::series::{CvScan, IndexRange};
//!
//! // One synthetic cycle: 0.05 -> 0.45 V and back, 50 cm2 electrode
//! let volts: Vec<f64> = (0..=20).map(|i| 0.05 + i as f64 * 0.02)
//!     .chain((0..=20).map(|i| 0.45 - i as f64 * 0.02))
//!     .collect();
//! let amps: Vec<f64> = (0..=20).map(|i| -0.01 - 0.02 * (i as f64 / 20.0))
//!     .chain((0..=20).map(|i| 0.03 - 0.02 * (i as f64 / 20.0)))
//!     .collect();
//! let scan = CvScan::with_sample_interval(volts, amps, 0.01)?;
//!
//! let cell = Cell::new("demo", 50.0, 0.253)?;
//! let input = EcsaInput {
//!     label: "BOT".to_string(),
//!     scan: &scan,
//!     range: IndexRange::full(scan.len()),
//!     points: vec![
//!         Point::new(0.05, -0.2),
//!         Point::new(0.45, -0.6),
//!         Point::new(0.45, 0.6),
//!         Point::new(0.05, 0.2),
//!     ],
//!     mode: SelectionMode::Voltage { v_up: 0.05, v_down: 0.05 },
//! };
//!
//! let reduction = reduce_ecsa(&input, &cell)?;
//! println!("ECSA upper: {:.2} m2/g", reduction.per_mass.upper);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Quick Start - Mass Activity
//!
//! ```rust
//! use fcmetrics::tafel::{fit, PolarizationPoint, TafelParams};
//!
//! // Points on V = -0.065 * log10(i) + 0.83 with no corrections
//! let points: Vec<PolarizationPoint> = [-2.0, -1.5, -1.0, -0.5]
//!     .iter()
//!     .map(|x: &f64| PolarizationPoint {
//!         current_density: 10f64.powf(*x),
//!         load_voltage: -0.065 * x + 0.83,
//!         hfr: 0.0,
//!     })
//!     .collect();
//! let crossover_amps = vec![0.0; 100];
//!
//! let result = fit(&points, &crossover_amps, 50.0, &TafelParams::default())?;
//! println!("i(0.9 V) = {:.3} mA/cm2", result.reference_current);
//! println!("MA = {:.3} mA/mg", result.mass_activity(0.253, 50.0)?);
//! # Ok::<(), fcmetrics::tafel::TafelError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`series`]: Typed records, table readers and window extraction
//! - [`extrema`]: Relative extrema of a sampled signal
//! - [`bounds`]: Nearest-sample snapping and integration bound selection
//! - [`integrate`]: Baseline construction, trapezoid integration and ECSA units
//! - [`tafel`]: Crossover estimate, O2 sweep selection and the Tafel fit
//! - [`metrics`]: Cell aggregate and per-stage results
//! - [`pipeline`]: End-to-end ECSA and mass activity reductions
//! - [`report`]: Text summaries and JSON export
//! - [`units`]: Physical constants and unit conversions

pub mod bounds;
pub mod extrema;
pub mod integrate;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod tafel;
pub mod units;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
