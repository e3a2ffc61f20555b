//! # Tafel Module
//!
//! Crossover-corrected Tafel analysis of O2 polarization curves.
//!
//! The steady-state hydrogen crossover current is added back to the
//! measured current, the voltage is corrected for ohmic (HFR) and proton
//! transport losses, and a line is fitted to corrected voltage against
//! log10 current in the kinetic region above a voltage cutoff. Inverting the
//! line at the reference voltage gives the current density from which mass
//! activity follows.

mod crossover;
mod error;
mod fit;
mod sweep;


pub use crossover::{crossover_density, DEFAULT_CROSSOVER_WINDOW};
pub use error::TafelError;
pub use fit::{
    corrected_voltage, filter_kinetic, fit, least_squares, mass_activity, tafel_points,
    FitResult, LinearFit, TafelParams, TafelPoint,
};
pub use sweep::{o2_sweeps, O2Sweeps, PolarizationPoint, DEFAULT_SWEEP_POINTS};
