//! # Integrate Module
//!
//! Baseline-subtracted integration of the hydrogen adsorption/desorption
//! branches of a CV cycle, and the conversion of the resulting charge into
//! electrochemical surface area.

mod baseline;
mod ecsa;
mod error;
mod trapezoid;


pub use baseline::Baseline;
pub use ecsa::{area_per_mass, integrate, AreaResult, Branch, BranchArea, MassAreaResult};
pub use error::IntegrationError;
pub use trapezoid::{branch_charge, trapezoid};
