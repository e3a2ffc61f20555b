//! # Pipeline Module
//!
//! End-to-end reductions: raw series in, [`EcsaReduction`] or
//! [`MassActivityReduction`] out. Reductions only read the [`Cell`]
//! (area and loading); recording their results is left to the caller.
//!
//! [`Cell`]: crate::metrics::Cell

mod ecsa;
mod error;
mod mass_activity;

pub use ecsa::{reduce_ecsa, EcsaInput, EcsaReduction};
pub use error::PipelineError;
pub use mass_activity::{
    merge, reduce_mass_activity, reduce_mass_activity_cycles, MassActivityInput,
    MassActivityReduction,
};
