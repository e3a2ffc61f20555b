//! # Metrics Module
//!
//! Aggregation of derived metrics per test cell.
//!
//! Reductions return a [`CycleResult`] value; the caller merges it into the
//! owning [`Cell`] with [`Cell::record`]. A cell locks onto the normalization
//! basis of its first value, so per-mass and per-area numbers never mix in
//! one collection.

mod cell;
mod error;


pub use cell::{
    record, Basis, Cell, CellEntry, CycleResult, MetricKind, MetricValue, Unit,
};
pub use error::MetricsError;
