//! # Series Module
//!
//! Typed records for potentiostat and polarization exports and the
//! extraction of aligned potential / current-density / time windows.
//!
//! Tabular files are validated once at this boundary; everything downstream
//! works on [`CvScan`], [`Sweep`] and [`PolarizationRecord`] values and never
//! looks columns up by name.

mod error;
mod extract;
mod record;
mod table;


pub use error::SeriesError;
pub use extract::{density_factor, extract, IndexRange, Sweep};
pub use record::{elapsed_time, CvScan, PolarizationRecord};
pub use table::{
    delimiter_for, read_polarization, read_polarization_path, PotentiostatTable, TableLayout,
    CURRENT_COLUMNS, POTENTIAL_COLUMNS, TIME_COLUMNS,
};
