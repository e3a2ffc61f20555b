use super::Basis;

/// Errors raised while recording metrics on a cell
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Entry normalized differently from what the cell already holds
    #[error("Unit mismatch: cell '{cell}' holds {expected} values, got {found}")]
    UnitMismatch {
        /// Cell identifier
        cell: String,
        /// Basis already recorded
        expected: Basis,
        /// Basis of the rejected entry
        found: Basis,
    },

    /// Cell area or loading not strictly positive
    #[error("Cell '{id}' needs positive area and loading (got {area} cm2, {loading} mg/cm2)")]
    InvalidCell {
        /// Cell identifier
        id: String,
        /// Area in cm^2
        area: f64,
        /// Loading in mg/cm^2
        loading: f64,
    },
}
