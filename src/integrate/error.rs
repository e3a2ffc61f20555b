/// Errors raised by baseline integration
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// Boundary index outside the sweep
    #[error("Boundary index {index} outside sweep of length {len}")]
    OutOfRange {
        /// Offending index
        index: usize,
        /// Sweep length
        len: usize,
    },

    /// Branch window starts after it ends
    #[error("Branch window {start}..={end} is inverted")]
    InvertedWindow {
        /// Start index
        start: usize,
        /// End index
        end: usize,
    },

    /// Integrand and time axis differ in length
    #[error("Integrand has {values} samples but time axis has {time}")]
    LengthMismatch {
        /// Integrand samples
        values: usize,
        /// Time samples
        time: usize,
    },

    /// Catalyst loading or electrode area not strictly positive
    #[error("Loading ({loading} mg/cm2) and area ({area} cm2) must be positive")]
    InvalidLoading {
        /// Loading in mg/cm^2
        loading: f64,
        /// Area in cm^2
        area: f64,
    },
}
