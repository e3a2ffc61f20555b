/// Errors raised by the crossover-corrected Tafel fit
#[derive(Debug, thiserror::Error)]
pub enum TafelError {
    /// Corrected current density not positive, so its logarithm is undefined
    #[error("Corrected current density {value} at point {index} is not positive")]
    Domain {
        /// Point index in the polarization sweep
        index: usize,
        /// Corrected current density (mA/cm^2)
        value: f64,
    },

    /// Too few points left to fit after the voltage cutoff
    #[error("Need at least {required} fit points, found {found}")]
    InsufficientData {
        /// Points required
        required: usize,
        /// Points available
        found: usize,
    },

    /// Fit has zero slope or the log-current values have no spread
    #[error("Degenerate Tafel fit: {0}")]
    DegenerateFit(String),

    /// Crossover series holds no samples
    #[error("Crossover current series is empty")]
    EmptyCrossover,

    /// Not enough O2 rows for an anodic and a cathodic sweep
    #[error("Need {required} O2 polarization rows, found {found}")]
    MissingO2Sweeps {
        /// Rows required
        required: usize,
        /// Rows found
        found: usize,
    },

    /// Paired regression inputs differ in length
    #[error("Regression inputs differ in length: {x} vs {y}")]
    LengthMismatch {
        /// Independent variable samples
        x: usize,
        /// Dependent variable samples
        y: usize,
    },

    /// Electrode area not strictly positive
    #[error("Electrode area must be positive, got {0}")]
    InvalidArea(f64),

    /// Catalyst loading or electrode area not strictly positive
    #[error("Loading ({loading} mg/cm2) and area ({area} cm2) must be positive")]
    InvalidLoading {
        /// Loading in mg/cm^2
        loading: f64,
        /// Area in cm^2
        area: f64,
    },
}
