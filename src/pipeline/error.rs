use crate::bounds::BoundsError;
use crate::integrate::IntegrationError;
use crate::metrics::MetricsError;
use crate::series::SeriesError;
use crate::tafel::TafelError;

/// Errors from an end-to-end reduction
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Series loading or extraction failed
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Bound selection failed
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// Integration failed
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// Tafel fit failed
    #[error(transparent)]
    Tafel(#[from] TafelError),

    /// Recording on the cell failed
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}
