/// Errors raised while resolving integration bounds
#[derive(Debug, thiserror::Error)]
pub enum BoundsError {
    /// Selection mode is neither voltage nor edge
    #[error("Invalid selection mode '{0}' (expected 'voltage' or 'edge')")]
    InvalidMode(String),

    /// Voltage mode without one of its reference voltages
    #[error("Voltage mode requires '{0}'")]
    MissingVoltage(&'static str),

    /// Anchor sub-range contains no samples
    #[error("Sub-range {start}..{end} is empty")]
    EmptySubrange {
        /// First anchor index
        start: usize,
        /// Second anchor index
        end: usize,
    },

    /// Bounds requested on a sweep with no samples
    #[error("Sweep has no samples to place bounds on")]
    EmptySweep,

    /// Fewer picking points than the selection requires
    #[error("Bound selection needs {required} points, got {supplied}")]
    InsufficientPoints {
        /// Points required
        required: usize,
        /// Points supplied
        supplied: usize,
    },

    /// Edge mode on a signal without the needed extremum
    #[error("Current signal has no local {0} for edge selection")]
    MissingExtremum(&'static str),

    /// Branch start lies after its end
    #[error("{branch} branch start {start} is after its end {end}")]
    InvertedBounds {
        /// "upper" or "lower"
        branch: &'static str,
        /// Start index
        start: usize,
        /// End index
        end: usize,
    },

    /// Index outside the sweep
    #[error("Index {index} outside sweep of length {len}")]
    OutOfRange {
        /// Offending index
        index: usize,
        /// Sweep length
        len: usize,
    },
}
