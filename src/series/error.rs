/// Errors that can occur while loading or extracting a series
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Index window reaches outside the source series
    #[error("Index range {start}..{end} exceeds series of length {len}")]
    Range {
        /// First requested index
        start: usize,
        /// One past the last requested index
        end: usize,
        /// Length of the source series
        len: usize,
    },

    /// I/O error reading a table
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column not present in the table header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Cell that should hold a number does not
    #[error("Row {row}, column '{column}': cannot parse '{value}' as a number")]
    Parse {
        /// Zero-based data row
        row: usize,
        /// Column name
        column: String,
        /// Offending text
        value: String,
    },

    /// Aligned columns of different lengths
    #[error("Column length mismatch: potential={potential}, current={current}, time={time}")]
    LengthMismatch {
        /// Potential samples
        potential: usize,
        /// Current samples
        current: usize,
        /// Time samples
        time: usize,
    },

    /// Electrode area must be strictly positive
    #[error("Electrode area must be positive, got {0}")]
    InvalidArea(f64),
}
