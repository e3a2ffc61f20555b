use log::debug;
use serde::{Deserialize, Serialize};

use super::{CvScan, SeriesError};

/// Index window into a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexRange {
    /// Contiguous half-open window `start..end`
    Span {
        /// First index
        start: usize,
        /// One past the last index
        end: usize,
    },
    /// Explicit list of indices, taken in order
    Explicit(Vec<usize>),
}

impl IndexRange {
    /// Contiguous window `start..end`
    pub fn span(start: usize, end: usize) -> Self {
        IndexRange::Span { start, end }
    }

    /// Window covering a whole series of `len` samples
    pub fn full(len: usize) -> Self {
        IndexRange::Span { start: 0, end: len }
    }

    /// The final `count` indices of a series of `len` samples
    pub fn tail(len: usize, count: usize) -> Self {
        IndexRange::Span {
            start: len.saturating_sub(count),
            end: len,
        }
    }

    /// Number of indices selected
    pub fn len(&self) -> usize {
        match self {
            IndexRange::Span { start, end } => end.saturating_sub(*start),
            IndexRange::Explicit(indices) => indices.len(),
        }
    }

    /// True when no index is selected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every index lies inside a series of `len` samples
    pub fn check(&self, len: usize) -> Result<(), SeriesError> {
        match self {
            IndexRange::Span { start, end } => {
                if start > end || *end > len {
                    return Err(SeriesError::Range {
                        start: *start,
                        end: *end,
                        len,
                    });
                }
            }
            IndexRange::Explicit(indices) => {
                if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
                    return Err(SeriesError::Range {
                        start: bad,
                        end: bad + 1,
                        len,
                    });
                }
            }
        }
        Ok(())
    }

    fn gather(&self, values: &[f64]) -> Vec<f64> {
        match self {
            IndexRange::Span { start, end } => values[*start..*end].to_vec(),
            IndexRange::Explicit(indices) => indices.iter().map(|&i| values[i]).collect(),
        }
    }
}

/// Aligned potential, current density and time arrays of one extracted window.
///
/// Potential is in V, current density in mA/cm^2 and time in s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    potential: Vec<f64>,
    current_density: Vec<f64>,
    time: Vec<f64>,
}

impl Sweep {
    /// Build a sweep from aligned arrays that are already in density units
    pub fn from_parts(
        potential: Vec<f64>,
        current_density: Vec<f64>,
        time: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if potential.len() != current_density.len() || potential.len() != time.len() {
            return Err(SeriesError::LengthMismatch {
                potential: potential.len(),
                current: current_density.len(),
                time: time.len(),
            });
        }
        Ok(Self {
            potential,
            current_density,
            time,
        })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.potential.len()
    }

    /// True when the sweep holds no samples
    pub fn is_empty(&self) -> bool {
        self.potential.is_empty()
    }

    /// Potential (V)
    pub fn potential(&self) -> &[f64] {
        &self.potential
    }

    /// Current density (mA/cm^2)
    pub fn current_density(&self) -> &[f64] {
        &self.current_density
    }

    /// Elapsed time (s)
    pub fn time(&self) -> &[f64] {
        &self.time
    }
}

/// Amps to mA/cm^2 for an electrode of `area_cm2`
pub fn density_factor(area_cm2: f64) -> Result<f64, SeriesError> {
    if area_cm2 <= 0.0 || !area_cm2.is_finite() {
        return Err(SeriesError::InvalidArea(area_cm2));
    }
    Ok(1000.0 / area_cm2)
}

/// Extract the window `range` of `scan`, rescaling current to mA/cm^2.
pub fn extract(scan: &CvScan, range: &IndexRange, area_cm2: f64) -> Result<Sweep, SeriesError> {
    range.check(scan.len())?;
    let factor = density_factor(area_cm2)?;

    let potential = range.gather(scan.volts());
    let current_density = range
        .gather(scan.amps())
        .into_iter()
        .map(|a| a * factor)
        .collect();
    let time = range.gather(scan.time());

    debug!(
        "Extracted {} of {} samples (area {} cm2)",
        range.len(),
        scan.len(),
        area_cm2
    );

    Ok(Sweep {
        potential,
        current_density,
        time,
    })
}
