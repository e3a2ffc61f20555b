use std::cmp::Ordering;

use log::warn;
use serde::{Deserialize, Serialize};

use super::TafelError;
use crate::series::PolarizationRecord;
use crate::units::MILLI;

/// Rows per O2 sweep direction in the averaged export
pub const DEFAULT_SWEEP_POINTS: usize = 10;

/// One polarization point with current density in mA/cm^2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarizationPoint {
    /// Current density (mA/cm^2)
    pub current_density: f64,
    /// Load bank voltage (V)
    pub load_voltage: f64,
    /// High-frequency resistance (Ohm*cm^2)
    pub hfr: f64,
}

impl PolarizationPoint {
    /// Point from an export row; `None` when a numeric cell was empty
    pub fn from_record(record: &PolarizationRecord) -> Option<Self> {
        Some(Self {
            current_density: record.current_density? * MILLI,
            load_voltage: record.load_voltage?,
            hfr: record.hfr?,
        })
    }
}

/// Anodic and cathodic O2 sweeps of the final polarization run.
///
/// Each entry is one export row; incomplete rows stay as `None` so the
/// split between the sweeps follows row positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct O2Sweeps {
    /// Sweep toward high current, in recorded order
    pub anodic: Vec<Option<PolarizationPoint>>,
    /// Sweep back toward open circuit, sorted by current density ascending
    /// with incomplete rows last
    pub cathodic: Vec<Option<PolarizationPoint>>,
}

impl O2Sweeps {
    /// Complete anodic points used for the Tafel fit; the final,
    /// highest-current row is left out.
    pub fn tafel_points(&self) -> Vec<PolarizationPoint> {
        self.anodic[..self.anodic.len().saturating_sub(1)]
            .iter()
            .flatten()
            .copied()
            .collect()
    }

    /// Rows in either sweep with an empty numeric cell
    pub fn incomplete(&self) -> usize {
        self.anodic
            .iter()
            .chain(&self.cathodic)
            .filter(|p| p.is_none())
            .count()
    }
}

/// Split the last `2 * points_per_sweep` O2 rows into anodic and cathodic sweeps
pub fn o2_sweeps(
    records: &[PolarizationRecord],
    points_per_sweep: usize,
) -> Result<O2Sweeps, TafelError> {
    let o2: Vec<&PolarizationRecord> = records.iter().filter(|r| r.is_o2()).collect();
    let required = 2 * points_per_sweep;
    if points_per_sweep == 0 || o2.len() < required {
        return Err(TafelError::MissingO2Sweeps {
            required,
            found: o2.len(),
        });
    }

    let last = &o2[o2.len() - required..];
    let (anodic, cathodic) = last.split_at(points_per_sweep);

    let anodic = anodic
        .iter()
        .map(|&r| PolarizationPoint::from_record(r))
        .collect();
    let mut cathodic: Vec<Option<PolarizationPoint>> = cathodic
        .iter()
        .map(|&r| PolarizationPoint::from_record(r))
        .collect();
    cathodic.sort_by(|a, b| match (a, b) {
        (Some(a), Some(b)) => a.current_density.total_cmp(&b.current_density),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let sweeps = O2Sweeps { anodic, cathodic };
    if sweeps.incomplete() > 0 {
        warn!(
            "{} O2 sweep rows have empty cells and are not fitted",
            sweeps.incomplete()
        );
    }
    Ok(sweeps)
}
