use log::info;
use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::bounds::{select, Anchors, BoundarySet, Point, SelectionMode};
use crate::extrema::{self, Extrema};
use crate::integrate::{integrate, AreaResult, MassAreaResult};
use crate::metrics::{Cell, CycleResult};
use crate::series::{extract, CvScan, IndexRange};

/// Everything needed to reduce one CV cycle to ECSA.
#[derive(Debug, Clone)]
pub struct EcsaInput<'a> {
    /// Stage label
    pub label: String,
    /// Full recording
    pub scan: &'a CvScan,
    /// Window holding the last full cycle
    pub range: IndexRange,
    /// Picked points, in the sweep's potential / current-density units
    pub points: Vec<Point>,
    /// Outer bound placement
    pub mode: SelectionMode,
}

/// Result of an ECSA reduction with the intermediate decisions kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcsaReduction {
    /// Stage label
    pub label: String,
    /// Local extrema of the current in the window
    pub extrema: Extrema,
    /// Snapped anchors
    pub anchors: Anchors,
    /// Mode used
    pub mode: SelectionMode,
    /// Resolved bounds, relative to the window
    pub bounds: BoundarySet,
    /// ECSA per geometric area
    pub area: AreaResult,
    /// ECSA per platinum mass
    pub per_mass: MassAreaResult,
}

impl EcsaReduction {
    /// Values to merge into the owning cell
    pub fn cycle_result(&self) -> CycleResult {
        CycleResult::ecsa_per_mass(self.label.clone(), &self.per_mass)
    }
}

/// Extract, select bounds, integrate and normalize one CV cycle
pub fn reduce_ecsa(input: &EcsaInput<'_>, cell: &Cell) -> Result<EcsaReduction, PipelineError> {
    let sweep = extract(input.scan, &input.range, cell.area_cm2())?;
    let extrema = extrema::locate(sweep.current_density());
    let anchors = Anchors::from_points(&sweep, &input.points)?;
    let bounds = select(&sweep, &anchors, &input.mode)?;
    let area = integrate(&sweep, &bounds)?;
    let per_mass = area.per_mass(cell.loading_mg_cm2(), cell.area_cm2())?;

    info!(
        "{}: ECSA upper {:.3} / lower {:.3} m2_Pt/g_Pt",
        input.label, per_mass.upper, per_mass.lower
    );

    Ok(EcsaReduction {
        label: input.label.clone(),
        extrema,
        anchors,
        mode: input.mode,
        bounds,
        area,
        per_mass,
    })
}
