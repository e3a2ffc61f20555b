use log::info;
use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::metrics::{Cell, CycleResult};
use crate::series::PolarizationRecord;
use crate::tafel::{fit, o2_sweeps, FitResult, O2Sweeps, TafelParams};

/// Polarization and crossover data of one test stage.
#[derive(Debug, Clone)]
pub struct MassActivityInput {
    /// Stage label
    pub label: String,
    /// Averaged polarization rows
    pub polarization: Vec<PolarizationRecord>,
    /// Crossover measurement current (A)
    pub crossover_amps: Vec<f64>,
}

/// Result of a mass activity reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassActivityReduction {
    /// Stage label
    pub label: String,
    /// O2 sweeps the fit was drawn from
    pub sweeps: O2Sweeps,
    /// Tafel fit
    pub fit: FitResult,
    /// Mass activity at the reference voltage (mA/mg_Pt)
    pub mass_activity: f64,
}

impl MassActivityReduction {
    /// Values to merge into the owning cell
    pub fn cycle_result(&self) -> CycleResult {
        CycleResult::mass_activity(self.label.clone(), self.mass_activity)
    }
}

/// Select O2 sweeps, fit and normalize one stage
pub fn reduce_mass_activity(
    input: &MassActivityInput,
    cell: &Cell,
    params: &TafelParams,
    sweep_points: usize,
) -> Result<MassActivityReduction, PipelineError> {
    let sweeps = o2_sweeps(&input.polarization, sweep_points)?;
    let fit = fit(
        &sweeps.tafel_points(),
        &input.crossover_amps,
        cell.area_cm2(),
        params,
    )?;
    let mass_activity = fit.mass_activity(cell.loading_mg_cm2(), cell.area_cm2())?;

    info!(
        "{}: i({} V) = {:.4} mA/cm2, MA = {:.4} mA/mg_Pt",
        input.label, fit.reference_voltage, fit.reference_current, mass_activity
    );

    Ok(MassActivityReduction {
        label: input.label.clone(),
        sweeps,
        fit,
        mass_activity,
    })
}

/// Reduce independent stages of one cell.
///
/// With the `parallel` feature the stages run on the rayon pool. Results
/// keep input order and are not recorded; merge them with [`merge`].
pub fn reduce_mass_activity_cycles(
    inputs: &[MassActivityInput],
    cell: &Cell,
    params: &TafelParams,
    sweep_points: usize,
) -> Vec<Result<MassActivityReduction, PipelineError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        inputs
            .par_iter()
            .map(|input| reduce_mass_activity(input, cell, params, sweep_points))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs
            .iter()
            .map(|input| reduce_mass_activity(input, cell, params, sweep_points))
            .collect()
    }
}

/// Record every stage on the cell in order, stopping at the first failure
pub fn merge<'a, I>(cell: &mut Cell, results: I) -> Result<(), PipelineError>
where
    I: IntoIterator<Item = &'a MassActivityReduction>,
{
    for reduction in results {
        cell.record(reduction.cycle_result())?;
    }
    Ok(())
}
