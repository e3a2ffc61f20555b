use log::debug;
use serde::{Deserialize, Serialize};

use super::{branch_charge, Baseline, IntegrationError};
use crate::bounds::BoundarySet;
use crate::series::Sweep;
use crate::units::{charge_to_roughness, platinum_mass_g, CM2_PER_M2};

/// Which side of the CV cycle a branch lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    /// Anchored at the minimum current of the upper window
    Upper,
    /// Anchored at the maximum current of the lower window
    Lower,
}

/// Integration window and result of one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchArea {
    /// First sample of the window
    pub start: usize,
    /// Last sample of the window (inclusive)
    pub end: usize,
    /// Current density of the horizontal baseline (mA/cm^2)
    pub baseline_level: f64,
    /// Baseline-subtracted charge (mA*s/cm^2)
    pub charge: f64,
    /// Pt area per geometric area (cm^2_Pt/cm^2)
    pub area: f64,
}

/// ECSA of both branches in cm^2_Pt per cm^2 geometric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaResult {
    /// Upper branch
    pub upper: BranchArea,
    /// Lower branch
    pub lower: BranchArea,
}

/// ECSA of both branches in m^2_Pt per g_Pt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassAreaResult {
    /// Upper branch
    pub upper: f64,
    /// Lower branch
    pub lower: f64,
}

impl AreaResult {
    /// Normalize by platinum mass
    pub fn per_mass(
        &self,
        loading_mg_cm2: f64,
        area_cm2: f64,
    ) -> Result<MassAreaResult, IntegrationError> {
        Ok(MassAreaResult {
            upper: area_per_mass(self.upper.area, loading_mg_cm2, area_cm2)?,
            lower: area_per_mass(self.lower.area, loading_mg_cm2, area_cm2)?,
        })
    }
}

/// cm^2_Pt/cm^2 to m^2_Pt/g_Pt
pub fn area_per_mass(
    roughness: f64,
    loading_mg_cm2: f64,
    area_cm2: f64,
) -> Result<f64, IntegrationError> {
    if loading_mg_cm2 <= 0.0 || area_cm2 <= 0.0 {
        return Err(IntegrationError::InvalidLoading {
            loading: loading_mg_cm2,
            area: area_cm2,
        });
    }
    let g_pt = platinum_mass_g(loading_mg_cm2, area_cm2);
    Ok(roughness * area_cm2 / (CM2_PER_M2 * g_pt))
}

fn integrate_branch(
    sweep: &Sweep,
    branch: Branch,
    start: usize,
    end: usize,
) -> Result<BranchArea, IntegrationError> {
    let potential = sweep.potential();
    let current = sweep.current_density();
    let time = sweep.time();

    // The baseline level sits at the anchor where the inner bound was found.
    let level = match branch {
        Branch::Upper => current[end],
        Branch::Lower => current[start],
    };
    let baseline = Baseline::horizontal(potential[start], potential[end], level);

    let window = start..end + 1;
    let line = baseline.sample(&potential[window.clone()]);
    let charge = branch_charge(&current[window.clone()], &line, &time[window])?;
    let charge = match branch {
        Branch::Upper => charge,
        Branch::Lower => charge.abs(),
    };

    debug!(
        "{:?} branch {}..={}: baseline {:.4} mA/cm2, charge {:.6} mA*s/cm2",
        branch, start, end, level, charge
    );

    Ok(BranchArea {
        start,
        end,
        baseline_level: level,
        charge,
        area: charge_to_roughness(charge),
    })
}

/// Baseline-subtracted ECSA of the upper and lower branches.
///
/// Both branches are integrated against elapsed time, so the result is a
/// charge; it is converted with the hydrogen monolayer charge density.
pub fn integrate(sweep: &Sweep, bounds: &BoundarySet) -> Result<AreaResult, IntegrationError> {
    let len = sweep.len();
    for index in [bounds.up_start, bounds.up_end, bounds.down_start, bounds.down_end] {
        if index >= len {
            return Err(IntegrationError::OutOfRange { index, len });
        }
    }
    for (start, end) in [
        (bounds.up_start, bounds.up_end),
        (bounds.down_start, bounds.down_end),
    ] {
        if start > end {
            return Err(IntegrationError::InvertedWindow { start, end });
        }
    }

    Ok(AreaResult {
        upper: integrate_branch(sweep, Branch::Upper, bounds.up_start, bounds.up_end)?,
        lower: integrate_branch(sweep, Branch::Lower, bounds.down_start, bounds.down_end)?,
    })
}
