use log::{debug, warn};

use super::TafelError;
use crate::units::MILLI;

/// Samples averaged for the steady-state crossover current
pub const DEFAULT_CROSSOVER_WINDOW: usize = 100;

/// Steady-state hydrogen crossover current density in mA/cm^2.
///
/// Averages the final `window` samples of the crossover measurement (in A)
/// and divides by the electrode area.
pub fn crossover_density(amps: &[f64], window: usize, area_cm2: f64) -> Result<f64, TafelError> {
    if amps.is_empty() || window == 0 {
        return Err(TafelError::EmptyCrossover);
    }
    if area_cm2 <= 0.0 || !area_cm2.is_finite() {
        return Err(TafelError::InvalidArea(area_cm2));
    }
    if amps.len() < window {
        warn!(
            "Crossover series has {} samples, averaging all of them instead of {}",
            amps.len(),
            window
        );
    }

    let tail = &amps[amps.len().saturating_sub(window)..];
    let mean = tail.iter().sum::<f64>() / tail.len() as f64;
    let density = mean * MILLI / area_cm2;

    debug!("Crossover current {:.5} mA/cm2 from {} samples", density, tail.len());
    Ok(density)
}
