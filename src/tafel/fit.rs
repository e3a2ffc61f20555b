use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{crossover_density, PolarizationPoint, TafelError, DEFAULT_CROSSOVER_WINDOW};
use crate::units::{platinum_mass_g, MILLI, REFERENCE_VOLTAGE};

/// Minimum points for a line fit
const MIN_FIT_POINTS: usize = 2;

/// Relative spread below which log-current values count as identical
const SPREAD_TOLERANCE: f64 = 1e-12;

/// Parameters of the crossover-corrected Tafel fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TafelParams {
    /// Proton transport resistance of the catalyst layer (Ohm*cm^2)
    pub r_proton: f64,
    /// Only points with corrected voltage strictly above this are fitted (V)
    pub voltage_cutoff: f64,
    /// Voltage at which the fit is inverted (V)
    pub reference_voltage: f64,
    /// Trailing crossover samples averaged
    pub crossover_window: usize,
}

impl Default for TafelParams {
    fn default() -> Self {
        Self {
            r_proton: 0.0,
            voltage_cutoff: 0.85,
            reference_voltage: REFERENCE_VOLTAGE,
            crossover_window: DEFAULT_CROSSOVER_WINDOW,
        }
    }
}

/// A point on the Tafel plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TafelPoint {
    /// log10 of crossover-corrected current density (mA/cm^2)
    pub log_current: f64,
    /// HFR- and transport-corrected voltage (V)
    pub voltage: f64,
}

/// iR-free voltage of one point.
///
/// Adds the ohmic drop across the HFR (current converted to A/cm^2) and the
/// proton transport drop `j * r_proton / 1000`.
pub fn corrected_voltage(point: &PolarizationPoint, r_proton: f64) -> f64 {
    let j = point.current_density;
    point.load_voltage + j / MILLI * point.hfr + j * r_proton / MILLI
}

/// Apply voltage and crossover corrections to every point
pub fn tafel_points(
    points: &[PolarizationPoint],
    crossover: f64,
    r_proton: f64,
) -> Result<Vec<TafelPoint>, TafelError> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let corrected = p.current_density + crossover;
            if corrected <= 0.0 || !corrected.is_finite() {
                return Err(TafelError::Domain {
                    index,
                    value: corrected,
                });
            }
            Ok(TafelPoint {
                log_current: corrected.log10(),
                voltage: corrected_voltage(p, r_proton),
            })
        })
        .collect()
}

/// Keep points whose corrected voltage is strictly above `cutoff`
pub fn filter_kinetic(points: &[TafelPoint], cutoff: f64) -> Vec<TafelPoint> {
    points
        .iter()
        .filter(|p| p.voltage > cutoff)
        .copied()
        .collect()
}

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope
    pub slope: f64,
    /// Intercept
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Points fitted
    pub n: usize,
}

impl LinearFit {
    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// `x` where the line reaches `y`
    pub fn solve(&self, y: f64) -> Result<f64, TafelError> {
        if self.slope == 0.0 {
            return Err(TafelError::DegenerateFit("zero slope".to_string()));
        }
        Ok((y - self.intercept) / self.slope)
    }
}

/// Fit `y` against `x` by least squares.
///
/// Fails when fewer than two points are given, when `x` has no spread, or
/// when the slope comes out as zero.
pub fn least_squares(x: &[f64], y: &[f64]) -> Result<LinearFit, TafelError> {
    if x.len() != y.len() {
        return Err(TafelError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    let n = x.len();
    if n < MIN_FIT_POINTS {
        return Err(TafelError::InsufficientData {
            required: MIN_FIT_POINTS,
            found: n,
        });
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let sxx: f64 = x.iter().map(|v| (v - x_mean).powi(2)).sum();
    let sxy: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    let scale: f64 = x.iter().map(|v| v * v).sum();
    if sxx <= SPREAD_TOLERANCE * scale {
        return Err(TafelError::DegenerateFit(
            "log-current values have no spread".to_string(),
        ));
    }

    let slope = sxy / sxx;
    // A slope whose fitted rise is lost in rounding of y counts as flat.
    let y_scale = y.iter().map(|v| v * v).sum::<f64>().sqrt();
    if !slope.is_finite() || slope.abs() * sxx.sqrt() <= SPREAD_TOLERANCE * y_scale {
        return Err(TafelError::DegenerateFit(format!("slope is {slope}")));
    }
    let intercept = y_mean - slope * x_mean;

    let ss_tot: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        n,
    })
}

/// Outcome of a crossover-corrected Tafel fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Corrected voltage against log10 current density
    pub line: LinearFit,
    /// Steady-state crossover current density (mA/cm^2)
    pub crossover: f64,
    /// Voltage the fit was inverted at (V)
    pub reference_voltage: f64,
    /// Current density at the reference voltage (mA/cm^2)
    pub reference_current: f64,
    /// All corrected points, including those below the cutoff
    pub points: Vec<TafelPoint>,
}

impl FitResult {
    /// Fit slope
    pub fn slope(&self) -> f64 {
        self.line.slope
    }

    /// Fit intercept
    pub fn intercept(&self) -> f64 {
        self.line.intercept
    }

    /// Tafel slope in mV per decade
    pub fn tafel_slope_mv_dec(&self) -> f64 {
        self.line.slope * MILLI
    }

    /// Fitted voltage at a log10 current density
    pub fn predict(&self, log_current: f64) -> f64 {
        self.line.predict(log_current)
    }

    /// Reference current normalized by platinum mass, mA/mg_Pt
    pub fn mass_activity(&self, loading_mg_cm2: f64, area_cm2: f64) -> Result<f64, TafelError> {
        mass_activity(self.reference_current, loading_mg_cm2, area_cm2)
    }
}

/// Current density (mA/cm^2) to mass activity (mA/mg_Pt)
pub fn mass_activity(
    current_density: f64,
    loading_mg_cm2: f64,
    area_cm2: f64,
) -> Result<f64, TafelError> {
    if loading_mg_cm2 <= 0.0 || area_cm2 <= 0.0 {
        return Err(TafelError::InvalidLoading {
            loading: loading_mg_cm2,
            area: area_cm2,
        });
    }
    let g_pt = platinum_mass_g(loading_mg_cm2, area_cm2);
    Ok(current_density * area_cm2 / (g_pt * MILLI))
}

/// Crossover-corrected Tafel fit inverted at the reference voltage.
///
/// `points` is the kinetic sweep, `crossover_amps` the crossover
/// measurement in A.
pub fn fit(
    points: &[PolarizationPoint],
    crossover_amps: &[f64],
    area_cm2: f64,
    params: &TafelParams,
) -> Result<FitResult, TafelError> {
    let crossover = crossover_density(crossover_amps, params.crossover_window, area_cm2)?;
    let corrected = tafel_points(points, crossover, params.r_proton)?;

    let kinetic = filter_kinetic(&corrected, params.voltage_cutoff);
    debug!(
        "{} of {} points above {} V",
        kinetic.len(),
        corrected.len(),
        params.voltage_cutoff
    );
    if kinetic.len() < MIN_FIT_POINTS {
        return Err(TafelError::InsufficientData {
            required: MIN_FIT_POINTS,
            found: kinetic.len(),
        });
    }

    let x: Vec<f64> = kinetic.iter().map(|p| p.log_current).collect();
    let y: Vec<f64> = kinetic.iter().map(|p| p.voltage).collect();
    let line = least_squares(&x, &y)?;

    let log_reference = line.solve(params.reference_voltage)?;
    let reference_current = 10f64.powf(log_reference);
    if !reference_current.is_finite() || reference_current <= 0.0 {
        return Err(TafelError::DegenerateFit(format!(
            "reference current 10^{log_reference} is out of range"
        )));
    }

    info!(
        "Tafel fit: {:.1} mV/dec, i({} V) = {:.4} mA/cm2",
        line.slope * MILLI,
        params.reference_voltage,
        reference_current
    );

    Ok(FitResult {
        line,
        crossover,
        reference_voltage: params.reference_voltage,
        reference_current,
        points: corrected,
    })
}
