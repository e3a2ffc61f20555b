use super::IntegrationError;

/// Trapezoid rule over a possibly non-uniform axis.
///
/// Sums `(f[i] + f[i+1]) / 2 * (t[i+1] - t[i])`; fewer than two samples
/// integrate to zero.
pub fn trapezoid(values: &[f64], time: &[f64]) -> Result<f64, IntegrationError> {
    if values.len() != time.len() {
        return Err(IntegrationError::LengthMismatch {
            values: values.len(),
            time: time.len(),
        });
    }
    Ok(values
        .windows(2)
        .zip(time.windows(2))
        .map(|(f, t)| 0.5 * (f[0] + f[1]) * (t[1] - t[0]))
        .sum())
}

/// Integral of `current` minus integral of `baseline`, both over `time`
pub fn branch_charge(
    current: &[f64],
    baseline: &[f64],
    time: &[f64],
) -> Result<f64, IntegrationError> {
    Ok(trapezoid(current, time)? - trapezoid(baseline, time)?)
}
