use serde::{Deserialize, Serialize};

/// A picked point in the (potential, current density) plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Potential (V)
    pub x: f64,
    /// Current density (mA/cm^2)
    pub y: f64,
}

impl Point {
    /// New point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Index of the sample nearest to `target` in Euclidean distance.
///
/// Ties resolve to the lowest index. Returns `None` for an empty series.
pub fn snap(potential: &[f64], current: &[f64], target: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (&x, &y)) in potential.iter().zip(current).enumerate() {
        let d = (x - target.x).hypot(y - target.y);
        let closer = match best {
            Some((_, best_d)) => d < best_d || best_d.is_nan(),
            None => true,
        };
        if closer {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Snap every point in order; empty when the series is empty
pub fn snap_points(potential: &[f64], current: &[f64], points: &[Point]) -> Vec<usize> {
    points
        .iter()
        .filter_map(|&p| snap(potential, current, p))
        .collect()
}
