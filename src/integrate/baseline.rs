use serde::{Deserialize, Serialize};

/// Straight line through two anchor points, clamped outside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Baseline {
    /// Line through `(x0, y0)` and `(x1, y1)`; anchors may come in either order
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        if x1 < x0 {
            Self {
                x0: x1,
                y0: y1,
                x1: x0,
                y1: y0,
            }
        } else {
            Self { x0, y0, x1, y1 }
        }
    }

    /// Constant `level` spanning `x0..x1`
    pub fn horizontal(x0: f64, x1: f64, level: f64) -> Self {
        Self::new(x0, level, x1, level)
    }

    /// Value at `x`; held at the anchor value beyond either anchor
    pub fn at(&self, x: f64) -> f64 {
        if x <= self.x0 {
            self.y0
        } else if x >= self.x1 {
            self.y1
        } else {
            self.y0 + (self.y1 - self.y0) * (x - self.x0) / (self.x1 - self.x0)
        }
    }

    /// Evaluate at every sample of `xs`
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.at(x)).collect()
    }
}
