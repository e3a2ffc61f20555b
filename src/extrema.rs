//! Relative extrema of a sampled signal.
//!
//! A sample is a local minimum (maximum) when it is strictly smaller
//! (larger) than every neighbour within `order` samples on both sides.
//! Neighbour positions past either end are clamped to the end sample, so the
//! first and last samples are never reported. Flat runs produce no extremum.

use serde::{Deserialize, Serialize};

/// Comparison window used by [`locate`]
pub const DEFAULT_ORDER: usize = 1;

/// Indices of local minima and maxima, each in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extrema {
    /// Local minimum indices
    pub minima: Vec<usize>,
    /// Local maximum indices
    pub maxima: Vec<usize>,
}

impl Extrema {
    /// First local minimum, if any
    pub fn first_minimum(&self) -> Option<usize> {
        self.minima.first().copied()
    }

    /// Last local maximum, if any
    pub fn last_maximum(&self) -> Option<usize> {
        self.maxima.last().copied()
    }

    /// True when neither minima nor maxima were found
    pub fn is_empty(&self) -> bool {
        self.minima.is_empty() && self.maxima.is_empty()
    }
}

/// Locate extrema with the default window of one neighbour per side
pub fn locate(signal: &[f64]) -> Extrema {
    locate_with_order(signal, DEFAULT_ORDER)
}

/// Locate extrema comparing against `order` neighbours per side
pub fn locate_with_order(signal: &[f64], order: usize) -> Extrema {
    Extrema {
        minima: relative(signal, order, |a, b| a < b),
        maxima: relative(signal, order, |a, b| a > b),
    }
}

fn relative<F>(signal: &[f64], order: usize, cmp: F) -> Vec<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;

    (0..n)
        .filter(|&i| {
            (1..=order.max(1)).all(|shift| {
                let ahead = (i + shift).min(last);
                let behind = i.saturating_sub(shift);
                cmp(signal[i], signal[ahead]) && cmp(signal[i], signal[behind])
            })
        })
        .collect()
}
