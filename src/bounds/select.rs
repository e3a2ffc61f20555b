use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{snap_points, BoundsError, Point};
use crate::extrema;
use crate::series::Sweep;

/// Number of picked points a bound selection consumes
pub const ANCHOR_POINTS: usize = 4;

/// How the outer start/end bounds are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SelectionMode {
    /// Sample nearest a reference voltage inside each anchor sub-range
    Voltage {
        /// Upper branch start voltage (V)
        v_up: f64,
        /// Lower branch end voltage (V)
        v_down: f64,
    },
    /// First local minimum / last local maximum of the current
    Edge,
}

impl SelectionMode {
    /// Build a mode from its name and optional reference voltages.
    ///
    /// Names are case-insensitive; `v` and `e` are accepted as short forms.
    pub fn from_parts(
        name: &str,
        v_up: Option<f64>,
        v_down: Option<f64>,
    ) -> Result<Self, BoundsError> {
        match name.parse::<ModeKind>()? {
            ModeKind::Voltage => Ok(SelectionMode::Voltage {
                v_up: v_up.ok_or(BoundsError::MissingVoltage("v_up"))?,
                v_down: v_down.ok_or(BoundsError::MissingVoltage("v_down"))?,
            }),
            ModeKind::Edge => Ok(SelectionMode::Edge),
        }
    }

    /// Mode name without parameters
    pub fn kind(&self) -> ModeKind {
        match self {
            SelectionMode::Voltage { .. } => ModeKind::Voltage,
            SelectionMode::Edge => ModeKind::Edge,
        }
    }
}

/// Parameterless selection mode name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    /// Voltage-targeted bounds
    Voltage,
    /// Extremum-edge bounds
    Edge,
}

impl FromStr for ModeKind {
    type Err = BoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "voltage" | "v" => Ok(ModeKind::Voltage),
            "edge" | "e" => Ok(ModeKind::Edge),
            _ => Err(BoundsError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Voltage => write!(f, "voltage"),
            ModeKind::Edge => write!(f, "edge"),
        }
    }
}

/// Four snapped anchor indices `[i0, i1, i2, i3]`.
///
/// `i0..i1` is the upper-branch search window and `i2..i3` the lower-branch
/// one, both half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors(pub [usize; ANCHOR_POINTS]);

impl Anchors {
    /// Snap the first four points onto the sweep
    pub fn from_points(sweep: &Sweep, points: &[Point]) -> Result<Self, BoundsError> {
        if sweep.is_empty() {
            return Err(BoundsError::EmptySweep);
        }
        if points.len() < ANCHOR_POINTS {
            return Err(BoundsError::InsufficientPoints {
                required: ANCHOR_POINTS,
                supplied: points.len(),
            });
        }
        let snapped = snap_points(
            sweep.potential(),
            sweep.current_density(),
            &points[..ANCHOR_POINTS],
        );
        let anchors = [snapped[0], snapped[1], snapped[2], snapped[3]];
        debug!("Snapped picking points to anchors {:?}", anchors);
        Ok(Anchors(anchors))
    }

    /// Upper-branch search window
    pub fn upper(&self) -> (usize, usize) {
        (self.0[0], self.0[1])
    }

    /// Lower-branch search window
    pub fn lower(&self) -> (usize, usize) {
        (self.0[2], self.0[3])
    }
}

/// Integration bounds of the upper and lower branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundarySet {
    /// Upper branch start
    pub up_start: usize,
    /// Upper branch end (minimum current of the upper window)
    pub up_end: usize,
    /// Lower branch start (maximum current of the lower window)
    pub down_start: usize,
    /// Lower branch end
    pub down_end: usize,
}

impl BoundarySet {
    /// Validated bounds for a series of `len` samples
    pub fn new(
        up_start: usize,
        up_end: usize,
        down_start: usize,
        down_end: usize,
        len: usize,
    ) -> Result<Self, BoundsError> {
        let bounds = Self {
            up_start,
            up_end,
            down_start,
            down_end,
        };
        bounds.validate(len)?;
        Ok(bounds)
    }

    /// Check ordering and that every index lies in `0..len`
    pub fn validate(&self, len: usize) -> Result<(), BoundsError> {
        for index in [self.up_start, self.up_end, self.down_start, self.down_end] {
            if index >= len {
                return Err(BoundsError::OutOfRange { index, len });
            }
        }
        if self.up_start > self.up_end {
            return Err(BoundsError::InvertedBounds {
                branch: "upper",
                start: self.up_start,
                end: self.up_end,
            });
        }
        if self.down_start > self.down_end {
            return Err(BoundsError::InvertedBounds {
                branch: "lower",
                start: self.down_start,
                end: self.down_end,
            });
        }
        Ok(())
    }
}

fn window(len: usize, (start, end): (usize, usize)) -> Result<std::ops::Range<usize>, BoundsError> {
    if end > len {
        return Err(BoundsError::OutOfRange { index: end, len });
    }
    if start >= end {
        return Err(BoundsError::EmptySubrange { start, end });
    }
    Ok(start..end)
}

/// First index in `range` whose value is best under `better`
fn first_best<F>(values: &[f64], range: std::ops::Range<usize>, better: F) -> usize
where
    F: Fn(f64, f64) -> bool,
{
    let start = range.start;
    range.fold(start, |best, i| {
        if better(values[i], values[best]) {
            i
        } else {
            best
        }
    })
}

fn nearest_voltage(potential: &[f64], range: std::ops::Range<usize>, target: f64) -> usize {
    let start = range.start;
    range.fold(start, |best, i| {
        if (potential[i] - target).abs() < (potential[best] - target).abs() {
            i
        } else {
            best
        }
    })
}

/// Resolve the four integration bounds from snapped anchors.
///
/// The upper end is always the minimum current in `i0..i1` and the lower
/// start the maximum current in `i2..i3`; `mode` only decides the upper
/// start and the lower end.
pub fn select(
    sweep: &Sweep,
    anchors: &Anchors,
    mode: &SelectionMode,
) -> Result<BoundarySet, BoundsError> {
    let len = sweep.len();
    let upper = window(len, anchors.upper())?;
    let lower = window(len, anchors.lower())?;
    let current = sweep.current_density();
    let potential = sweep.potential();

    let up_end = first_best(current, upper.clone(), |a, b| a < b);
    let down_start = first_best(current, lower.clone(), |a, b| a > b);

    let (up_start, down_end) = match *mode {
        SelectionMode::Voltage { v_up, v_down } => (
            nearest_voltage(potential, upper, v_up),
            nearest_voltage(potential, lower, v_down),
        ),
        SelectionMode::Edge => {
            let found = extrema::locate(current);
            (
                found
                    .first_minimum()
                    .ok_or(BoundsError::MissingExtremum("minimum"))?,
                found
                    .last_maximum()
                    .ok_or(BoundsError::MissingExtremum("maximum"))?,
            )
        }
    };

    debug!(
        "{} bounds: upper {}..={}, lower {}..={}",
        mode.kind(),
        up_start,
        up_end,
        down_start,
        down_end
    );

    BoundarySet::new(up_start, up_end, down_start, down_end, len)
}

/// Snap picked points and resolve bounds in one step
pub fn select_from_points(
    sweep: &Sweep,
    points: &[Point],
    mode: &SelectionMode,
) -> Result<BoundarySet, BoundsError> {
    let anchors = Anchors::from_points(sweep, points)?;
    select(sweep, &anchors, mode)
}
