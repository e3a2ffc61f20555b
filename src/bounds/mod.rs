//! # Bounds Module
//!
//! Resolves where baseline subtraction starts and ends on the upper
//! (hydrogen desorption) and lower (adsorption) branches of a CV cycle.
//!
//! Picked points arrive as plain data: each is snapped to the nearest sample
//! in the (potential, current density) plane, giving four anchors. The anchors
//! bound two search windows, inside which the selection mode places the outer
//! bounds and the current extrema place the inner ones.

mod error;
mod select;
mod snap;

#[cfg(test)]
mod tests;

pub use error::BoundsError;
pub use select::{
    select, select_from_points, Anchors, BoundarySet, ModeKind, SelectionMode, ANCHOR_POINTS,
};
pub use snap::{snap, snap_points, Point};
