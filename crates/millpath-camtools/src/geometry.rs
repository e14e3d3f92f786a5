//! Shared geometry for the tool-path planners.
//!
//! Angle normalisation for the kept arc of a C-shape, evenly spaced arc
//! sampling, and the radial and depth pass schedules.

use std::f64::consts::{PI, TAU};

use crate::error::{ParameterError, ParameterResult};

/// Radial distance between passes as a fraction of the tool diameter.
pub const STEP_OVER_RATIO: f64 = 0.8;

/// Samples per arc in an exported program.
pub const EXPORT_ARC_SAMPLES: usize = 100;

/// Samples per arc in the 3D preview.
pub const PREVIEW_ARC_SAMPLES: usize = 50;

/// Upper bound on radial or depth passes for a single plan.
pub const MAX_PASSES: usize = 10_000;

/// Upper bound on arcs cut by one C-shape plan (depth levels × radial passes).
pub const MAX_ARC_PASSES: usize = 20_000;

/// Largest wedge angle accepted, in degrees either side of zero.
pub const MAX_ANGLE_DEGREES: f64 = 360.0;

/// Radii closer than this to the outer radius are snapped onto it.
const RADIUS_EPSILON: f64 = 1e-9;

/// The arc of a ring that is kept after removing the wedge between two angles.
///
/// Angles are radians; `end` is always greater than `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemainingArc {
    pub start: f64,
    pub end: f64,
}

impl RemainingArc {
    /// Build the kept arc from the removed wedge, given in degrees.
    ///
    /// The arc starts at the larger angle. Its end is `2π − |lower|`, moved up
    /// by the fewest whole turns that put it after the start. Equal angles remove
    /// nothing and give a full turn.
    pub fn from_removed_wedge(start_angle: f64, end_angle: f64) -> Self {
        let lower = start_angle.min(end_angle);
        let higher = start_angle.max(end_angle);

        let start = higher * PI / 180.0;
        let lower_rad = lower * PI / 180.0;

        if lower == higher {
            return Self {
                start,
                end: start + TAU,
            };
        }

        let mut end = if lower < 0.0 {
            TAU + lower_rad
        } else {
            TAU - lower_rad.abs()
        };
        if end <= start {
            let turns = ((start - end) / TAU).floor() + 1.0;
            end += turns * TAU;
            // Rounding on very large angles can land just short of the start.
            if end <= start {
                end += TAU;
            }
        }

        Self { start, end }
    }

    /// Swept angle in radians (always positive)
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    /// Angle halfway along the arc
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// `samples` evenly spaced angles from `start` to `end`, both included.
    pub fn sample_angles(&self, samples: usize) -> impl Iterator<Item = f64> {
        let start = self.start;
        let step = if samples > 1 {
            (self.end - self.start) / (samples - 1) as f64
        } else {
            0.0
        };
        (0..samples).map(move |j| start + j as f64 * step)
    }
}

/// Pass counts for a ring of `width` cut with `step_over` spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadialPassCounts {
    /// `floor(width / step_over) + 1`, used for exported programs
    pub export: usize,
    /// `ceil(width / step_over)`, used for previews
    pub preview: usize,
}

impl RadialPassCounts {
    pub fn new(width: f64, step_over: f64) -> Self {
        let ratio = (width / step_over).max(0.0);
        Self {
            export: ratio.floor() as usize + 1,
            preview: ratio.ceil() as usize,
        }
    }
}

/// Radii for passes `0..=nominal`, stopping at the first one that reaches `outer`.
///
/// The last radius is always exactly `outer`. When `outer < inner` the
/// schedule collapses to a single pass at `outer`.
pub fn radial_passes(inner: f64, outer: f64, step_over: f64, nominal: usize) -> Vec<f64> {
    let mut radii = Vec::with_capacity(nominal + 1);
    for i in 0..=nominal {
        let radius = inner + i as f64 * step_over;
        if radius >= outer - RADIUS_EPSILON {
            radii.push(outer);
            return radii;
        }
        radii.push(radius);
    }
    // Only reachable through rounding in the nominal count.
    radii.push(outer);
    radii
}

/// Z levels for a pocket of `total_depth` cut in steps of `step_depth`.
///
/// Level 0 is the surface; the last of the `ceil(total / step)` further
/// levels is exactly `-total_depth`.
pub fn depth_levels(total_depth: f64, step_depth: f64) -> Vec<f64> {
    let passes = depth_pass_count(total_depth, step_depth);
    (0..=passes)
        .map(|d| {
            if d == 0 {
                0.0
            } else if d == passes {
                -total_depth
            } else {
                let depth = -(d as f64) * step_depth;
                if depth.abs() > total_depth.abs() {
                    -total_depth
                } else {
                    depth
                }
            }
        })
        .collect()
}

/// `ceil(total / step)` as a pass count.
pub fn depth_pass_count(total_depth: f64, step_depth: f64) -> usize {
    (total_depth / step_depth).ceil().max(0.0) as usize
}

/// Reject schedules that would exceed [`MAX_PASSES`].
pub(crate) fn check_pass_budget(what: &str, passes: f64) -> ParameterResult<()> {
    if passes > MAX_PASSES as f64 {
        return Err(ParameterError::Incompatible(format!(
            "{} would need {} passes (limit {})",
            what,
            passes.ceil(),
            MAX_PASSES
        )));
    }
    Ok(())
}

/// Reject C-shape plans that would cut more than [`MAX_ARC_PASSES`] arcs.
pub(crate) fn check_arc_budget(depth_levels: f64, radial_passes: f64) -> ParameterResult<()> {
    let arcs = depth_levels * radial_passes;
    if arcs > MAX_ARC_PASSES as f64 {
        return Err(ParameterError::Incompatible(format!(
            "{} depth levels of {} radial passes would cut {} arcs (limit {})",
            depth_levels, radial_passes, arcs, MAX_ARC_PASSES
        )));
    }
    Ok(())
}
