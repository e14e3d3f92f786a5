//! C-shape (annular arc pocket) tool-path planner.
//!
//! Cuts a ring between two radii with one wedge left standing. The tool
//! follows concentric arcs over the kept part of the ring, working outwards
//! pass by pass and stepping down one depth level at a time.

use millpath_core::{Point3, Waypoint, SAFE_Z};
use serde::{Deserialize, Serialize};

use crate::error::{
    require_in_range, require_non_negative, require_positive, CamToolError, CamToolResult,
    ParameterError, ParameterResult,
};
use crate::geometry::{
    check_arc_budget, check_pass_budget, depth_levels, radial_passes, RadialPassCounts,
    RemainingArc, EXPORT_ARC_SAMPLES, MAX_ANGLE_DEGREES, PREVIEW_ARC_SAMPLES, STEP_OVER_RATIO,
};
use crate::program::{arc_waypoints, MotionCommand, PathPlanner, Pattern, ToolpathPlan};

/// Parameters for the C-shape tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnularParameters {
    /// Inner radius of the ring (mm)
    pub inner_radius: f64,
    /// Outer radius of the ring (mm)
    pub outer_radius: f64,
    /// One edge of the wedge that is left uncut (degrees)
    pub start_angle: f64,
    /// Other edge of the wedge that is left uncut (degrees)
    pub end_angle: f64,
    /// Diameter of the cutter (mm)
    pub tool_diameter: f64,
    /// Spindle speed (RPM)
    pub tool_speed: f64,
    /// Final pocket depth as a positive magnitude (mm)
    pub total_depth: f64,
    /// Maximum material removed per depth pass (mm)
    pub step_depth: f64,
    /// Feed rate for plunges and arc cuts (mm/min)
    pub feedrate_cut: f64,
    /// Feed rate for positioning and retracts (mm/min)
    pub feedrate_move: f64,
}

impl Default for AnnularParameters {
    fn default() -> Self {
        Self {
            inner_radius: 10.0,
            outer_radius: 20.0,
            start_angle: 0.0,
            end_angle: 180.0,
            tool_diameter: 3.0,
            tool_speed: 1000.0,
            total_depth: 5.0,
            step_depth: 0.2,
            feedrate_cut: 100.0,
            feedrate_move: 1000.0,
        }
    }
}

impl AnnularParameters {
    /// Check every field on its own and the radii against each other
    pub fn validate(&self) -> ParameterResult<()> {
        for (name, angle) in [("start_angle", self.start_angle), ("end_angle", self.end_angle)] {
            require_in_range(name, angle, -MAX_ANGLE_DEGREES, MAX_ANGLE_DEGREES)?;
        }
        require_non_negative("inner_radius", self.inner_radius)?;
        require_positive("outer_radius", self.outer_radius)?;
        require_positive("tool_diameter", self.tool_diameter)?;
        require_non_negative("tool_speed", self.tool_speed)?;
        require_non_negative("total_depth", self.total_depth)?;
        require_positive("step_depth", self.step_depth)?;
        require_positive("feedrate_cut", self.feedrate_cut)?;
        require_positive("feedrate_move", self.feedrate_move)?;

        if self.outer_radius <= self.inner_radius {
            return Err(ParameterError::Incompatible(format!(
                "outer radius {} must be greater than inner radius {}",
                self.outer_radius, self.inner_radius
            )));
        }
        Ok(())
    }

    /// Ring width between the two radii (mm)
    pub fn ring_width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Geometry derived from validated [`AnnularParameters`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnnularGeometry {
    /// Radius of the tool center on the first pass
    pub adjusted_inner: f64,
    /// Radius of the tool center on the last pass
    pub adjusted_outer: f64,
    /// Radial distance between passes
    pub step_over: f64,
    /// Arc swept by every pass
    pub arc: RemainingArc,
    /// Nominal radial pass counts for export and preview
    pub counts: RadialPassCounts,
    /// Z of each depth level, surface first
    pub depth_levels: Vec<f64>,
}

impl AnnularGeometry {
    /// Validate `params` and derive the pass schedule.
    ///
    /// A tool at least twice as wide as the ring leaves no room for any pass
    /// and is rejected as degenerate. A narrower tool that still overlaps
    /// both walls collapses to a single pass at the adjusted outer radius.
    pub fn new(params: &AnnularParameters) -> CamToolResult<Self> {
        params.validate()?;

        if params.tool_diameter >= 2.0 * params.ring_width() {
            return Err(CamToolError::DegenerateGeometry(format!(
                "tool diameter {} leaves no room for a pass in a ring {} mm wide",
                params.tool_diameter,
                params.ring_width()
            )));
        }

        let adjusted_inner = params.inner_radius + params.tool_diameter / 2.0;
        let adjusted_outer = params.outer_radius - params.tool_diameter / 2.0;
        let step_over = params.tool_diameter * STEP_OVER_RATIO;

        let radial_ratio = (adjusted_outer - adjusted_inner).max(0.0) / step_over;
        let depth_ratio = params.total_depth / params.step_depth;
        check_pass_budget("radial schedule", radial_ratio)?;
        check_pass_budget("depth schedule", depth_ratio)?;
        // Upper bounds on depth levels and export radii.
        check_arc_budget(depth_ratio.ceil() + 1.0, radial_ratio.floor() + 2.0)?;

        Ok(Self {
            adjusted_inner,
            adjusted_outer,
            step_over,
            arc: RemainingArc::from_removed_wedge(params.start_angle, params.end_angle),
            counts: RadialPassCounts::new(adjusted_outer - adjusted_inner, step_over),
            depth_levels: depth_levels(params.total_depth, params.step_depth),
        })
    }

    /// Pass radii used by the exported program
    pub fn export_radii(&self) -> Vec<f64> {
        radial_passes(
            self.adjusted_inner,
            self.adjusted_outer,
            self.step_over,
            self.counts.export,
        )
    }

    /// Pass radii used by the previews
    pub fn preview_radii(&self) -> Vec<f64> {
        radial_passes(
            self.adjusted_inner,
            self.adjusted_outer,
            self.step_over,
            self.counts.preview,
        )
    }
}

/// Planner for the C-shape tool
#[derive(Debug, Clone)]
pub struct AnnularPathPlanner {
    params: AnnularParameters,
}

impl AnnularPathPlanner {
    /// Create a new planner with the given parameters
    pub fn new(params: AnnularParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnnularParameters {
        &self.params
    }

    /// Derived pass schedule, or the reason the parameters are rejected
    pub fn geometry(&self) -> CamToolResult<AnnularGeometry> {
        AnnularGeometry::new(&self.params)
    }

    /// Generate the G-code program text
    pub fn generate(&self) -> CamToolResult<String> {
        Ok(self.plan()?.to_gcode())
    }

    /// Motion commands of the exported program in execution order
    pub fn export_commands(&self) -> CamToolResult<Vec<MotionCommand>> {
        let geometry = self.geometry()?;
        Ok(self.commands_for(&geometry))
    }

    /// 3D preview path in execution order
    pub fn preview_waypoints(&self) -> CamToolResult<Vec<Waypoint>> {
        let geometry = self.geometry()?;
        Ok(self.waypoints_for(&geometry))
    }

    fn commands_for(&self, geometry: &AnnularGeometry) -> Vec<MotionCommand> {
        let p = &self.params;
        let radii = geometry.export_radii();
        let retract = MotionCommand::RapidZ {
            z: SAFE_Z,
            feed: Some(p.feedrate_move),
        };

        let mut commands = Vec::with_capacity(
            6 + geometry.depth_levels.len() * (4 + radii.len() * (EXPORT_ARC_SAMPLES + 5)),
        );

        commands.push(MotionCommand::Millimeters);
        commands.push(MotionCommand::Absolute);
        commands.push(MotionCommand::SpindleOn {
            speed: Some(p.tool_speed),
        });
        commands.push(retract.clone());

        for &z in &geometry.depth_levels {
            commands.push(MotionCommand::Blank);
            commands.push(MotionCommand::Blank);
            commands.push(MotionCommand::DepthSection { z });
            commands.push(MotionCommand::Blank);

            for &radius in &radii {
                let entry = Point3::polar(radius, geometry.arc.start, z);
                commands.push(MotionCommand::Blank);
                commands.push(MotionCommand::RadialPass { radius });
                commands.push(MotionCommand::Rapid {
                    x: entry.x,
                    y: entry.y,
                    feed: Some(p.feedrate_move),
                });
                commands.push(MotionCommand::FeedZ {
                    z,
                    feed: Some(p.feedrate_cut),
                });
                commands.extend(
                    arc_waypoints(radius, geometry.arc.sample_angles(EXPORT_ARC_SAMPLES), z).map(
                        |wp| MotionCommand::Feed {
                            x: wp.position.x,
                            y: wp.position.y,
                            feed: Some(p.feedrate_cut),
                        },
                    ),
                );
                commands.push(retract.clone());
            }
        }

        commands.push(MotionCommand::SpindleOff);
        commands.push(retract);
        commands
    }

    fn waypoints_for(&self, geometry: &AnnularGeometry) -> Vec<Waypoint> {
        let radii = geometry.preview_radii();
        let arc = geometry.arc;
        let mut waypoints = Vec::with_capacity(
            geometry.depth_levels.len() * radii.len() * (PREVIEW_ARC_SAMPLES + 3),
        );

        for &z in &geometry.depth_levels {
            for &radius in &radii {
                waypoints.push(Waypoint::rapid(Point3::polar(radius, arc.start, SAFE_Z)));
                waypoints.push(Waypoint::cut(Point3::polar(radius, arc.start, z)));
                waypoints.extend(arc_waypoints(
                    radius,
                    arc.sample_angles(PREVIEW_ARC_SAMPLES),
                    z,
                ));
                waypoints.push(Waypoint::rapid(Point3::polar(radius, arc.end, SAFE_Z)));
            }
        }
        waypoints
    }
}

impl PathPlanner for AnnularPathPlanner {
    fn pattern(&self) -> Pattern {
        Pattern::CShape
    }

    fn plan(&self) -> CamToolResult<ToolpathPlan> {
        let geometry = self.geometry()?;
        let commands = self.commands_for(&geometry);
        let waypoints = self.waypoints_for(&geometry);

        tracing::debug!(
            adjusted_inner = geometry.adjusted_inner,
            adjusted_outer = geometry.adjusted_outer,
            step_over = geometry.step_over,
            depth_levels = geometry.depth_levels.len(),
            export_passes = geometry.counts.export,
            preview_passes = geometry.counts.preview,
            commands = commands.len(),
            waypoints = waypoints.len(),
            "planned C-shape"
        );

        Ok(ToolpathPlan::new(Pattern::CShape, waypoints, commands))
    }
}
