//! Linear groove tool-path planner.
//!
//! Cuts a straight slot along the X or Y axis, going a little deeper on
//! every pass until the final depth is reached.

use millpath_core::{Axis, Point3, Waypoint, SAFE_Z};
use serde::{Deserialize, Serialize};

use crate::error::{
    require_finite, require_non_negative, require_positive, CamToolResult, ParameterError,
    ParameterResult,
};
use crate::geometry::check_pass_budget;
use crate::program::{MotionCommand, PathPlanner, Pattern, ToolpathPlan};

/// Parameters for the linear groove tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearParameters {
    /// Position along the travel axis where the groove starts (mm)
    pub travel_start: f64,
    /// Position along the travel axis where the groove ends (mm)
    pub travel_end: f64,
    /// Depth the preview starts from (mm)
    pub depth_start: f64,
    /// Final groove depth (mm)
    pub depth_end: f64,
    /// Depth added on each pass (mm)
    pub depth_step: f64,
    /// Z used before the first plunge and after the last pass (mm)
    pub z_base: f64,
    /// Diameter of the cutter (mm)
    pub tool_diameter: f64,
    /// Spindle speed (RPM)
    pub tool_speed: f64,
    /// Feed rate while cutting (mm/min)
    pub feedrate_drill: f64,
    /// Feed rate while positioning (mm/min)
    pub feedrate_travel: f64,
    /// Axis the groove runs along
    pub direction: Axis,
}

impl Default for LinearParameters {
    fn default() -> Self {
        Self {
            travel_start: 0.0,
            travel_end: 10.0,
            depth_start: 0.0,
            depth_end: 5.0,
            depth_step: 0.2,
            z_base: -5.0,
            tool_diameter: 3.0,
            tool_speed: 1000.0,
            feedrate_drill: 100.0,
            feedrate_travel: 1000.0,
            direction: Axis::X,
        }
    }
}

impl LinearParameters {
    /// Check every field on its own and the depth range as a whole
    pub fn validate(&self) -> ParameterResult<()> {
        require_finite("travel_start", self.travel_start)?;
        require_finite("travel_end", self.travel_end)?;
        require_non_negative("depth_start", self.depth_start)?;
        require_non_negative("depth_end", self.depth_end)?;
        require_positive("depth_step", self.depth_step)?;
        require_finite("z_base", self.z_base)?;
        require_positive("tool_diameter", self.tool_diameter)?;
        require_non_negative("tool_speed", self.tool_speed)?;
        require_positive("feedrate_drill", self.feedrate_drill)?;
        require_positive("feedrate_travel", self.feedrate_travel)?;

        if self.depth_start > self.depth_end {
            return Err(ParameterError::Incompatible(format!(
                "depth start {} is below depth end {}",
                self.depth_start, self.depth_end
            )));
        }

        check_pass_budget("depth schedule", self.depth_end / self.depth_step)?;
        check_pass_budget(
            "preview schedule",
            (self.depth_end - self.depth_start).abs() / self.depth_step,
        )
    }

    /// Groove start point on the travel axis at height `z`
    pub fn start_point(&self, z: f64) -> Point3 {
        self.direction.point(self.travel_start, z)
    }

    /// Groove end point on the travel axis at height `z`
    pub fn end_point(&self, z: f64) -> Point3 {
        self.direction.point(self.travel_end, z)
    }
}

/// Parse a travel direction name (`X` or `Y`, any case)
pub fn parse_direction(value: &str) -> ParameterResult<Axis> {
    value
        .parse::<Axis>()
        .map_err(|_| ParameterError::UnknownDirection(value.trim().to_string()))
}

/// Planner for the linear groove tool
#[derive(Debug, Clone)]
pub struct LinearPathPlanner {
    params: LinearParameters,
}

impl LinearPathPlanner {
    /// Create a new planner with the given parameters
    pub fn new(params: LinearParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LinearParameters {
        &self.params
    }

    /// Generate the G-code program text
    pub fn generate(&self) -> CamToolResult<String> {
        Ok(self.plan()?.to_gcode())
    }

    /// Motion commands of the exported program in execution order.
    ///
    /// Every intermediate depth is visited twice: once on the way back to
    /// the start and again before cutting on to the end. Machines running
    /// existing programs depend on this exact sequence.
    pub fn export_commands(&self) -> CamToolResult<Vec<MotionCommand>> {
        self.params.validate()?;
        Ok(self.commands())
    }

    /// 3D preview path in execution order, with a safe-height hop per pass
    pub fn preview_waypoints(&self) -> CamToolResult<Vec<Waypoint>> {
        self.params.validate()?;
        Ok(self.waypoints())
    }

    fn commands(&self) -> Vec<MotionCommand> {
        let p = &self.params;
        let start = p.start_point(0.0);
        let end = p.end_point(0.0);
        let to_start = MotionCommand::Feed {
            x: start.x,
            y: start.y,
            feed: None,
        };
        let to_end = MotionCommand::Feed {
            x: end.x,
            y: end.y,
            feed: None,
        };

        let mut commands = vec![
            MotionCommand::Millimeters,
            MotionCommand::Absolute,
            MotionCommand::FeedPerMinute,
            MotionCommand::Blank,
            MotionCommand::SetFeed(p.feedrate_travel),
            MotionCommand::Rapid {
                x: start.x,
                y: start.y,
                feed: None,
            },
            MotionCommand::RapidZ {
                z: p.z_base,
                feed: None,
            },
            MotionCommand::Blank,
            MotionCommand::SpindleOn { speed: None },
            MotionCommand::SelectFeedMode {
                feed: p.feedrate_drill,
            },
            MotionCommand::Blank,
            MotionCommand::FeedZ { z: 0.0, feed: None },
            to_end.clone(),
        ];

        let mut depth = 0.0_f64;
        while depth < p.depth_end {
            depth = (depth + p.depth_step).min(p.depth_end);
            commands.push(MotionCommand::Blank);
            commands.push(MotionCommand::FeedZ {
                z: depth,
                feed: None,
            });
            commands.push(to_start.clone());
            if depth < p.depth_end {
                commands.push(MotionCommand::Blank);
                commands.push(MotionCommand::FeedZ {
                    z: depth,
                    feed: None,
                });
                commands.push(to_end.clone());
            }
        }

        commands.extend([
            MotionCommand::Blank,
            MotionCommand::FeedZ {
                z: p.z_base,
                feed: None,
            },
            MotionCommand::Blank,
            MotionCommand::SetFeed(p.feedrate_travel),
            MotionCommand::SpindleOff,
            MotionCommand::Park {
                x: start.x,
                y: start.y,
            },
        ]);
        commands
    }

    fn waypoints(&self) -> Vec<Waypoint> {
        let p = &self.params;
        let passes = ((p.depth_end - p.depth_start).abs() / p.depth_step).ceil() as usize;
        let floor = -p.depth_end.abs();

        let mut waypoints = Vec::with_capacity(1 + (passes + 1) * 4);
        waypoints.push(Waypoint::rapid(p.start_point(SAFE_Z)));
        for pass in 0..=passes {
            let depth = (p.depth_start - pass as f64 * p.depth_step).max(floor);
            waypoints.push(Waypoint::rapid(p.start_point(SAFE_Z)));
            waypoints.push(Waypoint::cut(p.start_point(depth)));
            waypoints.push(Waypoint::cut(p.end_point(depth)));
            waypoints.push(Waypoint::rapid(p.end_point(SAFE_Z)));
        }
        waypoints
    }
}

impl PathPlanner for LinearPathPlanner {
    fn pattern(&self) -> Pattern {
        Pattern::LinearGroove
    }

    fn plan(&self) -> CamToolResult<ToolpathPlan> {
        self.params.validate()?;
        let commands = self.commands();
        let waypoints = self.waypoints();

        tracing::debug!(
            direction = %self.params.direction,
            depth_end = self.params.depth_end,
            depth_step = self.params.depth_step,
            commands = commands.len(),
            waypoints = waypoints.len(),
            "planned linear groove"
        );

        Ok(ToolpathPlan::new(Pattern::LinearGroove, waypoints, commands))
    }
}
