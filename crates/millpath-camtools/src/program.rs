//! Motion commands and their textual G-code rendering.
//!
//! Planners emit [`MotionCommand`]s in execution order. A [`ProgramFormatter`]
//! turns each command into one or more text lines and joins them with `\n`
//! (no trailing newline). Each pattern has its own dialect because the two
//! tools historically write different spellings for the same motion.

use millpath_core::{format_coord, format_number, Point3, Waypoint};
use serde::Serialize;

use crate::error::CamToolResult;

/// One step of a generated program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MotionCommand {
    /// Select millimeter units (G21)
    Millimeters,
    /// Select absolute positioning (G90)
    Absolute,
    /// Select units-per-minute feed mode (G94)
    FeedPerMinute,
    /// Start the spindle, optionally setting its speed
    SpindleOn { speed: Option<f64> },
    /// Stop the spindle
    SpindleOff,
    /// Set the modal feed without moving
    SetFeed(f64),
    /// Switch to linear interpolation at the given feed without moving
    SelectFeedMode { feed: f64 },
    /// Rapid XY positioning
    Rapid { x: f64, y: f64, feed: Option<f64> },
    /// Cutting XY move
    Feed { x: f64, y: f64, feed: Option<f64> },
    /// Rapid Z move (retract)
    RapidZ { z: f64, feed: Option<f64> },
    /// Z move at cutting feed (plunge or controlled return)
    FeedZ { z: f64, feed: Option<f64> },
    /// Final rapid back to the start position after the spindle stops
    Park { x: f64, y: f64 },
    /// Banner opening the passes at depth `z`
    DepthSection { z: f64 },
    /// Comment opening one radial pass
    RadialPass { radius: f64 },
    /// Empty line
    Blank,
}

/// Renders motion commands as G-code text
pub trait ProgramFormatter {
    /// Render a single command; multi-line commands use embedded `\n`
    fn format_command(&self, command: &MotionCommand) -> String;

    /// Render a whole program
    fn format(&self, commands: &[MotionCommand]) -> String {
        commands
            .iter()
            .map(|command| self.format_command(command))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const BANNER_RULE: &str = ";=================================================================";

fn with_feed(line: String, feed: Option<f64>, render: fn(f64) -> String) -> String {
    match feed {
        Some(feed) => format!("{} F{}", line, render(feed)),
        None => line,
    }
}

/// Dialect written by the C-shape tool.
///
/// Short motion words (`G0`/`G1`), feeds in shortest notation, annotated
/// plunges and retracts, and a banner per depth level.
#[derive(Debug, Default, Clone, Copy)]
pub struct CShapeDialect;

impl ProgramFormatter for CShapeDialect {
    fn format_command(&self, command: &MotionCommand) -> String {
        match command {
            MotionCommand::Millimeters => "G21 ; Set units to mm".to_string(),
            MotionCommand::Absolute => "G90 ; Absolute positioning".to_string(),
            MotionCommand::FeedPerMinute => "G94".to_string(),
            MotionCommand::SpindleOn { speed: Some(speed) } => format!(
                "S{} M3 ; Set tool speed and start spindle",
                format_number(*speed)
            ),
            MotionCommand::SpindleOn { speed: None } => "M3 ; Start spindle".to_string(),
            MotionCommand::SpindleOff => "M05 ; Stop spindle".to_string(),
            MotionCommand::SetFeed(feed) => format!("F{}", format_number(*feed)),
            MotionCommand::SelectFeedMode { feed } => format!("G1 F{}", format_number(*feed)),
            MotionCommand::Rapid { x, y, feed } => with_feed(
                format!("G0 X{} Y{}", format_coord(*x), format_coord(*y)),
                *feed,
                format_number,
            ),
            MotionCommand::Feed { x, y, feed } => with_feed(
                format!("G1 X{} Y{}", format_coord(*x), format_coord(*y)),
                *feed,
                format_number,
            ),
            MotionCommand::RapidZ { z, feed } => match feed {
                Some(feed) => format!("G0 Z{} F{}; Raise tool", format_number(*z), format_number(*feed)),
                None => format!("G0 Z{}; Raise tool", format_number(*z)),
            },
            MotionCommand::FeedZ { z, feed } => format!(
                "{} ; Lower tool",
                with_feed(format!("G1 Z{}", format_coord(*z)), *feed, format_number)
            ),
            MotionCommand::Park { x, y } => {
                format!("G0 X{} Y{}", format_coord(*x), format_coord(*y))
            }
            MotionCommand::DepthSection { z } => format!(
                "{}\n;============ Cutting depth at {} ===================\n{}",
                BANNER_RULE,
                format_coord(*z),
                BANNER_RULE
            ),
            MotionCommand::RadialPass { radius } => {
                format!("; Cutting C-Shape for radius of {}", format_coord(*radius))
            }
            MotionCommand::Blank => String::new(),
        }
    }
}

/// Dialect written by the linear groove tool.
///
/// Bare modal words, six-decimal feeds, `G01` cutting moves, and a `G00`
/// park move at the end.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearDialect;

impl ProgramFormatter for LinearDialect {
    fn format_command(&self, command: &MotionCommand) -> String {
        match command {
            MotionCommand::Millimeters => "G21".to_string(),
            MotionCommand::Absolute => "G90".to_string(),
            MotionCommand::FeedPerMinute => "G94".to_string(),
            MotionCommand::SpindleOn { speed: Some(speed) } => {
                format!("M03 S{}", format_number(*speed))
            }
            MotionCommand::SpindleOn { speed: None } => "M03".to_string(),
            MotionCommand::SpindleOff => "M05".to_string(),
            MotionCommand::SetFeed(feed) => format!("F{}", format_coord(*feed)),
            MotionCommand::SelectFeedMode { feed } => format!("G01 F{}", format_coord(*feed)),
            MotionCommand::Rapid { x, y, feed } => with_feed(
                format!("G0 X{} Y{}", format_coord(*x), format_coord(*y)),
                *feed,
                format_coord,
            ),
            MotionCommand::Feed { x, y, feed } => with_feed(
                format!("G01 X{} Y{}", format_coord(*x), format_coord(*y)),
                *feed,
                format_coord,
            ),
            MotionCommand::RapidZ { z, feed } => {
                with_feed(format!("G0 Z{}", format_coord(*z)), *feed, format_coord)
            }
            MotionCommand::FeedZ { z, feed } => {
                with_feed(format!("G01 Z{}", format_coord(*z)), *feed, format_coord)
            }
            MotionCommand::Park { x, y } => {
                format!("G00 X{} Y{}", format_coord(*x), format_coord(*y))
            }
            MotionCommand::DepthSection { z } => format!("; Depth {}", format_coord(*z)),
            MotionCommand::RadialPass { radius } => format!("; Radius {}", format_coord(*radius)),
            MotionCommand::Blank => String::new(),
        }
    }
}

/// Machining pattern a plan was generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pattern {
    /// Partial annulus cut along the kept arc
    CShape,
    /// Straight groove along one axis
    LinearGroove,
}

impl Pattern {
    /// Prefix of exported program file names
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Pattern::CShape => "c_shape_gcode",
            Pattern::LinearGroove => "linear_line",
        }
    }

    /// Formatter for this pattern's program dialect
    pub fn formatter(&self) -> &'static dyn ProgramFormatter {
        match self {
            Pattern::CShape => &CShapeDialect,
            Pattern::LinearGroove => &LinearDialect,
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::CShape => "C-shape",
            Pattern::LinearGroove => "Linear groove",
        }
    }
}

/// Result of planning one pattern: preview waypoints and export commands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolpathPlan {
    pub pattern: Pattern,
    /// Preview path in execution order
    pub waypoints: Vec<Waypoint>,
    /// Exported program in execution order
    pub commands: Vec<MotionCommand>,
}

impl ToolpathPlan {
    pub fn new(pattern: Pattern, waypoints: Vec<Waypoint>, commands: Vec<MotionCommand>) -> Self {
        Self {
            pattern,
            waypoints,
            commands,
        }
    }

    /// Render the program text in this pattern's dialect
    pub fn to_gcode(&self) -> String {
        self.pattern.formatter().format(&self.commands)
    }

    /// Lowest Z reached by the preview path
    pub fn preview_min_z(&self) -> Option<f64> {
        self.waypoints
            .iter()
            .map(|wp| wp.position.z)
            .reduce(f64::min)
    }
}

/// A planner turns its parameter record into a complete [`ToolpathPlan`].
///
/// Planners hold no state between calls; planning the same parameters twice
/// gives identical plans.
pub trait PathPlanner {
    /// Pattern this planner produces
    fn pattern(&self) -> Pattern;

    /// Validate the parameters and compute preview and export sequences
    fn plan(&self) -> CamToolResult<ToolpathPlan>;
}

/// Convenience for building a cutting waypoint sequence along sampled angles
pub(crate) fn arc_waypoints(
    radius: f64,
    angles: impl Iterator<Item = f64>,
    z: f64,
) -> impl Iterator<Item = Waypoint> {
    angles.map(move |angle| Waypoint::cut(Point3::polar(radius, angle, z)))
}
