//! # Millpath CAM Tools
//!
//! Tool-path planners that turn a small parameter record into an ordered
//! list of tool positions and a G-code program.
//!
//! ## Planners
//!
//! - **C-shape**: concentric arc passes over a ring with one wedge left standing
//! - **Linear groove**: a straight slot along X or Y, cut in depth steps
//!
//! ## Supporting Infrastructure
//!
//! - **Geometry**: kept-arc normalisation, arc sampling, radial and depth schedules
//! - **Program**: motion commands and the G-code dialect of each tool
//! - **Errors**: parameter validation and planning failures
//!
//! Planners are pure: they hold only their parameters and never keep state
//! between calls.

pub mod annular;
pub mod error;
pub mod geometry;
pub mod linear;
pub mod program;

// Re-export commonly used items
pub use annular::{AnnularGeometry, AnnularParameters, AnnularPathPlanner};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use geometry::{RadialPassCounts, RemainingArc, STEP_OVER_RATIO};
pub use linear::{parse_direction, LinearParameters, LinearPathPlanner};
pub use program::{
    CShapeDialect, LinearDialect, MotionCommand, PathPlanner, Pattern, ProgramFormatter,
    ToolpathPlan,
};
