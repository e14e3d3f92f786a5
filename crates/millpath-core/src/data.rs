//! Data models for tool positions
//!
//! This module provides:
//! - 3-axis positions in millimeters
//! - Waypoints tagged with the kind of motion that reaches them
//! - The travel axis selector used by the linear groove

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clearance height above the stock surface used for every retract (mm).
pub const SAFE_Z: f64 = 5.0;

/// Position in 3D space, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position (negative = below stock top)
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point at `radius` from the origin along `angle` (radians) at height `z`
    pub fn polar(radius: f64, angle: f64, z: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
            z,
        }
    }

}

impl Default for Point3 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}

/// Kind of motion used to reach a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Non-cutting positioning move at the travel feed
    Rapid,
    /// Cutting move (plunge or feed) at the cutting feed
    Cut,
}

impl MoveKind {
    /// Whether this motion removes material
    pub fn is_cut(&self) -> bool {
        matches!(self, MoveKind::Cut)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid => write!(f, "rapid"),
            Self::Cut => write!(f, "cut"),
        }
    }
}

/// A tool position in execution order, with the motion that arrives at it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point3,
    pub kind: MoveKind,
}

impl Waypoint {
    /// Waypoint reached by a rapid move
    pub fn rapid(position: Point3) -> Self {
        Self {
            position,
            kind: MoveKind::Rapid,
        }
    }

    /// Waypoint reached by a cutting move
    pub fn cut(position: Point3) -> Self {
        Self {
            position,
            kind: MoveKind::Cut,
        }
    }
}

/// Machine axis the linear groove travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    /// Point at `position` along this axis, zero on the other one
    pub fn point(&self, position: f64, z: f64) -> Point3 {
        match self {
            Axis::X => Point3::new(position, 0.0, z),
            Axis::Y => Point3::new(0.0, position, z),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "X" => Ok(Self::X),
            "Y" => Ok(Self::Y),
            _ => Err(format!("Unknown travel axis: {}", s)),
        }
    }
}
