//! # Millpath Core
//!
//! Core types and utilities shared by the millpath crates.
//! Provides the tool position model consumed by renderers and the numeric
//! formatting rules used by every G-code dialect.

pub mod data;
pub mod units;

pub use data::{Axis, MoveKind, Point3, Waypoint, SAFE_Z};
pub use units::{format_coord, format_number};
