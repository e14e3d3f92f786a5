//! # Millpath Visualizer
//!
//! Preview rendering for the millpath planners.
//!
//! - **Scene**: 2D plan view of the passes with markers, arrows and a grid
//! - **SVG**: 2D scene rendering through a zoomable [`Viewport`]
//! - **Preview 3D**: the planner's waypoints projected through a [`Camera`]
//! - **View**: presentation state with camera presets and eased transitions

pub mod camera;
pub mod preview3d;
pub mod scene;
pub mod svg;
pub mod view;
pub mod viewport;

pub use camera::{ease_out_cubic, Camera, CameraPreset, CameraTransition};
pub use preview3d::{PreviewPath, Segment3};
pub use scene::{annular_scene, linear_scene, Grid, Scene2D, Shape};
pub use svg::render_scene_svg;
pub use view::{ViewMode, ViewState};
pub use viewport::{Bounds, Viewport};
