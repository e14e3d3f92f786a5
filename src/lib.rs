//! # Millpath
//!
//! Tool-path and G-code generation for two machining patterns:
//! - **C-shape**: a partial annular pocket cut in concentric arc passes
//! - **Linear groove**: a straight slot along X or Y cut in depth steps
//!
//! ## Architecture
//!
//! Millpath is organized as a workspace with multiple crates:
//!
//! 1. **millpath-core** - Points, waypoints, axes and number formatting
//! 2. **millpath-camtools** - The planners and their G-code dialects
//! 3. **millpath-visualizer** - 2D and 3D previews, zoom and camera state
//! 4. **millpath-settings** - Configuration files and saved parameters
//! 5. **millpath** - Generation context, export and the command line tool

pub mod cli;
pub mod session;

pub use millpath_core::{format_coord, format_number, Axis, MoveKind, Point3, Waypoint};

pub use millpath_camtools::{
    AnnularParameters, AnnularPathPlanner, CamToolError, CamToolResult, LinearParameters,
    LinearPathPlanner, ParameterError, PathPlanner, Pattern, ToolpathPlan,
};

pub use millpath_visualizer::{
    annular_scene, linear_scene, render_scene_svg, Camera, CameraPreset, PreviewPath, ViewState,
    Viewport,
};

pub use millpath_settings::{Config, ConfigFormat, ParameterStore, SettingsError};

pub use session::{export_file_name, GenerationContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - Pretty console output, or one JSON object per event when `json` is set
/// - RUST_LOG environment variable support
/// - Targets, thread ids and line numbers on every event
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // Program text may go to stdout, so logs never do.
    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
