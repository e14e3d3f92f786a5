//! Command line interface.
//!
//! Every generating subcommand starts from the configured parameter set
//! (or a saved preset), applies the flags given on the command line, plans
//! once and then writes whatever outputs were asked for.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use millpath_camtools::{
    parse_direction, AnnularParameters, AnnularPathPlanner, LinearParameters, LinearPathPlanner,
    PathPlanner, ToolpathPlan,
};
use millpath_core::Axis;
use millpath_settings::{Config, ConfigFormat, ParameterStore, ToolParameters};
use millpath_visualizer::{
    annular_scene, linear_scene, render_scene_svg, Camera, CameraPreset, PreviewPath, Scene2D,
    Viewport,
};

use crate::session::GenerationContext;

#[derive(Parser, Debug)]
#[command(name = "millpath", version)]
#[command(about = "Tool-path and G-code generator for C-shape pockets and linear grooves", long_about = None)]
pub struct Cli {
    /// Configuration file (.toml or .json); defaults to the user config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log one JSON object per line instead of pretty text
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut a ring in concentric arcs, leaving one wedge standing
    CShape {
        #[command(flatten)]
        params: CShapeArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Cut a straight groove along X or Y
    Linear {
        #[command(flatten)]
        params: LinearArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print or write the default configuration
    Defaults {
        /// Format used when printing
        #[arg(long, value_enum, default_value_t = FormatArg::Toml)]
        format: FormatArg,
        /// Write to this file instead; the format follows its extension
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Toml,
}

impl From<FormatArg> for ConfigFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ConfigFormat::Json,
            FormatArg::Toml => ConfigFormat::Toml,
        }
    }
}

macro_rules! override_fields {
    ($args:expr, $params:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $args.$field {
                $params.$field = value;
            }
        )+
    };
}

/// C-shape parameter overrides
#[derive(Args, Debug, Clone, Default)]
pub struct CShapeArgs {
    /// Inner radius of the ring (mm)
    #[arg(long)]
    pub inner_radius: Option<f64>,
    /// Outer radius of the ring (mm)
    #[arg(long)]
    pub outer_radius: Option<f64>,
    /// First angle of the wedge left standing (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub start_angle: Option<f64>,
    /// Second angle of the wedge left standing (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub end_angle: Option<f64>,
    /// Cutter diameter (mm)
    #[arg(long)]
    pub tool_diameter: Option<f64>,
    /// Spindle speed (RPM)
    #[arg(long)]
    pub tool_speed: Option<f64>,
    /// Pocket depth (mm)
    #[arg(long)]
    pub total_depth: Option<f64>,
    /// Depth per pass (mm)
    #[arg(long)]
    pub step_depth: Option<f64>,
    /// Cutting feed rate (mm/min)
    #[arg(long)]
    pub feedrate_cut: Option<f64>,
    /// Positioning feed rate (mm/min)
    #[arg(long)]
    pub feedrate_move: Option<f64>,
}

impl CShapeArgs {
    pub fn apply(&self, mut params: AnnularParameters) -> AnnularParameters {
        override_fields!(
            self,
            params,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            tool_diameter,
            tool_speed,
            total_depth,
            step_depth,
            feedrate_cut,
            feedrate_move,
        );
        params
    }
}

/// Linear groove parameter overrides
#[derive(Args, Debug, Clone, Default)]
pub struct LinearArgs {
    /// Groove start on the travel axis (mm)
    #[arg(long, allow_negative_numbers = true)]
    pub travel_start: Option<f64>,
    /// Groove end on the travel axis (mm)
    #[arg(long, allow_negative_numbers = true)]
    pub travel_end: Option<f64>,
    /// Depth the preview starts from (mm)
    #[arg(long)]
    pub depth_start: Option<f64>,
    /// Final depth (mm)
    #[arg(long)]
    pub depth_end: Option<f64>,
    /// Depth per pass (mm)
    #[arg(long)]
    pub depth_step: Option<f64>,
    /// Z before the first plunge and after the last pass (mm)
    #[arg(long, allow_negative_numbers = true)]
    pub z_base: Option<f64>,
    /// Cutter diameter (mm)
    #[arg(long)]
    pub tool_diameter: Option<f64>,
    /// Spindle speed (RPM)
    #[arg(long)]
    pub tool_speed: Option<f64>,
    /// Cutting feed rate (mm/min)
    #[arg(long)]
    pub feedrate_drill: Option<f64>,
    /// Positioning feed rate (mm/min)
    #[arg(long)]
    pub feedrate_travel: Option<f64>,
    /// Travel axis, X or Y
    #[arg(long, value_parser = parse_direction)]
    pub direction: Option<Axis>,
}

impl LinearArgs {
    pub fn apply(&self, mut params: LinearParameters) -> LinearParameters {
        override_fields!(
            self,
            params,
            travel_start,
            travel_end,
            depth_start,
            depth_end,
            depth_step,
            z_base,
            tool_diameter,
            tool_speed,
            feedrate_drill,
            feedrate_travel,
            direction,
        );
        params
    }
}

/// What to do with a generated plan
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print the program to stdout
    #[arg(long)]
    pub print: bool,
    /// Directory the program file is exported to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Skip writing the program file
    #[arg(long)]
    pub no_export: bool,
    /// Write the 2D plan preview as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,
    /// Write the 3D tool path preview as SVG
    #[arg(long)]
    pub svg_3d: Option<PathBuf>,
    /// Camera for the 3D preview (home, top, side1, side2)
    #[arg(long)]
    pub view: Option<CameraPreset>,
    /// Write the 3D preview waypoints as JSON
    #[arg(long)]
    pub preview_json: Option<PathBuf>,
    /// Zoom of the 2D preview
    #[arg(long)]
    pub zoom: Option<f64>,
    /// Start from a saved parameter preset
    #[arg(long)]
    pub preset: Option<String>,
    /// Save the final parameters as a preset once generation succeeds
    #[arg(long)]
    pub save_preset: Option<String>,
    /// Directory presets are kept in
    #[arg(long)]
    pub preset_dir: Option<PathBuf>,
}

impl OutputArgs {
    fn store(&self) -> Result<ParameterStore> {
        match &self.preset_dir {
            Some(dir) => Ok(ParameterStore::new(dir)),
            None => ParameterStore::default_location().context("locating preset directory"),
        }
    }

    /// Parameters to start from: the named preset, or `configured`
    fn base_params<T: ToolParameters>(&self, configured: T) -> Result<T> {
        match &self.preset {
            Some(name) => self
                .store()?
                .load(name)
                .with_context(|| format!("loading preset '{}'", name)),
            None => Ok(configured),
        }
    }

    fn save_params<T: ToolParameters>(&self, params: &T) -> Result<()> {
        if let Some(name) = &self.save_preset {
            self.store()?
                .save(name, params)
                .with_context(|| format!("saving preset '{}'", name))?;
        }
        Ok(())
    }
}

/// Load the configuration named on the command line, or the user's default
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(Config::default_path()
            .map(|path| Config::load_or_default(&path))
            .unwrap_or_default()),
    }
}

/// Run a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::CShape { params, output } => {
            let base = output.base_params(config.c_shape.clone())?;
            let params = params.apply(base);
            params.validate().context("invalid C-shape parameters")?;

            let planner = AnnularPathPlanner::new(params.clone());
            generate(&planner, || annular_scene(&params), &output, &config)?;
            output.save_params(&params)
        }
        Commands::Linear { params, output } => {
            let base = output.base_params(config.linear.clone())?;
            let params = params.apply(base);
            params.validate().context("invalid linear groove parameters")?;

            let planner = LinearPathPlanner::new(params.clone());
            generate(&planner, || linear_scene(&params), &output, &config)?;
            output.save_params(&params)
        }
        Commands::Defaults { format, write } => {
            let defaults = Config::default();
            match write {
                Some(path) => {
                    defaults
                        .save_to_file(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                }
                None => println!("{}", defaults.to_string_as(format.into())?),
            }
            Ok(())
        }
    }
}

fn generate(
    planner: &dyn PathPlanner,
    scene: impl FnOnce() -> millpath_camtools::CamToolResult<Scene2D>,
    output: &OutputArgs,
    config: &Config,
) -> Result<()> {
    let mut context = GenerationContext::new();
    let plan = context
        .generate(planner)
        .with_context(|| format!("generating {}", planner.pattern().name()))?
        .clone();

    if output.print || config.output.print_to_stdout {
        if let Some(program) = context.program() {
            println!("{}", program);
        }
    }

    if !output.no_export {
        let directory = output
            .output_dir
            .as_deref()
            .unwrap_or(config.output.directory.as_path());
        let path = context
            .export(directory)
            .with_context(|| format!("exporting to {}", directory.display()))?;
        eprintln!("Exported {}", path.display());
    }

    let width = config.preview.canvas_width;
    let height = config.preview.canvas_height;

    if let Some(path) = &output.svg {
        let mut viewport = Viewport::new(width as f64, height as f64);
        viewport.set_zoom(output.zoom.unwrap_or(config.preview.zoom));
        write_file(path, &render_scene_svg(&scene()?, &viewport))?;
    }

    if let Some(path) = &output.svg_3d {
        let mut camera = Camera::default();
        camera.apply_preset(output.view.unwrap_or(config.preview.camera));
        camera.update_aspect_ratio(width as f32, height as f32);
        let svg = PreviewPath::from_waypoints(&plan.waypoints).render_svg(&camera, width, height);
        write_file(path, &svg)?;
    }

    if let Some(path) = &output.preview_json {
        write_file(path, &preview_json(&plan)?)?;
    }

    Ok(())
}

fn preview_json(plan: &ToolpathPlan) -> Result<String> {
    serde_json::to_string_pretty(&plan.waypoints).context("serializing preview waypoints")
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "preview written");
    Ok(())
}
