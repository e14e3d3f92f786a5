//! 2D preview scenes built from planner parameters.
//!
//! A scene is a flat list of shapes in world millimeters plus a reference
//! grid. It mirrors what the planners will cut but is drawn from the
//! preview pass schedule, so it can show one radial pass fewer than the
//! exported program.

use glam::DVec2;
use millpath_camtools::{
    AnnularGeometry, AnnularParameters, CamToolResult, LinearParameters,
};
use millpath_core::Axis;

/// Length of the entry and exit ticks drawn past each arc end (mm).
pub const MARKER_LENGTH: f64 = 5.0;
/// Size of the direction arrow (mm).
pub const ARROW_SIZE: f64 = 2.0;
/// Half opening angle of the C-shape direction arrow (radians).
const ARROW_HALF_ANGLE: f64 = 0.1;

/// Reference grid drawn behind every scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Distance between grid lines (mm)
    pub spacing: f64,
    /// Number of lines on each side of an axis
    pub lines: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            lines: 20,
        }
    }
}

impl Grid {
    /// Distance from the origin to the outermost grid line
    pub fn half_extent(&self) -> f64 {
        self.spacing * self.lines as f64
    }
}

/// One drawable element of a scene
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Tool path arc around the origin, swept from `start` to `end` (radians)
    Arc { radius: f64, start: f64, end: f64 },
    /// Tool path line
    Path { from: DVec2, to: DVec2 },
    /// Entry or exit tick
    Marker { from: DVec2, to: DVec2 },
    /// Filled direction arrow; the first corner is the tip
    Arrow([DVec2; 3]),
}

/// Everything drawn in the 2D preview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene2D {
    pub grid: Grid,
    pub shapes: Vec<Shape>,
}

impl Scene2D {
    pub fn arcs(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Arc { .. }))
    }

    pub fn markers(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Marker { .. }))
    }
}

fn polar(radius: f64, angle: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Build the C-shape scene: one arc per preview pass, entry and exit ticks
/// on the first, nominal last and outermost passes, and a direction arrow
/// halfway along the ring.
pub fn annular_scene(params: &AnnularParameters) -> CamToolResult<Scene2D> {
    let geometry = AnnularGeometry::new(params)?;
    let arc = geometry.arc;
    let nominal = geometry.counts.preview;
    let mut shapes = Vec::new();

    for (i, radius) in geometry.preview_radii().into_iter().enumerate() {
        shapes.push(Shape::Arc {
            radius,
            start: arc.start,
            end: arc.end,
        });

        if i == 0 || i == nominal || radius == geometry.adjusted_outer {
            for angle in [arc.start, arc.end] {
                shapes.push(Shape::Marker {
                    from: polar(radius, angle),
                    to: polar(radius + MARKER_LENGTH, angle),
                });
            }
        }
    }

    let mid_radius = (geometry.adjusted_inner + geometry.adjusted_outer) / 2.0;
    let mid_angle = arc.mid_angle();
    shapes.push(Shape::Arrow([
        polar(mid_radius, mid_angle),
        polar(mid_radius + ARROW_SIZE, mid_angle - ARROW_HALF_ANGLE),
        polar(mid_radius + ARROW_SIZE, mid_angle + ARROW_HALF_ANGLE),
    ]));

    tracing::debug!(shapes = shapes.len(), "built C-shape scene");
    Ok(Scene2D {
        grid: Grid::default(),
        shapes,
    })
}

/// Build the groove scene: the cut line and an arrow at its midpoint.
pub fn linear_scene(params: &LinearParameters) -> CamToolResult<Scene2D> {
    params.validate()?;
    let start = params.start_point(0.0);
    let end = params.end_point(0.0);
    let mid = (params.travel_start + params.travel_end) / 2.0;

    let arrow = match params.direction {
        Axis::X => [
            DVec2::new(mid, 0.0),
            DVec2::new(mid + ARROW_SIZE, -ARROW_SIZE),
            DVec2::new(mid + ARROW_SIZE, ARROW_SIZE),
        ],
        Axis::Y => [
            DVec2::new(0.0, mid),
            DVec2::new(-ARROW_SIZE, mid + ARROW_SIZE),
            DVec2::new(ARROW_SIZE, mid + ARROW_SIZE),
        ],
    };

    Ok(Scene2D {
        grid: Grid::default(),
        shapes: vec![
            Shape::Path {
                from: DVec2::new(start.x, start.y),
                to: DVec2::new(end.x, end.y),
            },
            Shape::Arrow(arrow),
        ],
    })
}
