//! SVG rendering of 2D preview scenes.
//!
//! The document is sized to the viewport canvas. A group transform moves
//! the world origin to the canvas center and applies the zoom, so shape
//! coordinates are written in millimeters.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use glam::DVec2;

use crate::scene::{Grid, Scene2D, Shape};
use crate::viewport::Viewport;

const GRID_COLOR: &str = "#ddd";
const AXIS_COLOR: &str = "#666";
const PATH_COLOR: &str = "#3498db";
const ARROW_COLOR: &str = "#e74c3c";

/// Render grid lines as SVG path commands
pub fn grid_path(grid: &Grid) -> String {
    let extent = grid.half_extent();
    let lines = grid.lines as i64;
    let mut path = String::with_capacity((2 * lines as usize + 1) * 2 * 40);

    for i in -lines..=lines {
        let offset = i as f64 * grid.spacing;
        let _ = write!(
            path,
            "M {:.3} {:.3} L {:.3} {:.3} ",
            offset, -extent, offset, extent
        );
        let _ = write!(
            path,
            "M {:.3} {:.3} L {:.3} {:.3} ",
            -extent, offset, extent, offset
        );
    }
    path.trim_end().to_string()
}

/// Render the X and Y axes as SVG path commands
pub fn axes_path(grid: &Grid) -> String {
    let extent = grid.half_extent();
    format!(
        "M {:.3} 0 L {:.3} 0 M 0 {:.3} L 0 {:.3}",
        -extent, extent, -extent, extent
    )
}

/// Render an arc around the origin as SVG path commands.
///
/// Sweeps of a full turn are split in two, since a single SVG arc cannot
/// start and end on the same point.
pub fn arc_path(radius: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    let from = polar(radius, start);

    if sweep >= TAU - 1e-9 {
        let half = polar(radius, start + sweep / 2.0);
        let to = polar(radius, end);
        return format!(
            "M {:.3} {:.3} A {:.3} {:.3} 0 0 1 {:.3} {:.3} A {:.3} {:.3} 0 0 1 {:.3} {:.3}",
            from.x, from.y, radius, radius, half.x, half.y, radius, radius, to.x, to.y
        );
    }

    let to = polar(radius, end);
    let large_arc = u8::from(sweep > PI);
    format!(
        "M {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3}",
        from.x, from.y, radius, radius, large_arc, to.x, to.y
    )
}

fn segment_path(from: DVec2, to: DVec2) -> String {
    format!("M {:.3} {:.3} L {:.3} {:.3}", from.x, from.y, to.x, to.y)
}

fn polar(radius: f64, angle: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Render a complete SVG document for `scene` as seen through `viewport`
pub fn render_scene_svg(scene: &Scene2D, viewport: &Viewport) -> String {
    let width = viewport.canvas_width();
    let height = viewport.canvas_height();
    let (cx, cy) = viewport.origin();
    // Keep strokes a constant pixel width at any zoom.
    let px = 1.0 / viewport.zoom();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<g transform="translate({:.3} {:.3}) scale({})">"#,
        cx,
        cy,
        viewport.zoom()
    );
    let _ = writeln!(
        svg,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.4}"/>"#,
        grid_path(&scene.grid),
        GRID_COLOR,
        0.5 * px
    );
    let _ = writeln!(
        svg,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.4}"/>"#,
        axes_path(&scene.grid),
        AXIS_COLOR,
        px
    );

    for shape in &scene.shapes {
        match shape {
            Shape::Arc { radius, start, end } => {
                let _ = writeln!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.4}"/>"#,
                    arc_path(*radius, *start, *end),
                    PATH_COLOR,
                    px
                );
            }
            Shape::Path { from, to } => {
                let _ = writeln!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.4}"/>"#,
                    segment_path(*from, *to),
                    PATH_COLOR,
                    2.0 * px
                );
            }
            Shape::Marker { from, to } => {
                let _ = writeln!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.4}"/>"#,
                    segment_path(*from, *to),
                    PATH_COLOR,
                    px
                );
            }
            Shape::Arrow([tip, left, right]) => {
                let _ = writeln!(
                    svg,
                    r#"<path d="M {:.3} {:.3} L {:.3} {:.3} L {:.3} {:.3} Z" fill="{}"/>"#,
                    tip.x, tip.y, left.x, left.y, right.x, right.y, ARROW_COLOR
                );
            }
        }
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}
