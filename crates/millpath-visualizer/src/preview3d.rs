//! 3D preview of a planned path.
//!
//! Waypoints are drawn as one polyline in execution order. Each segment
//! takes the kind of the waypoint it arrives at, so rapids and cuts can be
//! styled apart. Rendering projects the path through a [`Camera`].

use std::fmt::Write;

use glam::Vec3;
use millpath_core::{MoveKind, Waypoint};

use crate::camera::Camera;
use crate::viewport::Bounds;

const RAPID_COLOR: &str = "#ff6600";
const CUT_COLOR: &str = "#ffffff";

/// Straight piece of the preview polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    pub from: Vec3,
    pub to: Vec3,
    pub kind: MoveKind,
}

/// Polyline through the preview waypoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewPath {
    pub segments: Vec<Segment3>,
    pub bounds: Option<Bounds>,
}

impl PreviewPath {
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Self {
        let to_vec3 = |wp: &Waypoint| {
            Vec3::new(
                wp.position.x as f32,
                wp.position.y as f32,
                wp.position.z as f32,
            )
        };
        let segments = waypoints
            .windows(2)
            .map(|pair| Segment3 {
                from: to_vec3(&pair[0]),
                to: to_vec3(&pair[1]),
                kind: pair[1].kind,
            })
            .collect();

        Self {
            segments,
            bounds: Bounds::from_waypoints(waypoints),
        }
    }

    pub fn cut_segments(&self) -> impl Iterator<Item = &Segment3> {
        self.segments.iter().filter(|s| s.kind.is_cut())
    }

    pub fn rapid_segments(&self) -> impl Iterator<Item = &Segment3> {
        self.segments.iter().filter(|s| !s.kind.is_cut())
    }

    /// Project every segment of one kind into SVG path commands
    fn projected_path<'a>(
        segments: impl Iterator<Item = &'a Segment3>,
        camera: &Camera,
        width: f32,
        height: f32,
    ) -> String {
        let mut path = String::new();
        let mut pen: Option<(f32, f32)> = None;

        for segment in segments {
            let (Some(from), Some(to)) = (
                camera.project(segment.from, width, height),
                camera.project(segment.to, width, height),
            ) else {
                pen = None;
                continue;
            };
            if pen != Some(from) {
                let _ = write!(path, "M {:.2} {:.2} ", from.0, from.1);
            }
            let _ = write!(path, "L {:.2} {:.2} ", to.0, to.1);
            pen = Some(to);
        }
        path.trim_end().to_string()
    }

    /// Render the path as seen by `camera` into an SVG document
    pub fn render_svg(&self, camera: &Camera, width: u32, height: u32) -> String {
        let (w, h) = (width as f32, height as f32);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="black"/>"#);
        let _ = writeln!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="1" stroke-dasharray="4 2"/>"#,
            Self::projected_path(self.rapid_segments(), camera, w, h),
            RAPID_COLOR
        );
        let _ = writeln!(
            svg,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            Self::projected_path(self.cut_segments(), camera, w, h),
            CUT_COLOR
        );
        svg.push_str("</svg>\n");
        svg
    }
}
