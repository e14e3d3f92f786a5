//! 2D viewport and bounds helpers for preview rendering.
//!
//! The 2D preview puts the world origin at the canvas center and scales
//! world millimeters by the zoom factor. Screen Y grows downwards and world
//! Y is drawn the same way, so arcs sweep clockwise on screen.

use millpath_core::Waypoint;

/// Zoom used on startup and after a reset.
pub const DEFAULT_ZOOM: f64 = 2.0;
/// Smallest allowed zoom.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest allowed zoom.
pub const MAX_ZOOM: f64 = 10.0;
/// Factor applied by one zoom in or zoom out step.
pub const ZOOM_STEP: f64 = 1.2;

/// Canvas size and zoom of the 2D preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(500.0, 400.0)
    }
}

impl Viewport {
    /// Creates a viewport for a canvas of the given pixel size.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            canvas_width,
            canvas_height,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Gets the current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Restores [`DEFAULT_ZOOM`].
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    /// Canvas center in pixels, where the world origin is drawn.
    pub fn origin(&self) -> (f64, f64) {
        (self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Converts world millimeters to canvas pixels.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let (cx, cy) = self.origin();
        (cx + world_x * self.zoom, cy + world_y * self.zoom)
    }

    /// Converts canvas pixels to world millimeters.
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        let (cx, cy) = self.origin();
        ((pixel_x - cx) / self.zoom, (pixel_y - cy) / self.zoom)
    }
}

/// Axis-aligned bounds of a 3D preview path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    /// Bounds of every waypoint, or `None` for an empty path
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Option<Self> {
        let mut bounds = Self::new();
        for wp in waypoints {
            bounds.update(wp.position.x, wp.position.y, wp.position.z);
        }
        bounds.is_valid().then_some(bounds)
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            // A single Z plane is still valid
            && self.min_z <= self.max_z
    }

    /// Center point as `(x, y, z)`
    pub fn center(&self) -> (f64, f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Largest extent along any axis
    pub fn max_extent(&self) -> f64 {
        (self.max_x - self.min_x)
            .max(self.max_y - self.min_y)
            .max(self.max_z - self.min_z)
    }
}
