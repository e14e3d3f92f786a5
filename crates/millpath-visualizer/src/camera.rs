//! 3D preview camera, view presets and eased transitions between them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Length of a camera transition between presets.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(1000);

/// Perspective camera looking at a fixed target.
///
/// Z is up in world space; the `up` vector only orients the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub up: Vec3,
    pub target: Vec3,
    pub fov: f32, // degrees
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: CameraPreset::Home.position(),
            up: CameraPreset::Home.up(),
            target: Vec3::ZERO,
            fov: 60.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Project a world point to pixel coordinates on a `width` x `height` image.
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3, width: f32, height: f32) -> Option<(f32, f32)> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some((
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }

    /// Jump straight to a preset without animating
    pub fn apply_preset(&mut self, preset: CameraPreset) {
        self.position = preset.position();
        self.up = preset.up();
    }
}

/// Named camera placements for the 3D preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraPreset {
    /// Oblique view the preview opens with
    #[default]
    Home,
    /// Looking down the Z axis
    Top,
    /// Looking along -X
    Side1,
    /// Looking along -Y
    Side2,
}

impl CameraPreset {
    pub fn position(&self) -> Vec3 {
        match self {
            CameraPreset::Home => Vec3::new(30.0, 30.0, 30.0),
            CameraPreset::Top => Vec3::new(0.0, 0.0, 40.0),
            CameraPreset::Side1 => Vec3::new(40.0, 0.0, 0.0),
            CameraPreset::Side2 => Vec3::new(0.0, 40.0, 0.0),
        }
    }

    pub fn up(&self) -> Vec3 {
        match self {
            CameraPreset::Home | CameraPreset::Top => Vec3::Y,
            CameraPreset::Side1 | CameraPreset::Side2 => Vec3::Z,
        }
    }
}

impl fmt::Display for CameraPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Top => write!(f, "top"),
            Self::Side1 => write!(f, "side1"),
            Self::Side2 => write!(f, "side2"),
        }
    }
}

impl FromStr for CameraPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "top" => Ok(Self::Top),
            "side1" => Ok(Self::Side1),
            "side2" => Ok(Self::Side2),
            _ => Err(format!("Unknown camera preset: {}", s)),
        }
    }
}

/// Cubic ease-out, `1 - (1 - t)^3`, with `t` clamped to `0..=1`
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Animated move of the camera position and up vector towards a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    from_position: Vec3,
    from_up: Vec3,
    to_position: Vec3,
    to_up: Vec3,
    elapsed: Duration,
    duration: Duration,
}

impl CameraTransition {
    /// Start a transition from the camera's current placement
    pub fn new(camera: &Camera, preset: CameraPreset) -> Self {
        Self {
            from_position: camera.position,
            from_up: camera.up,
            to_position: preset.position(),
            to_up: preset.up(),
            elapsed: Duration::ZERO,
            duration: TRANSITION_DURATION,
        }
    }

    /// Fraction of the duration that has passed, `0..=1`
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` and write the eased placement into `camera`
    pub fn advance(&mut self, dt: Duration, camera: &mut Camera) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = ease_out_cubic(self.progress());
        camera.position = self.from_position.lerp(self.to_position, t);
        camera.up = self.from_up.lerp(self.to_up, t);
    }
}
