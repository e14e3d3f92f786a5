//! Presentation state for the previews.
//!
//! [`ViewState`] is owned by whatever drives the display. Planners never
//! see it; the display layer calls [`ViewState::tick`] on each redraw to
//! advance a running camera transition.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraPreset, CameraTransition};
use crate::viewport::Viewport;

/// Which preview is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Plan,
    Perspective,
}

/// Zoom, camera and active preview of the display
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    pub viewport: Viewport,
    pub camera: Camera,
    transition: Option<CameraTransition>,
}

impl ViewState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Start animating the camera towards `preset`, replacing any running move
    pub fn animate_to(&mut self, preset: CameraPreset) {
        tracing::debug!(%preset, "camera transition started");
        self.transition = Some(CameraTransition::new(&self.camera, preset));
    }

    /// Advance the running transition by `dt`.
    ///
    /// Returns `true` while another redraw is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.advance(dt, &mut self.camera);
        if transition.is_finished() {
            self.transition = None;
            return false;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }
}
