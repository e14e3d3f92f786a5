use std::time::Duration;

use glam::Vec3;
use millpath_camtools::{AnnularParameters, AnnularPathPlanner, PathPlanner};
use millpath_visualizer::{CameraPreset, PreviewPath, ViewState};
use proptest::prelude::*;

#[test]
fn test_annular_preview_path() {
    let plan = AnnularPathPlanner::new(AnnularParameters::default())
        .plan()
        .unwrap();
    let path = PreviewPath::from_waypoints(&plan.waypoints);
    let bounds = path.bounds.unwrap();

    assert_eq!(path.segments.len(), plan.waypoints.len() - 1);
    assert_eq!(bounds.max_z, 5.0);
    assert_eq!(bounds.min_z, -5.0);
    assert!((bounds.max_x - 18.5).abs() < 1e-9);
    // Lower half only: the arcs never go above the X axis.
    assert!(bounds.max_y < 1e-9);
}

#[test]
fn test_preset_render_from_view_state() {
    let plan = AnnularPathPlanner::new(AnnularParameters::default())
        .plan()
        .unwrap();
    let path = PreviewPath::from_waypoints(&plan.waypoints);

    let mut state = ViewState::default();
    state.animate_to(CameraPreset::Top);
    while state.tick(Duration::from_millis(100)) {}
    let svg = path.render_svg(&state.camera, 600, 400);

    assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 40.0));
    assert!(svg.contains("<path d=\"M "));
}

proptest! {
    #[test]
    fn transition_stays_between_endpoints(steps in 1u64..2000) {
        let mut state = ViewState::default();
        state.animate_to(CameraPreset::Side1);
        state.tick(Duration::from_millis(steps));

        let position = state.camera.position;
        prop_assert!(position.x >= 30.0 - 1e-3 && position.x <= 40.0 + 1e-3);
        prop_assert!(position.y >= -1e-3 && position.y <= 30.0 + 1e-3);
    }
}
