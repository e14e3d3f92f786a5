use millpath_camtools::{
    CamToolError, LinearParameters, LinearPathPlanner, MotionCommand, PathPlanner, Pattern,
};
use millpath_core::Axis;

#[test]
fn test_default_program_matches_reference() {
    let gcode = LinearPathPlanner::new(LinearParameters::default())
        .generate()
        .unwrap();

    assert_eq!(gcode, include_str!("../fixtures/linear_default.nc"));
}

#[test]
fn test_y_axis_program_matches_reference() {
    let params = LinearParameters {
        travel_start: 2.0,
        travel_end: 8.0,
        depth_end: 1.0,
        depth_step: 0.4,
        direction: Axis::Y,
        ..Default::default()
    };
    let gcode = LinearPathPlanner::new(params).generate().unwrap();

    assert_eq!(gcode, include_str!("../fixtures/linear_y_axis.nc"));
    assert!(gcode.contains("G01 Z1.000000"));
    assert!(!gcode.contains("G01 Z1.200000"));
}

#[test]
fn test_default_program_depth_groups() {
    let gcode = LinearPathPlanner::new(LinearParameters::default())
        .generate()
        .unwrap();

    assert_eq!(gcode.matches('\n').count(), 165);
    assert!(gcode.starts_with("G21\nG90\nG94\n\nF1000.000000\nG0 X0.000000 Y0.000000\n"));
    assert!(gcode.ends_with("G01 Z-5.000000\n\nF1000.000000\nM05\nG00 X0.000000 Y0.000000"));

    // 25 returns to the start, one per depth step.
    assert_eq!(gcode.matches("G01 X0.000000 Y0.000000").count(), 25);
    assert!(gcode.contains("G01 Z5.000000\nG01 X0.000000 Y0.000000"));
}

#[test]
fn test_intermediate_depths_are_visited_twice() {
    let commands = LinearPathPlanner::new(LinearParameters::default())
        .export_commands()
        .unwrap();
    let depths: Vec<f64> = commands
        .iter()
        .filter_map(|c| match c {
            MotionCommand::FeedZ { z, .. } => Some(*z),
            _ => None,
        })
        .collect();

    // Surface, 24 doubled steps, the final step, then z_base.
    assert_eq!(depths.len(), 1 + 24 * 2 + 1 + 1);
    assert_eq!(depths[1], depths[2]);
    assert_eq!(depths[depths.len() - 2], 5.0);
    assert_eq!(depths[depths.len() - 1], -5.0);
}

#[test]
fn test_plan_pattern_and_preview() {
    let plan = LinearPathPlanner::new(LinearParameters::default())
        .plan()
        .unwrap();

    assert_eq!(plan.pattern, Pattern::LinearGroove);
    assert_eq!(plan.pattern.file_prefix(), "linear_line");
    // Every pass hops to safe height before plunging.
    for pass in plan.waypoints[1..].chunks(4) {
        assert!(!pass[0].kind.is_cut());
        assert_eq!(pass[0].position.z, 5.0);
        assert!(pass[1].kind.is_cut());
        assert!(pass[2].kind.is_cut());
        assert_eq!(pass[3].position.z, 5.0);
    }
    assert_eq!(plan.preview_min_z(), Some(-5.0));
}

#[test]
fn test_zero_tool_diameter_is_invalid_parameter() {
    let params = LinearParameters {
        tool_diameter: 0.0,
        ..Default::default()
    };
    let result = LinearPathPlanner::new(params).generate();

    assert!(matches!(result, Err(CamToolError::InvalidParameter(_))));
}

#[test]
fn test_non_numeric_input_is_invalid_parameter() {
    let params = LinearParameters {
        travel_end: f64::NAN,
        ..Default::default()
    };
    let err = LinearPathPlanner::new(params).plan().unwrap_err();

    assert!(err.is_parameter_error());
    assert!(err.to_string().contains("travel_end"));
}
