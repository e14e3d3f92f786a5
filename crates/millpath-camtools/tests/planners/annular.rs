use millpath_camtools::{
    AnnularParameters, AnnularPathPlanner, CamToolError, MotionCommand, ParameterError,
    PathPlanner, Pattern,
};

fn default_program() -> String {
    AnnularPathPlanner::new(AnnularParameters::default())
        .generate()
        .unwrap()
}

#[test]
fn test_default_program_shape() {
    let gcode = default_program();

    assert_eq!(gcode.matches('\n').count(), 11081);
    assert!(!gcode.ends_with('\n'));
    assert_eq!(gcode.matches("Cutting depth at").count(), 26);
    assert_eq!(gcode.matches("; Cutting C-Shape for radius of").count(), 104);
}

#[test]
fn test_default_program_header() {
    let gcode = default_program();
    let lines: Vec<&str> = gcode.lines().collect();

    assert_eq!(lines[0], "G21 ; Set units to mm");
    assert_eq!(lines[1], "G90 ; Absolute positioning");
    assert_eq!(lines[2], "S1000 M3 ; Set tool speed and start spindle");
    assert_eq!(lines[3], "G0 Z5 F1000; Raise tool");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "");
    assert_eq!(
        lines[6],
        ";================================================================="
    );
    assert_eq!(
        lines[7],
        ";============ Cutting depth at 0.000000 ==================="
    );
    assert_eq!(lines[9], "");
    assert_eq!(lines[10], "");
    assert_eq!(lines[11], "; Cutting C-Shape for radius of 11.500000");
    assert_eq!(lines[12], "G0 X-11.500000 Y0.000000 F1000");
    assert_eq!(lines[13], "G1 Z0.000000 F100 ; Lower tool");
    assert_eq!(lines[14], "G1 X-11.500000 Y0.000000 F100");
    assert_eq!(lines[15], "G1 X-11.494210 Y-0.364871 F100");
}

#[test]
fn test_default_first_pass_sweeps_lower_half() {
    let gcode = default_program();
    let lines: Vec<&str> = gcode.lines().collect();

    // 100 samples from 180 degrees round to 360 degrees.
    assert_eq!(lines[112], "G1 X11.494210 Y-0.364871 F100");
    assert_eq!(lines[113], "G1 X11.500000 Y-0.000000 F100");
    assert_eq!(lines[114], "G0 Z5 F1000; Raise tool");
    assert_eq!(lines[115], "");
    assert_eq!(lines[116], "; Cutting C-Shape for radius of 13.900000");
}

#[test]
fn test_default_program_footer() {
    let gcode = default_program();
    let tail: Vec<&str> = gcode.lines().rev().take(4).collect();

    assert_eq!(tail[0], "G0 Z5 F1000; Raise tool");
    assert_eq!(tail[1], "M05 ; Stop spindle");
    assert_eq!(tail[2], "G0 Z5 F1000; Raise tool");
    assert_eq!(tail[3], "G1 X18.500000 Y-0.000000 F100");
    assert!(gcode.contains(";============ Cutting depth at -5.000000 ==================="));
    assert!(!gcode.contains("-5.200000"));
}

#[test]
fn test_matches_reference_program() {
    let params = AnnularParameters {
        total_depth: 1.0,
        step_depth: 0.5,
        ..Default::default()
    };
    let gcode = AnnularPathPlanner::new(params).generate().unwrap();

    assert_eq!(gcode, include_str!("../fixtures/c_shape_depth1_step05.nc"));
}

#[test]
fn test_radii_clamped_to_adjusted_outer() {
    let gcode = default_program();
    let radii: Vec<&str> = gcode
        .lines()
        .filter_map(|line| line.strip_prefix("; Cutting C-Shape for radius of "))
        .take(4)
        .collect();

    assert_eq!(radii, ["11.500000", "13.900000", "16.300000", "18.500000"]);
}

#[test]
fn test_plan_carries_both_sequences() {
    let plan = AnnularPathPlanner::new(AnnularParameters::default())
        .plan()
        .unwrap();

    assert_eq!(plan.pattern, Pattern::CShape);
    // 26 depth levels, 4 radii, 53 preview points per pass.
    assert_eq!(plan.waypoints.len(), 26 * 4 * 53);
    let arc_moves = plan
        .commands
        .iter()
        .filter(|c| matches!(c, MotionCommand::Feed { .. }))
        .count();
    assert_eq!(arc_moves, 26 * 4 * 100);
    assert_eq!(plan.preview_min_z(), Some(-5.0));
}

#[test]
fn test_zero_tool_diameter_is_invalid_parameter() {
    let params = AnnularParameters {
        tool_diameter: 0.0,
        ..Default::default()
    };
    let result = AnnularPathPlanner::new(params).plan();

    assert!(matches!(result, Err(CamToolError::InvalidParameter(_))));
}

#[test]
fn test_huge_angle_is_out_of_range() {
    let params = AnnularParameters {
        end_angle: 1e300,
        ..Default::default()
    };
    let result = AnnularPathPlanner::new(params).plan();
    assert!(matches!(
        result,
        Err(CamToolError::InvalidParameter(ParameterError::OutOfRange { ref name, .. }))
            if name == "end_angle"
    ));

    let params = AnnularParameters {
        start_angle: -361.0,
        ..Default::default()
    };
    assert!(AnnularPathPlanner::new(params).plan().is_err());
}

#[test]
fn test_full_range_angles_are_accepted() {
    let params = AnnularParameters {
        start_angle: -360.0,
        end_angle: 360.0,
        total_depth: 0.4,
        ..Default::default()
    };
    let plan = AnnularPathPlanner::new(params).plan().unwrap();
    assert!(!plan.commands.is_empty());
}

#[test]
fn test_oversized_cutting_schedule_is_rejected() {
    // Each schedule fits on its own; together they would cut 1e8 arcs.
    let params = AnnularParameters {
        inner_radius: 0.0,
        outer_radius: 10_000.0,
        tool_diameter: 1.25,
        total_depth: 1000.0,
        step_depth: 0.1,
        ..Default::default()
    };
    let result = AnnularPathPlanner::new(params).plan();
    assert!(matches!(
        result,
        Err(CamToolError::InvalidParameter(ParameterError::Incompatible(_)))
    ));
}

#[test]
fn test_negative_step_depth_is_invalid_parameter() {
    let params = AnnularParameters {
        step_depth: -0.2,
        ..Default::default()
    };
    let result = AnnularPathPlanner::new(params).generate();

    assert!(matches!(result, Err(CamToolError::InvalidParameter(_))));
}

#[test]
fn test_tool_wider_than_ring_is_degenerate() {
    let params = AnnularParameters {
        inner_radius: 10.0,
        outer_radius: 11.0,
        tool_diameter: 2.0,
        ..Default::default()
    };
    let err = AnnularPathPlanner::new(params).plan().unwrap_err();

    assert!(matches!(err, CamToolError::DegenerateGeometry(_)));
    assert!(err.is_parameter_error());
}

#[test]
fn test_equal_angles_cut_full_circle() {
    let params = AnnularParameters {
        start_angle: 90.0,
        end_angle: 90.0,
        total_depth: 0.0,
        ..Default::default()
    };
    let gcode = AnnularPathPlanner::new(params).generate().unwrap();
    let lines: Vec<&str> = gcode.lines().collect();

    // Arc starts and ends at the top of the first circle.
    assert_eq!(lines[12], "G0 X0.000000 Y11.500000 F1000");
    assert_eq!(lines[14], "G1 X0.000000 Y11.500000 F100");
    assert_eq!(lines[113], "G1 X0.000000 Y11.500000 F100");
}

#[test]
fn test_fractional_feeds_use_shortest_notation() {
    let params = AnnularParameters {
        feedrate_cut: 100.5,
        feedrate_move: 1200.0,
        tool_speed: 12000.0,
        ..Default::default()
    };
    let gcode = AnnularPathPlanner::new(params).generate().unwrap();

    assert!(gcode.contains("S12000 M3 ; Set tool speed and start spindle"));
    assert!(gcode.contains("G1 Z0.000000 F100.5 ; Lower tool"));
    assert!(gcode.contains("G0 Z5 F1200; Raise tool"));
}

#[test]
fn test_parameters_fill_missing_fields_with_defaults() {
    let params: AnnularParameters =
        serde_json::from_str(r#"{ "inner_radius": 5.0, "tool_diameter": 2.0 }"#).unwrap();

    assert_eq!(params.inner_radius, 5.0);
    assert_eq!(params.tool_diameter, 2.0);
    assert_eq!(params.outer_radius, 20.0);
    assert_eq!(params.feedrate_move, 1000.0);
}
