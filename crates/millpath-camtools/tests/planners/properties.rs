use std::f64::consts::{PI, TAU};

use millpath_camtools::{
    AnnularGeometry, AnnularParameters, AnnularPathPlanner, LinearParameters, LinearPathPlanner,
    MotionCommand, PathPlanner, RemainingArc,
};
use proptest::prelude::*;

fn annular_params() -> impl Strategy<Value = AnnularParameters> {
    (
        0.0..30.0f64,
        2.0..20.0f64,
        -180.0..360.0f64,
        -180.0..360.0f64,
        0.1..1.9f64,
        0.0..5.0f64,
        0.25..2.0f64,
    )
        .prop_map(
            |(inner, width, start, end, tool_ratio, total, step)| AnnularParameters {
                inner_radius: inner,
                outer_radius: inner + width,
                start_angle: start,
                end_angle: end,
                tool_diameter: (width * tool_ratio).max(1.0),
                total_depth: total,
                step_depth: step,
                ..Default::default()
            },
        )
}

/// Radii of the exported passes, grouped by depth level
fn radii_per_depth(commands: &[MotionCommand]) -> Vec<(f64, Vec<f64>)> {
    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for command in commands {
        match command {
            MotionCommand::DepthSection { z } => groups.push((*z, Vec::new())),
            MotionCommand::RadialPass { radius } => {
                if let Some((_, radii)) = groups.last_mut() {
                    radii.push(*radius);
                }
            }
            _ => {}
        }
    }
    groups
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn radial_passes_stay_between_adjusted_radii(params in annular_params()) {
        let geometry = AnnularGeometry::new(&params).unwrap();
        let commands = AnnularPathPlanner::new(params).export_commands().unwrap();

        for (_, radii) in radii_per_depth(&commands) {
            prop_assert_eq!(*radii.last().unwrap(), geometry.adjusted_outer);
            if geometry.adjusted_outer >= geometry.adjusted_inner {
                for radius in &radii {
                    prop_assert!(*radius >= geometry.adjusted_inner);
                    prop_assert!(*radius <= geometry.adjusted_outer);
                }
            } else {
                prop_assert_eq!(radii.len(), 1);
            }
        }
    }

    #[test]
    fn final_depth_is_exactly_total_depth(params in annular_params()) {
        let total = params.total_depth;
        let commands = AnnularPathPlanner::new(params).export_commands().unwrap();
        let groups = radii_per_depth(&commands);

        prop_assert_eq!(groups.first().map(|g| g.0), Some(0.0));
        prop_assert_eq!(groups.last().map(|g| g.0), Some(-total));
        for (z, _) in &groups {
            prop_assert!(*z <= 0.0 && *z >= -total);
        }
    }

    #[test]
    fn kept_arc_is_complement_of_removed_wedge(
        lower in -180.0..=0.0f64,
        span in 1.0..359.0f64,
    ) {
        let higher = lower + span;
        let arc = RemainingArc::from_removed_wedge(higher, lower);

        prop_assert!((arc.start - higher * PI / 180.0).abs() < 1e-12);
        prop_assert!((arc.sweep() - (TAU - span * PI / 180.0)).abs() < 1e-9);
        for angle in arc.sample_angles(50) {
            let degrees = (angle * 180.0 / PI).rem_euclid(360.0);
            let lower_wrapped = lower.rem_euclid(360.0);
            let inside_wedge = if lower_wrapped + span <= 360.0 {
                degrees > lower_wrapped + 1e-6 && degrees < lower_wrapped + span - 1e-6
            } else {
                degrees > lower_wrapped + 1e-6 || degrees < lower_wrapped + span - 360.0 - 1e-6
            };
            prop_assert!(!inside_wedge);
        }
    }

    #[test]
    fn planning_is_deterministic(params in annular_params()) {
        let planner = AnnularPathPlanner::new(params);
        let first = planner.plan().unwrap();
        let second = planner.plan().unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_gcode(), second.to_gcode());
    }

    #[test]
    fn linear_depth_never_overshoots(
        depth_end in 0.0..10.0f64,
        depth_step in 0.05..3.0f64,
    ) {
        let params = LinearParameters { depth_end, depth_step, ..Default::default() };
        let z_base = params.z_base;
        let commands = LinearPathPlanner::new(params).export_commands().unwrap();
        let depths: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                MotionCommand::FeedZ { z, .. } => Some(*z),
                _ => None,
            })
            .collect();

        prop_assert_eq!(*depths.last().unwrap(), z_base);
        let cutting = &depths[..depths.len() - 1];
        prop_assert!(cutting.iter().all(|z| *z >= 0.0 && *z <= depth_end));
        prop_assert_eq!(*cutting.last().unwrap(), depth_end);
    }
}
