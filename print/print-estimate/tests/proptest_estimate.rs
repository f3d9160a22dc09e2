//! Property-based tests for the geometry estimator.
//!
//! Run with: cargo test -p print-estimate -- proptest

use print_estimate::{EstimateParams, GeometryError, estimate_object};
use print_types::MeshObject;
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0..1000.0f64,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn proptest_clamped_params_are_in_range(
        layer in arb_value(),
        infill in arb_value(),
        wall in arb_value(),
    ) {
        let params = EstimateParams::default()
            .with_layer_height(layer)
            .with_infill(infill)
            .with_wall_thickness(wall)
            .clamped();
        prop_assert!(params.layer_height_mm >= 0.1);
        prop_assert!((0.0..=100.0).contains(&params.infill_percent));
        prop_assert!(params.wall_thickness_mm >= 0.0);
    }

    #[test]
    fn proptest_estimates_are_never_negative(
        size in 0.5..200.0f64,
        layer in arb_value(),
        infill in arb_value(),
        mass in arb_value(),
    ) {
        let cube = MeshObject::cube("c", size);
        let params = EstimateParams::default()
            .with_layer_height(layer)
            .with_infill(infill)
            .with_grams_per_cm3(mass);
        let estimate = estimate_object(&cube, &params).unwrap();
        prop_assert!(estimate.weight_g >= 0.0);
        prop_assert!(estimate.print_time_hours >= 0.0);
        prop_assert!(estimate.printed_volume_mm3 <= estimate.volume_mm3 * (1.0 + 1e-12));
    }

    #[test]
    fn proptest_inverted_cube_is_degenerate(size in 0.5..200.0f64) {
        let mut cube = MeshObject::cube("c", size);
        cube.flip_winding();
        let is_degenerate = matches!(
            estimate_object(&cube, &EstimateParams::default()),
            Err(GeometryError::DegenerateMesh { .. })
        );
        prop_assert!(is_degenerate);
    }
}
