use energymet_rust::config::ModelConstants;
use energymet_rust::error::EnergyModelError;
use energymet_rust::wind::{
    bias_correct, to_capacity_factor, to_capacity_factor_multi_class, wind_speed, PowerCurve,
};
use ndarray::{arr2, Array2, Array3};

/// Curve rising linearly from 0 at 0 m/s to 1 at 50 m/s
fn linear_curve() -> PowerCurve {
    PowerCurve::new(vec![0.0, 50.0], vec![0.0, 1.0]).unwrap()
}

#[test]
fn test_wind_speed_pythagoras() {
    let u = Array3::from_elem((2, 1, 1), 3.0);
    let v = Array3::from_elem((2, 1, 1), 4.0);
    let speed = wind_speed(&u, &v).unwrap();
    assert!((speed[[0, 0, 0]] - 5.0).abs() < 1e-12);
}

#[test]
fn test_wind_speed_is_non_negative() {
    let u = Array3::from_elem((1, 1, 1), -3.0);
    let v = Array3::from_elem((1, 1, 1), -4.0);
    let speed = wind_speed(&u, &v).unwrap();
    assert!((speed[[0, 0, 0]] - 5.0).abs() < 1e-12);

    let mismatched = Array3::from_elem((2, 1, 1), 0.0);
    assert!(matches!(
        wind_speed(&u, &mismatched),
        Err(EnergyModelError::ShapeMismatch(_))
    ));
}

#[test]
fn test_bias_correction_clamps_at_zero() {
    let speed = Array3::from_elem((2, 1, 2), 2.0);
    let correction = arr2(&[[1.0, -5.0]]);

    let corrected = bias_correct(&speed, &correction).unwrap();

    assert!((corrected[[0, 0, 0]] - 3.0).abs() < 1e-12);
    assert_eq!(corrected[[0, 0, 1]], 0.0);
    assert_eq!(corrected[[1, 0, 1]], 0.0);
}

#[test]
fn test_power_curve_parsing() {
    let table = "0.0 2300 0.0\n5.0 2300 0.2\n12.0 2300 1.0\n25.0 2300 0.0\n";
    let curve = PowerCurve::from_table_str(table).unwrap();
    let constants = ModelConstants::default();
    let resampled = curve.resample(&constants);

    // Cut-in region interpolates between the tabulated points
    assert!(resampled.capacity_factor(2.5) > 0.0);
    assert!(resampled.capacity_factor(2.5) < 0.2);
}

#[test]
fn test_power_curve_validation() {
    assert!(matches!(
        PowerCurve::from_table_str("1.0 2300\n"),
        Err(EnergyModelError::InvalidPowerCurve(_))
    ));
    assert!(matches!(
        PowerCurve::from_table_str("1.0 2300 0.5\n"),
        Err(EnergyModelError::InvalidPowerCurve(_))
    ));
    // Speeds must be strictly increasing
    assert!(matches!(
        PowerCurve::new(vec![0.0, 5.0, 5.0], vec![0.0, 0.5, 0.6]),
        Err(EnergyModelError::InvalidPowerCurve(_))
    ));
}

#[test]
fn test_binned_lookup_midpoint_average() {
    let constants = ModelConstants::default();
    let resampled = linear_curve().resample(&constants);

    // Speed 5.0 sits on resampled edge 50; the lookup averages points 50
    // and 51 of the fine grid: 0.5 * (0.100 + 0.102)
    assert!((resampled.capacity_factor(5.0) - 0.101).abs() < 1e-9);
}

#[test]
fn test_speeds_above_curve_span_clamp_to_last_bin() {
    let constants = ModelConstants::default();
    let resampled = linear_curve().resample(&constants);

    let at_edge = resampled.capacity_factor(50.0);
    let beyond = resampled.capacity_factor(75.0);
    assert_eq!(at_edge, beyond);
    assert!((at_edge - 0.999).abs() < 1e-9);
}

#[test]
fn test_conversion_is_monotonic_for_monotonic_curve() {
    let constants = ModelConstants::default();
    let curve = PowerCurve::new(vec![0.0, 4.0, 12.0, 50.0], vec![0.0, 0.1, 0.9, 1.0]).unwrap();

    let n = 120;
    let speed = Array3::from_shape_fn((n, 1, 1), |(t, _, _)| t as f64 * 0.37);
    let cf = to_capacity_factor(&speed, &curve, &constants);

    for t in 1..n {
        assert!(cf[[t, 0, 0]] >= cf[[t - 1, 0, 0]]);
    }
}

#[test]
fn test_multi_class_single_point_uses_its_class_curve() {
    let constants = ModelConstants::default();
    let curve1 = linear_curve();
    // Deliberately different shapes for the unused classes
    let curve2 = PowerCurve::new(vec![0.0, 50.0], vec![1.0, 0.0]).unwrap();
    let curve3 = PowerCurve::new(vec![0.0, 25.0, 50.0], vec![0.5, 0.5, 0.5]).unwrap();

    let speed = Array3::from_shape_fn((5, 1, 1), |(t, _, _)| 2.0 + t as f64);
    let class_map = arr2(&[[1.0]]);

    let multi = to_capacity_factor_multi_class(
        &speed,
        &class_map,
        &[curve1.clone(), curve2, curve3],
        &constants,
    )
    .unwrap();
    let single = to_capacity_factor(&speed, &curve1, &constants);

    assert_eq!(multi, single);
}

#[test]
fn test_multi_class_every_point_contributes_one_class() {
    let constants = ModelConstants::default();
    let curves = [
        linear_curve(),
        PowerCurve::new(vec![0.0, 50.0], vec![0.0, 0.5]).unwrap(),
        PowerCurve::new(vec![0.0, 50.0], vec![0.0, 0.25]).unwrap(),
    ];
    let class_map = arr2(&[[1.0, 2.0], [3.0, 1.0]]);
    let speed = Array3::from_elem((1, 2, 2), 10.0);

    let cf = to_capacity_factor_multi_class(&speed, &class_map, &curves, &constants).unwrap();

    let expected = [
        curves[0].resample(&constants).capacity_factor(10.0),
        curves[1].resample(&constants).capacity_factor(10.0),
        curves[2].resample(&constants).capacity_factor(10.0),
    ];
    assert!((cf[[0, 0, 0]] - expected[0]).abs() < 1e-12);
    assert!((cf[[0, 0, 1]] - expected[1]).abs() < 1e-12);
    assert!((cf[[0, 1, 0]] - expected[2]).abs() < 1e-12);
    assert!((cf[[0, 1, 1]] - expected[0]).abs() < 1e-12);
}

#[test]
fn test_multi_class_unknown_class_contributes_zero() {
    let constants = ModelConstants::default();
    let curves = [linear_curve(), linear_curve(), linear_curve()];
    let class_map = arr2(&[[1.0, 0.0]]);
    let speed = Array3::from_elem((1, 1, 2), 20.0);

    let cf = to_capacity_factor_multi_class(&speed, &class_map, &curves, &constants).unwrap();

    assert!(cf[[0, 0, 0]] > 0.0);
    assert_eq!(cf[[0, 0, 1]], 0.0);
}

#[test]
fn test_multi_class_map_shape_mismatch() {
    let constants = ModelConstants::default();
    let curves = [linear_curve(), linear_curve(), linear_curve()];
    let class_map = Array2::from_elem((2, 2), 1.0);
    let speed = Array3::from_elem((1, 1, 2), 20.0);

    assert!(matches!(
        to_capacity_factor_multi_class(&speed, &class_map, &curves, &constants),
        Err(EnergyModelError::ShapeMismatch(_))
    ));
}
