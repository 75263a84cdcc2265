// core/tests/test_angles.rs

use formgraph_core::angles::{joint_angle, Point2, RoundTo};

fn p(x: f64, y: f64) -> Point2 {
    Point2 { x, y }
}

#[test]
fn test_rett_linje_gir_180() {
    let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
    assert!((angle - 180.0).abs() < 1e-9, "got {angle}");
}

#[test]
fn test_rett_vinkel_gir_90() {
    let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5));
    assert!((angle - 90.0).abs() < 1e-9, "got {angle}");
}

#[test]
fn test_symmetri() {
    // angle(a,b,c) == angle(c,b,a) for vilkårlige tripler
    let cases = [
        (p(0.1, 0.2), p(0.5, 0.5), p(0.9, 0.3)),
        (p(0.0, 1.0), p(0.5, 0.5), p(1.0, 1.0)),
        (p(0.3, 0.3), p(0.4, 0.9), p(0.8, 0.1)),
    ];
    for (a, b, c) in cases {
        let lhs = joint_angle(a, b, c);
        let rhs = joint_angle(c, b, a);
        assert!((lhs - rhs).abs() < 1e-9, "asymmetri: {lhs} vs {rhs}");
    }
}

#[test]
fn test_alltid_indre_vinkel() {
    // Refleks-tilfellet: rå arctan-differanse > 180° skal foldes.
    let a = p(170f64.to_radians().cos(), 170f64.to_radians().sin());
    let c = p((-170f64).to_radians().cos(), (-170f64).to_radians().sin());
    let angle = joint_angle(a, p(0.0, 0.0), c);
    assert!((angle - 20.0).abs() < 1e-6, "got {angle}");

    for (a, b, c) in [
        (p(0.9, 0.9), p(0.1, 0.1), p(0.9, 0.1)),
        (p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)),
    ] {
        let angle = joint_angle(a, b, c);
        assert!((0.0..=180.0).contains(&angle), "utenfor [0,180]: {angle}");
    }
}

#[test]
fn test_round_to() {
    assert_eq!(1.23456.round_to(3), 1.235);
    assert_eq!(1.23456.round_to(1), 1.2);
    assert_eq!((-0.0005).round_to(3), -0.001);
    assert_eq!(2.5.round_to(0), 3.0);
}
