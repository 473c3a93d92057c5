use super::{
    incircle, incirclefast, insphere, inspherefast, orient2d, orient2dfast, orient3d, orient3dfast,
    Point2, Point3,
};

use core::f64::MIN_POSITIVE;

/// Sign of a predicate result, with both zeros mapped to `0`.
fn sign(det: f64) -> i8 {
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

#[test]
fn test_orient2d_scenarios() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    assert!(orient2d(a, b, Point2::new(0.0, 1.0)) > 0.0);
    assert!(orient2d(a, b, Point2::new(0.0, -1.0)) < 0.0);
    assert_eq!(orient2d(a, b, Point2::new(2.0, 0.0)), 0.0);
    assert_eq!(orient2d(a, a, b), 0.0);
}

#[test]
fn test_orient2d() {
    let from = Point2::new(-1f64, -1.0);
    let to = Point2::new(1f64, 1.0);
    let p1 = Point2::new(MIN_POSITIVE, MIN_POSITIVE);
    let p2 = Point2::new(-MIN_POSITIVE, -MIN_POSITIVE);
    let p3 = Point2::new(-MIN_POSITIVE, MIN_POSITIVE);
    let p4 = Point2::new(MIN_POSITIVE, -MIN_POSITIVE);

    for &(p, expected) in &[(p1, 0.0), (p2, 0.0), (p3, 1.0), (p4, -1.0)] {
        let det = orient2d(from, to, p);
        assert!(det == expected || det.signum() == expected.signum());
    }
}

#[test]
fn test_orient2d_near_collinear() {
    // None of these decimals is representable, so the points are only
    // approximately collinear.
    let a = Point2::new(0.1, 0.3);
    let b = Point2::new(0.2, 0.6);
    let c = Point2::new(0.3, 0.9);
    let det = orient2d(a, b, c);
    assert_eq!(sign(det), -sign(orient2d(b, a, c)));
    assert_eq!(sign(det), sign(orient2d(c, a, b)));
    assert_eq!(sign(det), sign(orient2d(b, c, a)));
}

#[test]
fn test_orient3d_scenarios() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    assert!(orient3d(a, b, c, Point3::new(0.0, 0.0, 1.0)) > 0.0);
    assert!(orient3d(a, b, c, Point3::new(0.0, 0.0, -1.0)) < 0.0);
    assert_eq!(orient3d(a, b, c, Point3::new(3.0, -2.0, 0.0)), 0.0);
    assert_eq!(orient3d(a, b, c, Point3::new(0.0, 0.0, 1.0)), 1.0);
}

#[test]
fn test_orient3d() {
    // plane
    let pa = Point3::new(1., 0., 1.);
    let pb = Point3::new(-1., 0., -1.);
    let pc = Point3::new(-1., 0., 0.);

    // on the side the plane's normal points to
    let p1 = Point3::new(MIN_POSITIVE, MIN_POSITIVE, MIN_POSITIVE);
    // opposite side
    let p2 = Point3::new(-MIN_POSITIVE, -MIN_POSITIVE, -MIN_POSITIVE);
    // on the plane
    let p3 = Point3::new(0., 0., 0.);

    for &(p, expected) in &[(p1, 1.0), (p2, -1.0), (p3, 0.0)] {
        let det = orient3d(pa, pb, pc, p);
        assert!(det == expected || det.signum() == expected.signum());
    }
}

#[test]
fn test_incircle_scenarios() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);
    assert!(incircle(a, b, c, Point2::new(0.25, 0.25)) > 0.0);
    assert!(incircle(a, b, c, Point2::new(0.5, 0.5)) > 0.0);
    assert!(incircle(a, b, c, Point2::new(2.0, 2.0)) < 0.0);
    assert_eq!(incircle(a, b, c, Point2::new(1.0, 1.0)), 0.0);
    // Clockwise order reverses the sign.
    assert!(incircle(b, a, c, Point2::new(0.5, 0.5)) < 0.0);
}

#[test]
fn test_incircle() {
    let from = Point2::new(-1f64, -1.0);
    let to = Point2::new(1f64, 1.0);
    let p_left = Point2::new(-MIN_POSITIVE, MIN_POSITIVE);
    let p_right = Point2::new(MIN_POSITIVE, -MIN_POSITIVE);
    let p_query = Point2::new(2.0, 2.0);

    assert!(incircle(from, p_left, to, p_query) > 0.0);
    assert!(incircle(from, to, p_right, p_query) > 0.0);
}

#[test]
fn test_insphere_scenarios() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);
    let d = Point3::new(0.0, 0.0, 1.0);
    assert!(orient3d(a, b, c, d) > 0.0);
    assert!(insphere(a, b, c, d, Point3::new(0.25, 0.25, 0.25)) > 0.0);
    assert!(insphere(a, b, c, d, Point3::new(2.0, 2.0, 2.0)) < 0.0);
    assert_eq!(insphere(a, b, c, d, Point3::new(1.0, 1.0, 1.0)), 0.0);
}

#[test]
fn test_insphere() {
    // Ordered so that orient3d(pa, pb, pc, pd) is positive.
    let pa = Point3::new(0.0, 1.0, 0.0);
    let pb = Point3::new(1.0, 0.0, 0.0);
    let pc = Point3::new(0.0, 0.0, 1.0);
    let pd = Point3::new(0.0, -1.0, 0.0);
    assert!(orient3d(pa, pb, pc, pd) > 0.0);

    // point outside sphere
    let pe1 = Point3::new(-1.01, 0., 0.);
    // point inside sphere
    let pe2 = Point3::new(0., 0., 0.99);
    // cospherical point
    let pe3 = Point3::new(0., 0., -1.);

    assert!(insphere(pa, pb, pc, pd, pe1) < 0.0);
    assert!(insphere(pa, pb, pc, pd, pe2) > 0.0);
    assert!(insphere(pa, pb, pc, pd, pe3) == 0.0);
}

#[test]
fn test_insphere_tiny_offsets() {
    let pa = Point3::new(0.0, 1.0, 0.0);
    let pb = Point3::new(1.0, 0.0, 0.0);
    let pc = Point3::new(0.0, 0.0, 1.0);
    let pd = Point3::new(0.0, -1.0, 0.0);

    // Just inside and just outside the unit sphere along the negative z axis.
    let inside = Point3::new(0.0, 0.0, -1.0 + f64::EPSILON);
    let outside = Point3::new(0.0, 0.0, -1.0 - f64::EPSILON);
    assert!(insphere(pa, pb, pc, pd, inside) > 0.0);
    assert!(insphere(pa, pb, pc, pd, outside) < 0.0);
}

#[test]
fn test_issue48_a() {
    let pa = Point2::new(2.1045541600524288e-15, -1.0000000000000016);
    let pb = Point2::new(1.000000000000005, -3.350874324301223e-16);
    let pc = Point2::new(7.553997323229233e-15, 0.9999999999999958);
    let pd = Point2::new(-0.9999999999999922, -7.073397829693697e-15);
    // the answer of a naive evaluation
    assert!(incircle(pa, pb, pc, pd) != 1.9217716744382023e-16f64);
    // the answer of the reference implementation
    assert!(incircle(pa, pb, pc, pd) == -8.0140565430358e-30f64);
}

#[test]
fn test_issue48_b() {
    let pa = Point2::new(9.128561612013288e-15, -1.0000000000000029);
    let pb = Point2::new(1.0000000000000044, -5.451395142523081e-15);
    let pc = Point2::new(3.851214418148064e-15, 0.9999999999999961);
    let pd = Point2::new(-0.9999999999999946, -6.6797960341085084e-15);
    // the answer of a naive evaluation
    assert!(incircle(pa, pb, pc, pd) != -1.1074731814540733e-16);
    // the answer of the reference implementation
    assert!(incircle(pa, pb, pc, pd) == 7.226864249343135e-30);
}

#[test]
fn test_swapping_rows_negates() {
    let p = [
        Point3::new(0.3, -1.7, 2.2),
        Point3::new(1.1, 0.4, -0.9),
        Point3::new(-2.5, 0.8, 0.1),
        Point3::new(0.6, 0.6, 1.4),
        Point3::new(-0.2, -0.3, 0.5),
    ];
    let q = p.map(|v| Point2::new(v.x, v.y));

    assert_eq!(
        sign(orient2d(q[0], q[1], q[2])),
        -sign(orient2d(q[1], q[0], q[2]))
    );
    assert_eq!(
        sign(incircle(q[0], q[1], q[2], q[3])),
        -sign(incircle(q[1], q[0], q[2], q[3]))
    );
    assert_eq!(
        sign(orient3d(p[0], p[1], p[2], p[3])),
        -sign(orient3d(p[1], p[0], p[2], p[3]))
    );
    assert_eq!(
        sign(insphere(p[0], p[1], p[2], p[3], p[4])),
        -sign(insphere(p[1], p[0], p[2], p[3], p[4]))
    );
}

#[test]
fn test_fast_variants_agree_away_from_degeneracy() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(4.0, 1.0);
    let c = Point2::new(1.0, 3.0);
    let d = Point2::new(1.5, 1.5);
    assert_eq!(orient2dfast(a, b, c), orient2d(a, b, c));
    assert_eq!(sign(incirclefast(a, b, c, d)), sign(incircle(a, b, c, d)));

    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(2.0, 0.0, 0.0);
    let c = Point3::new(0.0, 2.0, 0.0);
    let d = Point3::new(0.0, 0.0, 2.0);
    let e = Point3::new(0.5, 0.5, 0.5);
    assert_eq!(orient3dfast(a, b, c, d), orient3d(a, b, c, d));
    assert_eq!(sign(inspherefast(a, b, c, d, e)), sign(insphere(a, b, c, d, e)));
}

#[test]
fn test_f32_input() {
    let a = Point2::new(0.0f32, 0.0);
    let b = Point2::new(1.0f32, 0.0);
    let c = Point2::new(0.5f32, 1e-30);
    assert!(orient2d(a, b, c) > 0.0);

    let wide = orient2d(
        Point2::new(0.0f64, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.5, f64::from(1e-30f32)),
    );
    assert_eq!(orient2d(a, b, c), wide);
}

#[test]
fn test_results_are_deterministic() {
    let a = Point2::new(0.1, 0.1);
    let b = Point2::new(0.2, 0.2);
    let c = Point2::new(0.3, 0.3);
    let d = Point2::new(0.4, 0.4);
    let first = (orient2d(a, b, c), incircle(a, b, c, d));
    for _ in 0..8 {
        assert_eq!((orient2d(a, b, c), incircle(a, b, c, d)), first);
    }
}

#[test]
fn test_point_conversions() {
    assert_eq!(Point2::from([1.0, 2.0]), Point2::new(1.0, 2.0));
    assert_eq!(Point2::from((1.0, 2.0)), Point2::new(1.0, 2.0));
    assert_eq!(Point3::from([1.0, 2.0, 3.0]), Point3::new(1.0, 2.0, 3.0));
    assert_eq!(Point3::from((1.0, 2.0, 3.0)), Point3::new(1.0, 2.0, 3.0));
}
