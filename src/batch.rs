// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Elementwise evaluation over slices of points.
//!
//! Every function checks all lengths before evaluating anything, so `out` is
//! left untouched when an error is returned. The first slice argument fixes
//! the expected length.

use thiserror::Error;
use tracing::debug;

use crate::{incircle, insphere, orient2d, orient3d, Point2, Point3, Predicate};

/// Rejection of a batch call whose slices disagree in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("{predicate}: argument `{argument}` has {found} points, expected {expected}")]
    LengthMismatch {
        predicate: Predicate,
        argument: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{predicate}: output has room for {found} results, expected {expected}")]
    OutputLength {
        predicate: Predicate,
        expected: usize,
        found: usize,
    },
}

fn check_lengths(
    predicate: Predicate,
    inputs: &[(&'static str, usize)],
    out: usize,
) -> Result<(), BatchError> {
    let expected = inputs.first().map_or(out, |&(_, len)| len);
    for &(argument, found) in inputs {
        if found != expected {
            debug!(%predicate, argument, expected, found, "rejecting batch");
            return Err(BatchError::LengthMismatch {
                predicate,
                argument,
                expected,
                found,
            });
        }
    }
    if out != expected {
        debug!(%predicate, expected, found = out, "rejecting batch output");
        return Err(BatchError::OutputLength {
            predicate,
            expected,
            found: out,
        });
    }
    Ok(())
}

/// Writes `orient2d(a[i], b[i], c[i])` to `out[i]`.
pub fn orient2d_batch<T: Into<f64> + Copy>(
    a: &[Point2<T>],
    b: &[Point2<T>],
    c: &[Point2<T>],
    out: &mut [f64],
) -> Result<(), BatchError> {
    check_lengths(
        Predicate::Orient2D,
        &[("a", a.len()), ("b", b.len()), ("c", c.len())],
        out.len(),
    )?;
    for (i, result) in out.iter_mut().enumerate() {
        *result = orient2d(a[i], b[i], c[i]);
    }
    Ok(())
}

/// Writes `orient3d(a[i], b[i], c[i], d[i])` to `out[i]`.
pub fn orient3d_batch<T: Into<f64> + Copy>(
    a: &[Point3<T>],
    b: &[Point3<T>],
    c: &[Point3<T>],
    d: &[Point3<T>],
    out: &mut [f64],
) -> Result<(), BatchError> {
    check_lengths(
        Predicate::Orient3D,
        &[("a", a.len()), ("b", b.len()), ("c", c.len()), ("d", d.len())],
        out.len(),
    )?;
    for (i, result) in out.iter_mut().enumerate() {
        *result = orient3d(a[i], b[i], c[i], d[i]);
    }
    Ok(())
}

/// Writes `incircle(a[i], b[i], c[i], d[i])` to `out[i]`.
pub fn incircle_batch<T: Into<f64> + Copy>(
    a: &[Point2<T>],
    b: &[Point2<T>],
    c: &[Point2<T>],
    d: &[Point2<T>],
    out: &mut [f64],
) -> Result<(), BatchError> {
    check_lengths(
        Predicate::InCircle,
        &[("a", a.len()), ("b", b.len()), ("c", c.len()), ("d", d.len())],
        out.len(),
    )?;
    for (i, result) in out.iter_mut().enumerate() {
        *result = incircle(a[i], b[i], c[i], d[i]);
    }
    Ok(())
}

/// Writes `insphere(a[i], b[i], c[i], d[i], e[i])` to `out[i]`.
pub fn insphere_batch<T: Into<f64> + Copy>(
    a: &[Point3<T>],
    b: &[Point3<T>],
    c: &[Point3<T>],
    d: &[Point3<T>],
    e: &[Point3<T>],
    out: &mut [f64],
) -> Result<(), BatchError> {
    check_lengths(
        Predicate::InSphere,
        &[
            ("a", a.len()),
            ("b", b.len()),
            ("c", c.len()),
            ("d", d.len()),
            ("e", e.len()),
        ],
        out.len(),
    )?;
    for (i, result) in out.iter_mut().enumerate() {
        *result = insphere(a[i], b[i], c[i], d[i], e[i]);
    }
    Ok(())
}

/// Classifies the query points `(xs[i], ys[i])` against the directed line `a -> b`.
///
/// `out[i]` is positive when the point lies to the left of the line, negative
/// to the right, and zero on it.
pub fn orient2d_xy<T: Into<f64> + Copy>(
    a: Point2<T>,
    b: Point2<T>,
    xs: &[T],
    ys: &[T],
    out: &mut [f64],
) -> Result<(), BatchError> {
    check_lengths(
        Predicate::Orient2D,
        &[("xs", xs.len()), ("ys", ys.len())],
        out.len(),
    )?;
    for ((result, &x), &y) in out.iter_mut().zip(xs).zip(ys) {
        *result = orient2d(a, b, Point2::new(x, y));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient2d_batch_matches_scalar() {
        let a = [Point2::new(0.0, 0.0), Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let b = [Point2::new(1.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 2.0)];
        let c = [Point2::new(0.0, 1.0), Point2::new(0.0, -1.0), Point2::new(3.0, 3.0)];
        let mut out = [f64::NAN; 3];
        orient2d_batch(&a, &b, &c, &mut out).unwrap();
        for i in 0..3 {
            assert_eq!(out[i], orient2d(a[i], b[i], c[i]));
        }
        assert!(out[0] > 0.0);
        assert!(out[1] < 0.0);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn mismatched_input_is_rejected_before_evaluation() {
        let a = [Point2::new(0.0, 0.0); 2];
        let b = [Point2::new(1.0, 0.0); 2];
        let c = [Point2::new(0.0, 1.0); 1];
        let mut out = [7.0; 2];
        let err = orient2d_batch(&a, &b, &c, &mut out).unwrap_err();
        assert_eq!(
            err,
            BatchError::LengthMismatch {
                predicate: Predicate::Orient2D,
                argument: "c",
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(out, [7.0; 2]);
    }

    #[test]
    fn short_output_is_rejected() {
        let a = [Point3::new(0.0, 0.0, 0.0); 2];
        let b = [Point3::new(1.0, 0.0, 0.0); 2];
        let c = [Point3::new(0.0, 1.0, 0.0); 2];
        let d = [Point3::new(0.0, 0.0, 1.0); 2];
        let mut out = [0.0; 1];
        assert_eq!(
            orient3d_batch(&a, &b, &c, &d, &mut out),
            Err(BatchError::OutputLength {
                predicate: Predicate::Orient3D,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn empty_batches_succeed() {
        let none: [Point3<f64>; 0] = [];
        let mut out: [f64; 0] = [];
        assert!(insphere_batch(&none, &none, &none, &none, &none, &mut out).is_ok());
        assert!(incircle_batch::<f64>(&[], &[], &[], &[], &mut out).is_ok());
    }

    #[test]
    fn incircle_and_insphere_batches() {
        let a = [Point2::new(0.0, 0.0)];
        let b = [Point2::new(1.0, 0.0)];
        let c = [Point2::new(0.0, 1.0)];
        let d = [Point2::new(0.25, 0.25)];
        let mut out = [0.0];
        incircle_batch(&a, &b, &c, &d, &mut out).unwrap();
        assert!(out[0] > 0.0);

        let a = [Point3::new(0.0, 0.0, 0.0)];
        let b = [Point3::new(1.0, 0.0, 0.0)];
        let c = [Point3::new(0.0, 1.0, 0.0)];
        let d = [Point3::new(0.0, 0.0, 1.0)];
        let e = [Point3::new(0.25, 0.25, 0.25)];
        insphere_batch(&a, &b, &c, &d, &e, &mut out).unwrap();
        assert!(out[0] > 0.0);
    }

    #[test]
    fn orient2d_xy_classifies_query_points() {
        let xs = [0.5f32, 0.5, 2.0];
        let ys = [1.0f32, -1.0, 0.0];
        let mut out = [0.0; 3];
        orient2d_xy(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), &xs, &ys, &mut out).unwrap();
        assert!(out[0] > 0.0);
        assert!(out[1] < 0.0);
        assert_eq!(out[2], 0.0);

        let err = orient2d_xy(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), &xs, &ys[..2], &mut out)
            .unwrap_err();
        assert!(matches!(err, BatchError::LengthMismatch { argument: "ys", .. }));
    }

    #[test]
    fn error_messages_name_the_predicate() {
        let err = BatchError::OutputLength {
            predicate: Predicate::InSphere,
            expected: 3,
            found: 2,
        };
        let message = std::format!("{}", err);
        assert!(message.starts_with("insphere"));
    }
}
