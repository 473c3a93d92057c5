// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use tracing::trace;

use crate::bounds::{ErrorBounds, BOUNDS};
use crate::expansion::{estimate, product_difference, two_diff_tail, Accumulator};
use crate::{abs, Point2, Predicate};

/// Returns a positive value if the points `pa`, `pb`, and `pc` occur in counterclockwise order
/// (`pc` lies to the **left** of the directed line defined by `pa` and `pb`).
/// Returns a negative value if they occur in clockwise order (`pc` lies to the **right** of the directed line `pa, pb`).
/// Returns `0` if they are **collinear**.
///
/// The magnitude approximates twice the signed area of the triangle; the sign is exact.
/// Results for NaN or infinite coordinates are undefined.
pub fn orient2d<T: Into<f64>>(pa: Point2<T>, pb: Point2<T>, pc: Point2<T>) -> f64 {
    let (pa, pb, pc) = (pa.to_f64(), pb.to_f64(), pc.to_f64());
    let bounds = &BOUNDS;

    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;

    // Terms of opposite sign cannot cancel, so the rounded result already has the right sign.
    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return det;
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return det;
        }
        -detleft - detright
    } else {
        return det;
    };

    let errbound = bounds.orient2d.a * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }
    adapt(bounds, pa, pb, pc, detsum)
}

/// Non-robust counterpart of [`orient2d`]: a single double-precision evaluation.
///
/// May return a wrong sign (including a spurious zero) when the points are nearly collinear.
/// Results for NaN or infinite coordinates are undefined.
pub fn orient2dfast<T: Into<f64>>(pa: Point2<T>, pb: Point2<T>, pc: Point2<T>) -> f64 {
    let (pa, pb, pc) = (pa.to_f64(), pb.to_f64(), pc.to_f64());
    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;
    acx * bcy - acy * bcx
}

fn adapt(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    detsum: f64,
) -> f64 {
    trace!(predicate = %Predicate::Orient2D, "static filter inconclusive");

    let acx = pa.x - pc.x;
    let bcx = pb.x - pc.x;
    let acy = pa.y - pc.y;
    let bcy = pb.y - pc.y;

    let head = product_difference(acx, bcy, acy, bcx);
    let mut det = estimate(&head);
    let errbound = bounds.orient2d.b * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let acxtail = two_diff_tail(pa.x, pc.x, acx);
    let bcxtail = two_diff_tail(pb.x, pc.x, bcx);
    let acytail = two_diff_tail(pa.y, pc.y, acy);
    let bcytail = two_diff_tail(pb.y, pc.y, bcy);
    if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
        // The differences were exact, so `head` is the exact determinant.
        return det;
    }

    let errbound = bounds.orient2d.c * detsum + bounds.result * abs(det);
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if det >= errbound || -det >= errbound {
        return det;
    }

    trace!(predicate = %Predicate::Orient2D, "escalating to exact expansion");
    let mut fin = Accumulator::<16>::new(&head);
    fin.add(&product_difference(acxtail, bcy, acytail, bcx));
    fin.add(&product_difference(acx, bcytail, acy, bcxtail));
    fin.add(&product_difference(acxtail, bcytail, acytail, bcxtail));
    fin.most_significant()
}
