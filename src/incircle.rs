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
use crate::expansion::{
    product_difference, sum_of_squares, two_diff_tail, two_product, two_two_diff, two_two_sum,
    Accumulator, Expansion,
};
use crate::{abs, Point2, Predicate};

/// Returns a positive value if the point `pd` lies **inside** the circle passing through `pa`, `pb`, and `pc`.
/// Returns a negative value if it lies **outside** the circle.
/// Returns `0` if the four points are **cocircular**.
///
/// **Note**: The points `pa`, `pb`, and `pc` must be in **counterclockwise order**, or the sign of the result will be reversed.
/// Results for NaN or infinite coordinates are undefined.
pub fn incircle<T: Into<f64>>(
    pa: Point2<T>,
    pb: Point2<T>,
    pc: Point2<T>,
    pd: Point2<T>,
) -> f64 {
    let (pa, pb, pc, pd) = (pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64());
    let bounds = &BOUNDS;

    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (abs(bdxcdy) + abs(cdxbdy)) * alift
        + (abs(cdxady) + abs(adxcdy)) * blift
        + (abs(adxbdy) + abs(bdxady)) * clift;

    let errbound = bounds.incircle.a * permanent;
    if det > errbound || -det > errbound {
        return det;
    }
    adapt(bounds, pa, pb, pc, pd, permanent)
}

/// Non-robust counterpart of [`incircle`]: a single double-precision evaluation.
///
/// May return a wrong sign (including a spurious zero) when the points are nearly cocircular.
/// Results for NaN or infinite coordinates are undefined.
pub fn incirclefast<T: Into<f64>>(
    pa: Point2<T>,
    pb: Point2<T>,
    pc: Point2<T>,
    pd: Point2<T>,
) -> f64 {
    let (pa, pb, pc, pd) = (pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64());
    let adx = pa.x - pd.x;
    let ady = pa.y - pd.y;
    let bdx = pb.x - pd.x;
    let bdy = pb.y - pd.y;
    let cdx = pc.x - pd.x;
    let cdy = pc.y - pd.y;

    let abdet = adx * bdy - bdx * ady;
    let bcdet = bdx * cdy - cdx * bdy;
    let cadet = cdx * ady - adx * cdy;
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    alift * bcdet + blift * cadet + clift * abdet
}

/// Exact lifted minor `(x^2 + y^2) * minor`.
fn lifted(minor: &[f64; 4], x: f64, y: f64) -> Expansion<32> {
    let xx = Expansion::<16>::scaled(&Expansion::<8>::scaled(minor, x), x);
    let yy = Expansion::<16>::scaled(&Expansion::<8>::scaled(minor, y), y);
    Expansion::sum(&xx, &yy)
}

/// First-order contribution of one coordinate tail.
///
/// Returns `tail * minor` (reused by the second-order terms) and
/// `2 * coord * tail * minor + tail * square1 * m1 + tail * square2 * m2`.
fn tail_term(
    minor: &[f64; 4],
    tail: f64,
    coord: f64,
    (square1, m1): (&[f64; 4], f64),
    (square2, m2): (&[f64; 4], f64),
) -> (Expansion<8>, Expansion<48>) {
    let tail_minor = Expansion::<8>::scaled(minor, tail);
    let doubled = Expansion::<16>::scaled(&tail_minor, 2.0 * coord);
    let first = Expansion::<16>::scaled(&Expansion::<8>::scaled(square1, tail), m1);
    let second = Expansion::<16>::scaled(&Expansion::<8>::scaled(square2, tail), m2);
    let partial = Expansion::<32>::sum(&doubled, &first);
    (tail_minor, Expansion::sum(&second, &partial))
}

/// Tail parts of the minor `p x q`: the terms with exactly one tail factor,
/// and the term with two.
fn minor_tails(
    (pxt, pyt, px, py): (f64, f64, f64, f64),
    (qxt, qyt, qx, qy): (f64, f64, f64, f64),
) -> (Expansion<8>, Expansion<4>) {
    let u = two_two_sum(two_product(pxt, qy), two_product(px, qyt));
    let v = two_two_sum(two_product(qxt, -py), two_product(qx, -pyt));
    let single = Expansion::sum(&u, &v);
    let double = two_two_diff(two_product(pxt, qyt), two_product(qxt, pyt));
    (single, Expansion::from_components(&double))
}

/// Second-order contributions of one coordinate tail: the part pairing the
/// tail with the single-tail minor, and the part with the double-tail minor.
fn second_order(
    tail_minor: &[f64],
    tail: f64,
    coord: f64,
    single: &[f64],
    double: &[f64],
) -> (Expansion<48>, Expansion<64>) {
    let tail_tail_minor = Expansion::<16>::scaled(tail_minor, tail);
    let tail_single = Expansion::<16>::scaled(single, tail);
    let doubled_single = Expansion::<32>::scaled(&tail_single, 2.0 * coord);
    let near = Expansion::sum(&tail_tail_minor, &doubled_single);

    let tail_tail_single = Expansion::<32>::scaled(&tail_single, tail);
    let tail_double = Expansion::<8>::scaled(double, tail);
    let doubled_double = Expansion::<16>::scaled(&tail_double, 2.0 * coord);
    let tail_tail_double = Expansion::<16>::scaled(&tail_double, tail);
    let far = Expansion::<32>::sum(&doubled_double, &tail_tail_double);
    (near, Expansion::sum(&tail_tail_single, &far))
}

/// `square * t1 * t2`, the product of a squared length with two coordinate tails.
fn square_tails(square: &[f64; 4], t1: f64, t2: f64) -> Expansion<16> {
    Expansion::scaled(&Expansion::<8>::scaled(square, t1), t2)
}

fn adapt(
    bounds: &ErrorBounds,
    pa: Point2<f64>,
    pb: Point2<f64>,
    pc: Point2<f64>,
    pd: Point2<f64>,
    permanent: f64,
) -> f64 {
    trace!(predicate = %Predicate::InCircle, "static filter inconclusive");

    let adx = pa.x - pd.x;
    let bdx = pb.x - pd.x;
    let cdx = pc.x - pd.x;
    let ady = pa.y - pd.y;
    let bdy = pb.y - pd.y;
    let cdy = pc.y - pd.y;

    let bc = product_difference(bdx, cdy, cdx, bdy);
    let ca = product_difference(cdx, ady, adx, cdy);
    let ab = product_difference(adx, bdy, bdx, ady);

    let adet = lifted(&bc, adx, ady);
    let bdet = lifted(&ca, bdx, bdy);
    let cdet = lifted(&ab, cdx, cdy);
    let abdet = Expansion::<64>::sum(&adet, &bdet);
    let head = Expansion::<96>::sum(&abdet, &cdet);

    let mut det = head.estimate();
    let errbound = bounds.incircle.b * permanent;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let adxtail = two_diff_tail(pa.x, pd.x, adx);
    let adytail = two_diff_tail(pa.y, pd.y, ady);
    let bdxtail = two_diff_tail(pb.x, pd.x, bdx);
    let bdytail = two_diff_tail(pb.y, pd.y, bdy);
    let cdxtail = two_diff_tail(pc.x, pd.x, cdx);
    let cdytail = two_diff_tail(pc.y, pd.y, cdy);
    if [adxtail, bdxtail, cdxtail, adytail, bdytail, cdytail]
        .iter()
        .all(|&t| t == 0.0)
    {
        return det;
    }

    let errbound = bounds.incircle.c * permanent + bounds.result * abs(det);
    det += ((adx * adx + ady * ady)
        * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
        + 2.0 * (adx * adxtail + ady * adytail) * (bdx * cdy - bdy * cdx))
        + ((bdx * bdx + bdy * bdy)
            * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
            + 2.0 * (bdx * bdxtail + bdy * bdytail) * (cdx * ady - cdy * adx))
        + ((cdx * cdx + cdy * cdy)
            * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
            + 2.0 * (cdx * cdxtail + cdy * cdytail) * (adx * bdy - ady * bdx));
    if det >= errbound || -det >= errbound {
        return det;
    }

    trace!(predicate = %Predicate::InCircle, "escalating to exact expansion");

    let a_moves = adxtail != 0.0 || adytail != 0.0;
    let b_moves = bdxtail != 0.0 || bdytail != 0.0;
    let c_moves = cdxtail != 0.0 || cdytail != 0.0;

    // Squared lengths are only needed when another vertex carries a tail.
    let aa = if b_moves || c_moves {
        sum_of_squares(adx, ady)
    } else {
        [0.0; 4]
    };
    let bb = if c_moves || a_moves {
        sum_of_squares(bdx, bdy)
    } else {
        [0.0; 4]
    };
    let cc = if a_moves || b_moves {
        sum_of_squares(cdx, cdy)
    } else {
        [0.0; 4]
    };

    let mut fin = Accumulator::<1152>::new(&head);

    let mut axtbc = None;
    if adxtail != 0.0 {
        let (tail_minor, term) = tail_term(&bc, adxtail, adx, (&cc, bdy), (&bb, -cdy));
        fin.add(&term);
        axtbc = Some(tail_minor);
    }
    let mut aytbc = None;
    if adytail != 0.0 {
        let (tail_minor, term) = tail_term(&bc, adytail, ady, (&bb, cdx), (&cc, -bdx));
        fin.add(&term);
        aytbc = Some(tail_minor);
    }
    let mut bxtca = None;
    if bdxtail != 0.0 {
        let (tail_minor, term) = tail_term(&ca, bdxtail, bdx, (&aa, cdy), (&cc, -ady));
        fin.add(&term);
        bxtca = Some(tail_minor);
    }
    let mut bytca = None;
    if bdytail != 0.0 {
        let (tail_minor, term) = tail_term(&ca, bdytail, bdy, (&cc, adx), (&aa, -cdx));
        fin.add(&term);
        bytca = Some(tail_minor);
    }
    let mut cxtab = None;
    if cdxtail != 0.0 {
        let (tail_minor, term) = tail_term(&ab, cdxtail, cdx, (&bb, ady), (&aa, -bdy));
        fin.add(&term);
        cxtab = Some(tail_minor);
    }
    let mut cytab = None;
    if cdytail != 0.0 {
        let (tail_minor, term) = tail_term(&ab, cdytail, cdy, (&aa, bdx), (&bb, -adx));
        fin.add(&term);
        cytab = Some(tail_minor);
    }

    let a = (adxtail, adytail, adx, ady);
    let b = (bdxtail, bdytail, bdx, bdy);
    let c = (cdxtail, cdytail, cdx, cdy);

    if a_moves {
        let (bct, bctt) = if b_moves || c_moves {
            minor_tails(b, c)
        } else {
            (Expansion::zero(), Expansion::zero())
        };
        if let Some(axtbc) = &axtbc {
            let (near, far) = second_order(axtbc, adxtail, adx, &bct, &bctt);
            fin.add(&near);
            if bdytail != 0.0 {
                fin.add(&square_tails(&cc, adxtail, bdytail));
            }
            if cdytail != 0.0 {
                fin.add(&square_tails(&bb, -adxtail, cdytail));
            }
            fin.add(&far);
        }
        if let Some(aytbc) = &aytbc {
            let (near, far) = second_order(aytbc, adytail, ady, &bct, &bctt);
            fin.add(&near);
            fin.add(&far);
        }
    }

    if b_moves {
        let (cat, catt) = if c_moves || a_moves {
            minor_tails(c, a)
        } else {
            (Expansion::zero(), Expansion::zero())
        };
        if let Some(bxtca) = &bxtca {
            let (near, far) = second_order(bxtca, bdxtail, bdx, &cat, &catt);
            fin.add(&near);
            if cdytail != 0.0 {
                fin.add(&square_tails(&aa, bdxtail, cdytail));
            }
            if adytail != 0.0 {
                fin.add(&square_tails(&cc, -bdxtail, adytail));
            }
            fin.add(&far);
        }
        if let Some(bytca) = &bytca {
            let (near, far) = second_order(bytca, bdytail, bdy, &cat, &catt);
            fin.add(&near);
            fin.add(&far);
        }
    }

    if c_moves {
        let (abt, abtt) = if a_moves || b_moves {
            minor_tails(a, b)
        } else {
            (Expansion::zero(), Expansion::zero())
        };
        if let Some(cxtab) = &cxtab {
            let (near, far) = second_order(cxtab, cdxtail, cdx, &abt, &abtt);
            fin.add(&near);
            if adytail != 0.0 {
                fin.add(&square_tails(&bb, cdxtail, adytail));
            }
            if bdytail != 0.0 {
                fin.add(&square_tails(&aa, -cdxtail, bdytail));
            }
            fin.add(&far);
        }
        if let Some(cytab) = &cytab {
            let (near, far) = second_order(cytab, cdytail, cdy, &abt, &abtt);
            fin.add(&near);
            fin.add(&far);
        }
    }

    fin.most_significant()
}
