// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Orientation of four points in space.
//!
//! The evaluators below compute `| p-s  q-s  r-s |` (rows `p`, `q`, `r`
//! relative to the apex `s`). The public functions pass `(b, a, c, d)`, and
//! exchanging the first two rows yields `| b-a  c-a  d-a |`, the six-fold
//! signed volume of the tetrahedron `a, b, c, d`.

use tracing::trace;

use crate::bounds::{ErrorBounds, BOUNDS};
use crate::expansion::{
    product_difference, two_diff_tail, two_one_product, two_product, Accumulator, Expansion,
};
use crate::{abs, Point3, Predicate};

/// Returns a positive value if `pd` lies **above** the plane through `pa`, `pb`, and `pc`,
/// where "above" is the side from which `pa`, `pb`, `pc` appear in counterclockwise order
/// (equivalently, `pa, pb, pc, pd` form a right-handed tetrahedron).
/// Returns a negative value if `pd` lies below the plane.
/// Returns `0` if the four points are **coplanar**.
///
/// The magnitude approximates six times the signed volume of the tetrahedron; the sign is exact.
/// Results for NaN or infinite coordinates are undefined.
pub fn orient3d<T: Into<f64>>(
    pa: Point3<T>,
    pb: Point3<T>,
    pc: Point3<T>,
    pd: Point3<T>,
) -> f64 {
    let (pa, pb, pc, pd) = (pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64());
    evaluate(&BOUNDS, pb, pa, pc, pd)
}

/// Non-robust counterpart of [`orient3d`]: a single double-precision evaluation.
///
/// May return a wrong sign (including a spurious zero) when the points are nearly coplanar.
/// Results for NaN or infinite coordinates are undefined.
pub fn orient3dfast<T: Into<f64>>(
    pa: Point3<T>,
    pb: Point3<T>,
    pc: Point3<T>,
    pd: Point3<T>,
) -> f64 {
    let (pa, pb, pc, pd) = (pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64());
    let (pp, pq, pr, ps) = (pb, pa, pc, pd);

    let psx = pp.x - ps.x;
    let qsx = pq.x - ps.x;
    let rsx = pr.x - ps.x;
    let psy = pp.y - ps.y;
    let qsy = pq.y - ps.y;
    let rsy = pr.y - ps.y;
    let psz = pp.z - ps.z;
    let qsz = pq.z - ps.z;
    let rsz = pr.z - ps.z;

    psx * (qsy * rsz - qsz * rsy) + qsx * (rsy * psz - rsz * psy) + rsx * (psy * qsz - psz * qsy)
}

fn evaluate(
    bounds: &ErrorBounds,
    pp: Point3<f64>,
    pq: Point3<f64>,
    pr: Point3<f64>,
    ps: Point3<f64>,
) -> f64 {
    let psx = pp.x - ps.x;
    let qsx = pq.x - ps.x;
    let rsx = pr.x - ps.x;
    let psy = pp.y - ps.y;
    let qsy = pq.y - ps.y;
    let rsy = pr.y - ps.y;
    let psz = pp.z - ps.z;
    let qsz = pq.z - ps.z;
    let rsz = pr.z - ps.z;

    let qsxrsy = qsx * rsy;
    let rsxqsy = rsx * qsy;
    let rsxpsy = rsx * psy;
    let psxrsy = psx * rsy;
    let psxqsy = psx * qsy;
    let qsxpsy = qsx * psy;

    let det = psz * (qsxrsy - rsxqsy) + qsz * (rsxpsy - psxrsy) + rsz * (psxqsy - qsxpsy);
    let permanent = (abs(qsxrsy) + abs(rsxqsy)) * abs(psz)
        + (abs(rsxpsy) + abs(psxrsy)) * abs(qsz)
        + (abs(psxqsy) + abs(qsxpsy)) * abs(rsz);

    let errbound = bounds.orient3d.a * permanent;
    if det > errbound || -det > errbound {
        return det;
    }
    adapt(bounds, pp, pq, pr, ps, permanent)
}

/// Exact `xt * py - yt * px`, skipping products whose tail factor is zero.
fn tail_cross(xt: f64, yt: f64, px: f64, py: f64) -> Expansion<4> {
    match (xt == 0.0, yt == 0.0) {
        (true, true) => Expansion::zero(),
        (true, false) => {
            let (hi, lo) = two_product(-yt, px);
            Expansion::from_components(&[lo, hi])
        }
        (false, true) => {
            let (hi, lo) = two_product(xt, py);
            Expansion::from_components(&[lo, hi])
        }
        (false, false) => Expansion::from_components(&product_difference(xt, py, yt, px)),
    }
}

/// Adds the product of two coordinate tails with `z` and, when present, with `ztail`.
fn add_tail_product(fin: &mut Accumulator<192>, xt: f64, yt: f64, z: f64, ztail: f64) {
    let product = two_product(xt, yt);
    fin.add(&two_one_product(product, z));
    if ztail != 0.0 {
        fin.add(&two_one_product(product, ztail));
    }
}

fn adapt(
    bounds: &ErrorBounds,
    pp: Point3<f64>,
    pq: Point3<f64>,
    pr: Point3<f64>,
    ps: Point3<f64>,
    permanent: f64,
) -> f64 {
    trace!(predicate = %Predicate::Orient3D, "static filter inconclusive");

    let psx = pp.x - ps.x;
    let qsx = pq.x - ps.x;
    let rsx = pr.x - ps.x;
    let psy = pp.y - ps.y;
    let qsy = pq.y - ps.y;
    let rsy = pr.y - ps.y;
    let psz = pp.z - ps.z;
    let qsz = pq.z - ps.z;
    let rsz = pr.z - ps.z;

    let minor_qr = product_difference(qsx, rsy, rsx, qsy);
    let minor_rp = product_difference(rsx, psy, psx, rsy);
    let minor_pq = product_difference(psx, qsy, qsx, psy);

    let pdet = Expansion::<8>::scaled(&minor_qr, psz);
    let qdet = Expansion::<8>::scaled(&minor_rp, qsz);
    let rdet = Expansion::<8>::scaled(&minor_pq, rsz);
    let pqdet = Expansion::<16>::sum(&pdet, &qdet);
    let head = Expansion::<24>::sum(&pqdet, &rdet);

    let mut det = head.estimate();
    let errbound = bounds.orient3d.b * permanent;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let psxtail = two_diff_tail(pp.x, ps.x, psx);
    let qsxtail = two_diff_tail(pq.x, ps.x, qsx);
    let rsxtail = two_diff_tail(pr.x, ps.x, rsx);
    let psytail = two_diff_tail(pp.y, ps.y, psy);
    let qsytail = two_diff_tail(pq.y, ps.y, qsy);
    let rsytail = two_diff_tail(pr.y, ps.y, rsy);
    let psztail = two_diff_tail(pp.z, ps.z, psz);
    let qsztail = two_diff_tail(pq.z, ps.z, qsz);
    let rsztail = two_diff_tail(pr.z, ps.z, rsz);

    let tails = [
        psxtail, qsxtail, rsxtail, psytail, qsytail, rsytail, psztail, qsztail, rsztail,
    ];
    if tails.iter().all(|&t| t == 0.0) {
        return det;
    }

    let errbound = bounds.orient3d.c * permanent + bounds.result * abs(det);
    det += (psz * ((qsx * rsytail + rsy * qsxtail) - (qsy * rsxtail + rsx * qsytail))
        + psztail * (qsx * rsy - qsy * rsx))
        + (qsz * ((rsx * psytail + psy * rsxtail) - (rsy * psxtail + psx * rsytail))
            + qsztail * (rsx * psy - rsy * psx))
        + (rsz * ((psx * qsytail + qsy * psxtail) - (psy * qsxtail + qsx * psytail))
            + rsztail * (psx * qsy - psy * qsx));
    if det >= errbound || -det >= errbound {
        return det;
    }

    trace!(predicate = %Predicate::Orient3D, "escalating to exact expansion");

    let pt_q = tail_cross(psxtail, psytail, qsx, qsy);
    let pt_r = tail_cross(psytail, psxtail, rsy, rsx);
    let qt_r = tail_cross(qsxtail, qsytail, rsx, rsy);
    let qt_p = tail_cross(qsytail, qsxtail, psy, psx);
    let rt_p = tail_cross(rsxtail, rsytail, psx, psy);
    let rt_q = tail_cross(rsytail, rsxtail, qsy, qsx);

    let qrt = Expansion::<8>::sum(&qt_r, &rt_q);
    let rpt = Expansion::<8>::sum(&rt_p, &pt_r);
    let pqt = Expansion::<8>::sum(&pt_q, &qt_p);

    let mut fin = Accumulator::<192>::new(&head);
    fin.add(&Expansion::<16>::scaled(&qrt, psz));
    fin.add(&Expansion::<16>::scaled(&rpt, qsz));
    fin.add(&Expansion::<16>::scaled(&pqt, rsz));

    if psztail != 0.0 {
        fin.add(&Expansion::<8>::scaled(&minor_qr, psztail));
    }
    if qsztail != 0.0 {
        fin.add(&Expansion::<8>::scaled(&minor_rp, qsztail));
    }
    if rsztail != 0.0 {
        fin.add(&Expansion::<8>::scaled(&minor_pq, rsztail));
    }

    if psxtail != 0.0 {
        if qsytail != 0.0 {
            add_tail_product(&mut fin, psxtail, qsytail, rsz, rsztail);
        }
        if rsytail != 0.0 {
            add_tail_product(&mut fin, -psxtail, rsytail, qsz, qsztail);
        }
    }
    if qsxtail != 0.0 {
        if rsytail != 0.0 {
            add_tail_product(&mut fin, qsxtail, rsytail, psz, psztail);
        }
        if psytail != 0.0 {
            add_tail_product(&mut fin, -qsxtail, psytail, rsz, rsztail);
        }
    }
    if rsxtail != 0.0 {
        if psytail != 0.0 {
            add_tail_product(&mut fin, rsxtail, psytail, qsz, qsztail);
        }
        if qsytail != 0.0 {
            add_tail_product(&mut fin, -rsxtail, qsytail, psz, psztail);
        }
    }

    if psztail != 0.0 {
        fin.add(&Expansion::<16>::scaled(&qrt, psztail));
    }
    if qsztail != 0.0 {
        fin.add(&Expansion::<16>::scaled(&rpt, qsztail));
    }
    if rsztail != 0.0 {
        fin.add(&Expansion::<16>::scaled(&pqt, rsztail));
    }

    fin.most_significant()
}
