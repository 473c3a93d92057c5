// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sphere test for five points in space.
//!
//! Like [`orient3d`](crate::orient3d), the evaluators here work on the first
//! two points exchanged, so a positive result means "inside" exactly when
//! `orient3d(pa, pb, pc, pd)` is positive.

use tracing::trace;

use crate::bounds::{ErrorBounds, BOUNDS};
use crate::expansion::{product_difference, two_diff_tail, Expansion};
use crate::{abs, Point3, Predicate};

/// Returns a positive value if the point `pe` lies **inside** the sphere passing through `pa`, `pb`, `pc`, and `pd`.
/// Returns a negative value if it lies **outside**.
/// Returns `0` if the five points are **cospherical**.
///
/// **Note**: The points `pa`, `pb`, `pc`, and `pd` must be ordered so that
/// [`orient3d`](crate::orient3d) of them is positive, or the sign of the result will be reversed.
/// Results for NaN or infinite coordinates are undefined.
pub fn insphere<T: Into<f64>>(
    pa: Point3<T>,
    pb: Point3<T>,
    pc: Point3<T>,
    pd: Point3<T>,
    pe: Point3<T>,
) -> f64 {
    let (pa, pb, pc, pd, pe) = (pa.to_f64(), pb.to_f64(), pc.to_f64(), pd.to_f64(), pe.to_f64());
    evaluate(&BOUNDS, pb, pa, pc, pd, pe)
}

/// Non-robust counterpart of [`insphere`]: a single double-precision evaluation.
///
/// May return a wrong sign (including a spurious zero) when the points are nearly cospherical.
/// Results for NaN or infinite coordinates are undefined.
pub fn inspherefast<T: Into<f64>>(
    pa: Point3<T>,
    pb: Point3<T>,
    pc: Point3<T>,
    pd: Point3<T>,
    pe: Point3<T>,
) -> f64 {
    let (pa, pb, pc, pd, pe) = (pb.to_f64(), pa.to_f64(), pc.to_f64(), pd.to_f64(), pe.to_f64());

    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let ab = aex * bey - bex * aey;
    let bc = bex * cey - cex * bey;
    let cd = cex * dey - dex * cey;
    let da = dex * aey - aex * dey;
    let ac = aex * cey - cex * aey;
    let bd = bex * dey - dex * bey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    (dlift * abc - clift * dab) + (blift * cda - alift * bcd)
}

fn evaluate(
    bounds: &ErrorBounds,
    pa: Point3<f64>,
    pb: Point3<f64>,
    pc: Point3<f64>,
    pd: Point3<f64>,
    pe: Point3<f64>,
) -> f64 {
    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let aexbey = aex * bey;
    let bexaey = bex * aey;
    let ab = aexbey - bexaey;
    let bexcey = bex * cey;
    let cexbey = cex * bey;
    let bc = bexcey - cexbey;
    let cexdey = cex * dey;
    let dexcey = dex * cey;
    let cd = cexdey - dexcey;
    let dexaey = dex * aey;
    let aexdey = aex * dey;
    let da = dexaey - aexdey;
    let aexcey = aex * cey;
    let cexaey = cex * aey;
    let ac = aexcey - cexaey;
    let bexdey = bex * dey;
    let dexbey = dex * bey;
    let bd = bexdey - dexbey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    let det = (dlift * abc - clift * dab) + (blift * cda - alift * bcd);

    let (aezplus, bezplus, cezplus, dezplus) = (abs(aez), abs(bez), abs(cez), abs(dez));
    let abplus = abs(aexbey) + abs(bexaey);
    let bcplus = abs(bexcey) + abs(cexbey);
    let cdplus = abs(cexdey) + abs(dexcey);
    let daplus = abs(dexaey) + abs(aexdey);
    let acplus = abs(aexcey) + abs(cexaey);
    let bdplus = abs(bexdey) + abs(dexbey);
    let permanent = (cdplus * bezplus + bdplus * cezplus + bcplus * dezplus) * alift
        + (daplus * cezplus + acplus * dezplus + cdplus * aezplus) * blift
        + (abplus * dezplus + bdplus * aezplus + daplus * bezplus) * clift
        + (bcplus * aezplus + acplus * bezplus + abplus * cezplus) * dlift;

    let errbound = bounds.insphere.a * permanent;
    if det > errbound || -det > errbound {
        return det;
    }
    adapt(bounds, pa, pb, pc, pd, pe, permanent)
}

/// Exact `m0 * z0 + m1 * z1 + m2 * z2` for three 2x2 minors.
fn weighted_minors(
    (m0, z0): (&[f64; 4], f64),
    (m1, z1): (&[f64; 4], f64),
    (m2, z2): (&[f64; 4], f64),
) -> Expansion<24> {
    let first = Expansion::<8>::scaled(m0, z0);
    let second = Expansion::<8>::scaled(m1, z1);
    let third = Expansion::<8>::scaled(m2, z2);
    let pair = Expansion::<16>::sum(&first, &second);
    Expansion::sum(&third, &pair)
}

/// Exact `sign * (x^2 + y^2 + z^2) * minor` for a 3x3 minor relative to the apex.
fn lifted(minor: &[f64], (x, y, z): (f64, f64, f64), sign: f64) -> Expansion<288> {
    let xdet = Expansion::<96>::scaled(&Expansion::<48>::scaled(minor, x), sign * x);
    let ydet = Expansion::<96>::scaled(&Expansion::<48>::scaled(minor, y), sign * y);
    let zdet = Expansion::<96>::scaled(&Expansion::<48>::scaled(minor, z), sign * z);
    let xydet = Expansion::<192>::sum(&xdet, &ydet);
    Expansion::sum(&xydet, &zdet)
}

fn adapt(
    bounds: &ErrorBounds,
    pa: Point3<f64>,
    pb: Point3<f64>,
    pc: Point3<f64>,
    pd: Point3<f64>,
    pe: Point3<f64>,
    permanent: f64,
) -> f64 {
    trace!(predicate = %Predicate::InSphere, "static filter inconclusive");

    let aex = pa.x - pe.x;
    let bex = pb.x - pe.x;
    let cex = pc.x - pe.x;
    let dex = pd.x - pe.x;
    let aey = pa.y - pe.y;
    let bey = pb.y - pe.y;
    let cey = pc.y - pe.y;
    let dey = pd.y - pe.y;
    let aez = pa.z - pe.z;
    let bez = pb.z - pe.z;
    let cez = pc.z - pe.z;
    let dez = pd.z - pe.z;

    let ab = product_difference(aex, bey, bex, aey);
    let bc = product_difference(bex, cey, cex, bey);
    let cd = product_difference(cex, dey, dex, cey);
    let da = product_difference(dex, aey, aex, dey);
    let ac = product_difference(aex, cey, cex, aey);
    let bd = product_difference(bex, dey, dex, bey);

    let bcd = weighted_minors((&cd, bez), (&bd, -cez), (&bc, dez));
    let cda = weighted_minors((&da, cez), (&ac, dez), (&cd, aez));
    let dab = weighted_minors((&ab, dez), (&bd, aez), (&da, bez));
    let abc = weighted_minors((&bc, aez), (&ac, -bez), (&ab, cez));

    let adet = lifted(&bcd, (aex, aey, aez), -1.0);
    let bdet = lifted(&cda, (bex, bey, bez), 1.0);
    let cdet = lifted(&dab, (cex, cey, cez), -1.0);
    let ddet = lifted(&abc, (dex, dey, dez), 1.0);
    let abdet = Expansion::<576>::sum(&adet, &bdet);
    let cddet = Expansion::<576>::sum(&cdet, &ddet);
    let head = Expansion::<1152>::sum(&abdet, &cddet);

    let mut det = head.estimate();
    let errbound = bounds.insphere.b * permanent;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let aextail = two_diff_tail(pa.x, pe.x, aex);
    let aeytail = two_diff_tail(pa.y, pe.y, aey);
    let aeztail = two_diff_tail(pa.z, pe.z, aez);
    let bextail = two_diff_tail(pb.x, pe.x, bex);
    let beytail = two_diff_tail(pb.y, pe.y, bey);
    let beztail = two_diff_tail(pb.z, pe.z, bez);
    let cextail = two_diff_tail(pc.x, pe.x, cex);
    let ceytail = two_diff_tail(pc.y, pe.y, cey);
    let ceztail = two_diff_tail(pc.z, pe.z, cez);
    let dextail = two_diff_tail(pd.x, pe.x, dex);
    let deytail = two_diff_tail(pd.y, pe.y, dey);
    let deztail = two_diff_tail(pd.z, pe.z, dez);
    let tails = [
        aextail, aeytail, aeztail, bextail, beytail, beztail, cextail, ceytail, ceztail, dextail,
        deytail, deztail,
    ];
    if tails.iter().all(|&t| t == 0.0) {
        return det;
    }

    let errbound = bounds.insphere.c * permanent + bounds.result * abs(det);

    // Leading components of the exact minors.
    let (ab3, bc3, cd3, da3, ac3, bd3) = (ab[3], bc[3], cd[3], da[3], ac[3], bd[3]);
    let abeps = (aex * beytail + bey * aextail) - (aey * bextail + bex * aeytail);
    let bceps = (bex * ceytail + cey * bextail) - (bey * cextail + cex * beytail);
    let cdeps = (cex * deytail + dey * cextail) - (cey * dextail + dex * ceytail);
    let daeps = (dex * aeytail + aey * dextail) - (dey * aextail + aex * deytail);
    let aceps = (aex * ceytail + cey * aextail) - (aey * cextail + cex * aeytail);
    let bdeps = (bex * deytail + dey * bextail) - (bey * dextail + dex * beytail);
    det += (((bex * bex + bey * bey + bez * bez)
        * ((cez * daeps + dez * aceps + aez * cdeps)
            + (ceztail * da3 + deztail * ac3 + aeztail * cd3))
        + (dex * dex + dey * dey + dez * dez)
            * ((aez * bceps - bez * aceps + cez * abeps)
                + (aeztail * bc3 - beztail * ac3 + ceztail * ab3)))
        - ((aex * aex + aey * aey + aez * aez)
            * ((bez * cdeps - cez * bdeps + dez * bceps)
                + (beztail * cd3 - ceztail * bd3 + deztail * bc3))
            + (cex * cex + cey * cey + cez * cez)
                * ((dez * abeps + aez * bdeps + bez * daeps)
                    + (deztail * ab3 + aeztail * bd3 + beztail * da3))))
        + 2.0
            * (((bex * bextail + bey * beytail + bez * beztail)
                * (cez * da3 + dez * ac3 + aez * cd3)
                + (dex * dextail + dey * deytail + dez * deztail)
                    * (aez * bc3 - bez * ac3 + cez * ab3))
                - ((aex * aextail + aey * aeytail + aez * aeztail)
                    * (bez * cd3 - cez * bd3 + dez * bc3)
                    + (cex * cextail + cey * ceytail + cez * ceztail)
                        * (dez * ab3 + aez * bd3 + bez * da3)));
    if det >= errbound || -det >= errbound {
        return det;
    }

    exact(pa, pb, pc, pd, pe)
}

/// `plus1 + plus2 - (minus1 + minus2)` over 3x3 minors.
fn four_point_minor(
    (plus1, plus2): (&[f64], &[f64]),
    (minus1, minus2): (&[f64], &[f64]),
) -> Expansion<96> {
    let plus = Expansion::<48>::sum(plus1, plus2);
    let mut minus = Expansion::<48>::sum(minus1, minus2);
    minus.negate();
    Expansion::sum(&plus, &minus)
}

/// Exact `(x^2 + y^2 + z^2) * minor` on raw coordinates.
fn lifted_exact(minor: &[f64], p: Point3<f64>) -> Expansion<1152> {
    let xdet = Expansion::<384>::scaled(&Expansion::<192>::scaled(minor, p.x), p.x);
    let ydet = Expansion::<384>::scaled(&Expansion::<192>::scaled(minor, p.y), p.y);
    let zdet = Expansion::<384>::scaled(&Expansion::<192>::scaled(minor, p.z), p.z);
    let xydet = Expansion::<768>::sum(&xdet, &ydet);
    Expansion::sum(&xydet, &zdet)
}

/// Full 5x5 determinant on the raw coordinates.
///
/// The translated differences can lose bits to rounding, so this path
/// never subtracts coordinates at all.
fn exact(
    pa: Point3<f64>,
    pb: Point3<f64>,
    pc: Point3<f64>,
    pd: Point3<f64>,
    pe: Point3<f64>,
) -> f64 {
    trace!(predicate = %Predicate::InSphere, "escalating to exact expansion");

    let ab = product_difference(pa.x, pb.y, pb.x, pa.y);
    let bc = product_difference(pb.x, pc.y, pc.x, pb.y);
    let cd = product_difference(pc.x, pd.y, pd.x, pc.y);
    let de = product_difference(pd.x, pe.y, pe.x, pd.y);
    let ea = product_difference(pe.x, pa.y, pa.x, pe.y);
    let ac = product_difference(pa.x, pc.y, pc.x, pa.y);
    let bd = product_difference(pb.x, pd.y, pd.x, pb.y);
    let ce = product_difference(pc.x, pe.y, pe.x, pc.y);
    let da = product_difference(pd.x, pa.y, pa.x, pd.y);
    let eb = product_difference(pe.x, pb.y, pb.x, pe.y);

    let abc = weighted_minors((&bc, pa.z), (&ac, -pb.z), (&ab, pc.z));
    let bcd = weighted_minors((&cd, pb.z), (&bd, -pc.z), (&bc, pd.z));
    let cde = weighted_minors((&de, pc.z), (&ce, -pd.z), (&cd, pe.z));
    let dea = weighted_minors((&ea, pd.z), (&da, -pe.z), (&de, pa.z));
    let eab = weighted_minors((&ab, pe.z), (&eb, -pa.z), (&ea, pb.z));
    let abd = weighted_minors((&bd, pa.z), (&da, pb.z), (&ab, pd.z));
    let bce = weighted_minors((&ce, pb.z), (&eb, pc.z), (&bc, pe.z));
    let cda = weighted_minors((&da, pc.z), (&ac, pd.z), (&cd, pa.z));
    let deb = weighted_minors((&eb, pd.z), (&bd, pe.z), (&de, pb.z));
    let eac = weighted_minors((&ac, pe.z), (&ce, pa.z), (&ea, pc.z));

    let bcde = four_point_minor((&cde, &bce), (&deb, &bcd));
    let cdea = four_point_minor((&dea, &cda), (&eac, &cde));
    let deab = four_point_minor((&eab, &deb), (&abd, &dea));
    let eabc = four_point_minor((&abc, &eac), (&bce, &eab));
    let abcd = four_point_minor((&bcd, &abd), (&cda, &abc));

    let adet = lifted_exact(&bcde, pa);
    let bdet = lifted_exact(&cdea, pb);
    let cdet = lifted_exact(&deab, pc);
    let ddet = lifted_exact(&eabc, pd);
    let edet = lifted_exact(&abcd, pe);

    let abdet = Expansion::<2304>::sum(&adet, &bdet);
    let cddet = Expansion::<2304>::sum(&cdet, &ddet);
    let cdedet = Expansion::<3456>::sum(&cddet, &edet);
    Expansion::<5760>::sum(&abdet, &cdedet).most_significant()
}
