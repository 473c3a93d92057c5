// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error-bound coefficients for the static filters and adaptive stages.

/// Half of the machine epsilon: the largest relative rounding error of a
/// single binary64 operation (`2^-53`).
pub const EPSILON: f64 = f64::EPSILON / 2.0;

/// Coefficients of one predicate's three evaluation stages.
///
/// `a` bounds the error of the plain double-precision determinant, `b` of the
/// first expansion-based estimate, and `c` (together with
/// [`ErrorBounds::result`]) of the estimate corrected by the coordinate tails.
/// Each is multiplied by the predicate's *permanent*, the determinant
/// evaluated with absolute values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageBounds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// The process-wide table of error bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBounds {
    pub epsilon: f64,
    /// `2^ceil(p / 2) + 1`; [`expansion::SPLITTER`](crate::expansion::SPLITTER) is this value of [`BINARY64`].
    pub splitter: f64,
    /// Relative error of rounding an exact expansion to one double.
    pub result: f64,
    pub orient2d: StageBounds,
    pub orient3d: StageBounds,
    pub incircle: StageBounds,
    pub insphere: StageBounds,
}

/// Bounds for IEEE-754 binary64, usable in constant expressions.
pub const BINARY64: ErrorBounds = ErrorBounds::with_epsilon(EPSILON);

/// Bounds for IEEE-754 binary64, built at compile time.
pub static BOUNDS: ErrorBounds = BINARY64;

impl ErrorBounds {
    /// Derives every coefficient from the unit roundoff `eps`.
    pub const fn with_epsilon(eps: f64) -> Self {
        ErrorBounds {
            epsilon: eps,
            splitter: splitter_for(eps),
            result: (3.0 + 8.0 * eps) * eps,
            orient2d: StageBounds {
                a: (3.0 + 16.0 * eps) * eps,
                b: (2.0 + 12.0 * eps) * eps,
                c: (9.0 + 64.0 * eps) * eps * eps,
            },
            orient3d: StageBounds {
                a: (7.0 + 56.0 * eps) * eps,
                b: (3.0 + 28.0 * eps) * eps,
                c: (26.0 + 288.0 * eps) * eps * eps,
            },
            incircle: StageBounds {
                a: (10.0 + 96.0 * eps) * eps,
                b: (4.0 + 48.0 * eps) * eps,
                c: (44.0 + 576.0 * eps) * eps * eps,
            },
            insphere: StageBounds {
                a: (16.0 + 224.0 * eps) * eps,
                b: (5.0 + 72.0 * eps) * eps,
                c: (71.0 + 1408.0 * eps) * eps * eps,
            },
        }
    }

    /// Measures epsilon and the splitter on the running hardware by repeated
    /// halving, then derives the table from them.
    ///
    /// On any conforming binary64 implementation the result equals [`BOUNDS`].
    pub fn derive() -> Self {
        let mut every_other = true;
        let mut epsilon = 1.0_f64;
        let mut splitter = 1.0_f64;
        let mut check = 1.0_f64;
        loop {
            let last_check = check;
            epsilon *= 0.5;
            if every_other {
                splitter *= 2.0;
            }
            every_other = !every_other;
            check = 1.0 + epsilon;
            if check == 1.0 || check == last_check {
                break;
            }
        }
        let mut bounds = Self::with_epsilon(epsilon);
        bounds.splitter = splitter + 1.0;
        bounds
    }
}

// 2^ceil(p / 2) + 1 where eps = 2^-p.
const fn splitter_for(eps: f64) -> f64 {
    let mut splitter = 1.0;
    let mut halved = 1.0;
    let mut every_other = true;
    while halved > eps {
        halved *= 0.5;
        if every_other {
            splitter *= 2.0;
        }
        every_other = !every_other;
    }
    splitter + 1.0
}
