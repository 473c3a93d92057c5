#![cfg_attr(feature = "no_std", no_std)]
#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Adaptive Precision Floating-Point Arithmetic and Fast Robust Predicates for Computational Geometry
//! Implements the adaptive-precision predicates described by
//! Jonathan Richard Shewchuk ([https://www.cs.cmu.edu/~quake/robust.html](https://www.cs.cmu.edu/~quake/robust.html)).
//!
//! The crate answers orientation queries (on which side of a line in 2d, or a plane in 3d, does a
//! point lie?) and in-circle / in-sphere queries (is a point contained in the circle through three
//! others, or the sphere through four?).
//!
//! Each robust predicate first evaluates its determinant in ordinary double precision and compares
//! the result against a forward error bound. Only when that test is inconclusive does it recompute
//! the determinant with [expansions](expansion), in stages of increasing precision, stopping as
//! soon as the sign is certain. The sign returned is always the sign of the exact determinant of
//! the inputs taken as real numbers; the magnitude is an approximation.
//!
//! The `*fast` variants skip the bound check entirely. They are cheaper, and may be wrong close
//! to degeneracy.
//!
//! The public API will accept both `f32` and `f64` input points for predicate checking, with input being converted to
//! `f64` values for internal use.
//! This has no effect on precision, as the [IEEE-754 standard](https://drive.google.com/file/d/0B3O3Ys97VjtxYXBCY08wanNoZ1U/view) (section 5.3)
//! guarantees that conversion from `f32` to `f64` must be exact.
//!
//! ```
//! use adaptive_predicates::{orient2d, Point2};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(1.0, 0.0);
//! assert!(orient2d(a, b, Point2::new(0.0, 1.0)) > 0.0);
//! assert!(orient2d(a, b, Point2::new(0.0, -1.0)) < 0.0);
//! assert_eq!(orient2d(a, b, Point2::new(2.0, 0.0)), 0.0);
//! ```
//!
//! Events are emitted through [`tracing`] at `trace` level whenever a predicate leaves its fast
//! path; the crate never installs a subscriber.
//!
//! # Features
//! - `no_std`: Build without the Rust standard library

#[cfg(all(test, feature = "no_std"))]
extern crate std;

pub mod batch;
pub mod bounds;
pub mod expansion;
mod incircle;
mod insphere;
mod orient2d;
mod orient3d;
mod point;
mod predicate;

#[cfg(test)]
mod tests;

// Supplies `abs` where `core` does not provide it for floats.
#[cfg(feature = "no_std")]
#[allow(unused_imports)]
use ieee754::Ieee754;

pub use batch::{
    incircle_batch, insphere_batch, orient2d_batch, orient2d_xy, orient3d_batch, BatchError,
};
pub use bounds::{ErrorBounds, StageBounds, BINARY64, BOUNDS};
pub use incircle::{incircle, incirclefast};
pub use insphere::{insphere, inspherefast};
pub use orient2d::{orient2d, orient2dfast};
pub use orient3d::{orient3d, orient3dfast};
pub use point::{Point2, Point3};
pub use predicate::Predicate;

#[inline(always)]
pub(crate) fn abs(x: f64) -> f64 {
    x.abs()
}
