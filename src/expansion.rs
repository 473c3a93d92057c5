// Copyright 2017 The Spade Developers.
// Copyright 2020 The GeoRust Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Exact floating-point expansion arithmetic.
//!
//! An *expansion* is a sequence of `f64` components, ordered by increasing
//! magnitude and pairwise nonoverlapping, whose exact (unrounded) sum is the
//! represented value. Because the components do not overlap, the sign of the
//! represented value is the sign of the last (most significant) component.
//!
//! Every function here relies on each `f64` operation being rounded to
//! binary64 exactly once. Rust never contracts `a * b + c` into a fused
//! multiply-add and never reassociates floating-point expressions, so the
//! error-free transformations below hold on every target with SSE2-class
//! floating point. Targets that only have x87 extended-precision registers
//! are not supported.
//!
//! Functions taking an output buffer `h` perform *zero elimination*: zero
//! components are dropped, but at least one component (possibly `0.0`) is
//! always written. They return the number of components written.

use core::mem;
use core::ops::Deref;

/// `2^27 + 1`. Multiplying by it splits a double into two halves of at most
/// 26 significant bits each, whose pairwise products are exact.
pub const SPLITTER: f64 = crate::bounds::BINARY64.splitter;

/// Computes `a + b` as a nonoverlapping pair `(sum, err)`. Requires `|a| >= |b|`.
#[inline]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    (x, b - bvirt)
}

/// Computes `a + b` as a nonoverlapping pair `(sum, err)`, for any ordering of magnitudes.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    let avirt = x - bvirt;
    let bround = b - bvirt;
    let around = a - avirt;
    (x, around + bround)
}

/// Roundoff error of `x = fl(a - b)`.
#[inline]
pub fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = a - x;
    let avirt = x + bvirt;
    let bround = bvirt - b;
    let around = a - avirt;
    around + bround
}

/// Computes `a - b` as a nonoverlapping pair `(difference, err)`.
#[inline]
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

/// Splits `a` into `(hi, lo)` with `hi + lo == a`, each half carrying at most 26 bits.
#[inline]
pub fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let abig = c - a;
    let hi = c - abig;
    (hi, a - hi)
}

/// Computes `a * b` as a nonoverlapping pair, reusing an already split `b`.
#[inline]
pub fn two_product_presplit(a: f64, b: f64, bhi: f64, blo: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    let err1 = x - ahi * bhi;
    let err2 = err1 - alo * bhi;
    let err3 = err2 - ahi * blo;
    (x, alo * blo - err3)
}

/// Computes `a * b` as a nonoverlapping pair `(product, err)`.
#[inline]
pub fn two_product(a: f64, b: f64) -> (f64, f64) {
    let (bhi, blo) = split(b);
    two_product_presplit(a, b, bhi, blo)
}

/// Computes `a * a` as a nonoverlapping pair. Cheaper than `two_product(a, a)`.
#[inline]
pub fn square(a: f64) -> (f64, f64) {
    let x = a * a;
    let (hi, lo) = split(a);
    let err1 = x - hi * hi;
    let err3 = err1 - (hi + hi) * lo;
    (x, lo * lo - err3)
}

/// Adds `b` to the two-component expansion `(a1, a0)`. Returns components from most to least significant.
#[inline]
pub fn two_one_sum(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// Subtracts `b` from the two-component expansion `(a1, a0)`. Returns components from most to least significant.
#[inline]
pub fn two_one_diff(a1: f64, a0: f64, b: f64) -> (f64, f64, f64) {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// Exact sum of two two-component expansions, least significant component first.
#[inline]
pub fn two_two_sum((a1, a0): (f64, f64), (b1, b0): (f64, f64)) -> [f64; 4] {
    let (j, r0, x0) = two_one_sum(a1, a0, b0);
    let (x3, x2, x1) = two_one_sum(j, r0, b1);
    [x0, x1, x2, x3]
}

/// Exact difference of two two-component expansions, least significant component first.
#[inline]
pub fn two_two_diff((a1, a0): (f64, f64), (b1, b0): (f64, f64)) -> [f64; 4] {
    let (j, r0, x0) = two_one_diff(a1, a0, b0);
    let (x3, x2, x1) = two_one_diff(j, r0, b1);
    [x0, x1, x2, x3]
}

/// Exact product of the two-component expansion `(a1, a0)` and `b`, least significant first.
#[inline]
pub fn two_one_product((a1, a0): (f64, f64), b: f64) -> [f64; 4] {
    let (bhi, blo) = split(b);
    let (i, x0) = two_product_presplit(a0, b, bhi, blo);
    let (j, r0) = two_product_presplit(a1, b, bhi, blo);
    let (k, x1) = two_sum(i, r0);
    let (x3, x2) = fast_two_sum(j, k);
    [x0, x1, x2, x3]
}

/// Exact `a * b - c * d`, least significant component first.
#[inline]
pub fn product_difference(a: f64, b: f64, c: f64, d: f64) -> [f64; 4] {
    two_two_diff(two_product(a, b), two_product(c, d))
}

/// Exact `x * x + y * y`, least significant component first.
#[inline]
pub fn sum_of_squares(x: f64, y: f64) -> [f64; 4] {
    two_two_sum(square(x), square(y))
}

/// Approximates the value of an expansion by summing its components in order.
pub fn estimate(e: &[f64]) -> f64 {
    match e.split_first() {
        Some((&first, rest)) => rest.iter().fold(first, |acc, &c| acc + c),
        None => 0.0,
    }
}

/// Yields the components of two expansions merged by increasing magnitude.
struct MagnitudeMerge<'a> {
    e: &'a [f64],
    f: &'a [f64],
}

impl MagnitudeMerge<'_> {
    fn both_remaining(&self) -> bool {
        !self.e.is_empty() && !self.f.is_empty()
    }
}

impl Iterator for MagnitudeMerge<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let from_e = match (self.e.first(), self.f.first()) {
            (Some(&enow), Some(&fnow)) => (fnow > enow) == (fnow > -enow),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        let source = if from_e { &mut self.e } else { &mut self.f };
        let (&head, tail) = source.split_first()?;
        *source = tail;
        Some(head)
    }
}

/// Writes the exact sum of the expansions `e` and `f` into `h`.
///
/// `h` must hold at least `e.len() + f.len()` components.
pub fn fast_expansion_sum(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
    let mut merged = MagnitudeMerge { e, f };
    let mut q = merged.next().unwrap_or(0.0);
    let mut hindex = 0;

    if merged.both_remaining() {
        if let Some(next) = merged.next() {
            let (sum, err) = fast_two_sum(next, q);
            q = sum;
            if err != 0.0 {
                h[hindex] = err;
                hindex += 1;
            }
        }
    }
    for next in merged {
        let (sum, err) = two_sum(q, next);
        q = sum;
        if err != 0.0 {
            h[hindex] = err;
            hindex += 1;
        }
    }

    if q != 0.0 || hindex == 0 {
        h[hindex] = q;
        hindex += 1;
    }
    hindex
}

/// Writes the exact product of the expansion `e` and the scalar `b` into `h`.
///
/// `h` must hold at least `2 * e.len()` components.
pub fn scale_expansion(e: &[f64], b: f64, h: &mut [f64]) -> usize {
    let (bhi, blo) = split(b);
    let mut hindex = 0;
    let mut push = |h: &mut [f64], component: f64| {
        if component != 0.0 {
            h[hindex] = component;
            hindex += 1;
        }
    };

    let Some((&first, rest)) = e.split_first() else {
        h[0] = 0.0;
        return 1;
    };
    let (mut q, low) = two_product_presplit(first, b, bhi, blo);
    push(h, low);
    for &component in rest {
        let (product1, product0) = two_product_presplit(component, b, bhi, blo);
        let (sum, err) = two_sum(q, product0);
        push(h, err);
        let (next_q, err) = fast_two_sum(product1, sum);
        q = next_q;
        push(h, err);
    }

    if q != 0.0 || hindex == 0 {
        h[hindex] = q;
        hindex += 1;
    }
    hindex
}

/// A stack-allocated expansion with room for `N` components.
///
/// `N` is the worst-case component count of the arithmetic that produces it,
/// so no evaluation ever allocates.
#[derive(Clone, Copy, Debug)]
pub struct Expansion<const N: usize> {
    components: [f64; N],
    len: usize,
}

impl<const N: usize> Expansion<N> {
    /// The expansion holding the single component `0.0`.
    pub const fn zero() -> Self {
        Expansion {
            components: [0.0; N],
            len: 1,
        }
    }

    /// Copies `components` (least significant first) into a new expansion.
    ///
    /// # Panics
    /// If `components` is longer than `N`.
    pub fn from_components(components: &[f64]) -> Self {
        let mut out = Self::zero();
        out.components[..components.len()].copy_from_slice(components);
        out.len = components.len().max(1);
        out
    }

    /// Exact sum of `e` and `f`.
    pub fn sum(e: &[f64], f: &[f64]) -> Self {
        let mut out = Self::zero();
        out.len = fast_expansion_sum(e, f, &mut out.components);
        out
    }

    /// Exact product of `e` and `b`.
    pub fn scaled(e: &[f64], b: f64) -> Self {
        let mut out = Self::zero();
        out.len = scale_expansion(e, b, &mut out.components);
        out
    }

    pub fn components(&self) -> &[f64] {
        &self.components[..self.len]
    }

    pub fn estimate(&self) -> f64 {
        estimate(self.components())
    }

    /// The largest-magnitude component; its sign is the sign of the whole expansion.
    pub fn most_significant(&self) -> f64 {
        self.components[self.len - 1]
    }

    pub fn negate(&mut self) {
        for c in &mut self.components[..self.len] {
            *c = -*c;
        }
    }
}

impl<const N: usize> Deref for Expansion<N> {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        self.components()
    }
}

/// Running sum that folds terms in with two alternating buffers.
pub(crate) struct Accumulator<const N: usize> {
    now: Expansion<N>,
    other: Expansion<N>,
}

impl<const N: usize> Accumulator<N> {
    pub(crate) fn new(initial: &[f64]) -> Self {
        Accumulator {
            now: Expansion::from_components(initial),
            other: Expansion::zero(),
        }
    }

    pub(crate) fn add(&mut self, term: &[f64]) {
        self.other.len = fast_expansion_sum(self.now.components(), term, &mut self.other.components);
        mem::swap(&mut self.now, &mut self.other);
    }

    pub(crate) fn most_significant(&self) -> f64 {
        self.now.most_significant()
    }
}
