//! Fast versus robust evaluation of every predicate.
//!
//! Random inputs almost always pass the static filter, so the `robust_random`
//! numbers measure the filter's overhead over the `*fast` variants. The
//! `robust_degenerate` inputs lie on a common line, plane, circle or sphere
//! (up to the rounding of their construction) and drive the adaptive
//! evaluators past the filter.

use adaptive_predicates::{
    incircle, incirclefast, insphere, inspherefast, orient2d, orient2dfast, orient3d,
    orient3dfast, Point2, Point3,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1;
const SAMPLES: usize = 256;

fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2000.0) - 1000.0
}

fn random_2d(state: &mut u64) -> Point2<f64> {
    Point2::new(lcg(state), lcg(state))
}

fn random_3d(state: &mut u64) -> Point3<f64> {
    Point3::new(lcg(state), lcg(state), lcg(state))
}

/// Runs `f` over `samples`, cycling through them.
fn cycle<T: Copy>(samples: &[T], mut f: impl FnMut(T) -> f64) -> impl FnMut() -> f64 + '_ {
    let mut idx = 0usize;
    move || {
        let sample = samples[idx % samples.len()];
        idx = idx.wrapping_add(1);
        f(black_box(sample))
    }
}

fn bench_orient2d(c: &mut Criterion) {
    let mut state = 0x1234_5678_9abc_def0u64;
    let random: Vec<_> = (0..SAMPLES)
        .map(|_| (random_2d(&mut state), random_2d(&mut state), random_2d(&mut state)))
        .collect();
    // The third point sits halfway between the first two.
    let degenerate: Vec<_> = (0..SAMPLES)
        .map(|_| {
            let a = random_2d(&mut state);
            let b = Point2::new(a.x + 0.5, a.y + 0.25);
            let m = Point2::new(a.x + 0.25, a.y + 0.125);
            (a, b, m)
        })
        .collect();

    let mut group = c.benchmark_group("orient2d");
    group.bench_function("fast_random", |b| {
        b.iter(cycle(&random, |(p, q, r)| orient2dfast(p, q, r)))
    });
    group.bench_function("robust_random", |b| {
        b.iter(cycle(&random, |(p, q, r)| orient2d(p, q, r)))
    });
    group.bench_function("robust_degenerate", |b| {
        b.iter(cycle(&degenerate, |(p, q, r)| orient2d(p, q, r)))
    });
    group.finish();
}

fn bench_orient3d(c: &mut Criterion) {
    let mut state = 0x0fed_cba9_8765_4321u64;
    let random: Vec<_> = (0..SAMPLES)
        .map(|_| {
            (
                random_3d(&mut state),
                random_3d(&mut state),
                random_3d(&mut state),
                random_3d(&mut state),
            )
        })
        .collect();
    let degenerate: Vec<_> = (0..SAMPLES)
        .map(|_| {
            let a = random_3d(&mut state);
            let b = Point3::new(a.x + 1.0, a.y, a.z + 0.5);
            let c = Point3::new(a.x, a.y + 1.0, a.z + 0.25);
            let d = Point3::new(a.x + 1.0, a.y + 1.0, a.z + 0.75);
            (a, b, c, d)
        })
        .collect();

    let mut group = c.benchmark_group("orient3d");
    group.bench_function("fast_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s)| orient3dfast(p, q, r, s)))
    });
    group.bench_function("robust_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s)| orient3d(p, q, r, s)))
    });
    group.bench_function("robust_degenerate", |b| {
        b.iter(cycle(&degenerate, |(p, q, r, s)| orient3d(p, q, r, s)))
    });
    group.finish();
}

fn bench_incircle(c: &mut Criterion) {
    let mut state = 0x2468_ace0_1357_9bdfu64;
    let random: Vec<_> = (0..SAMPLES)
        .map(|_| {
            (
                random_2d(&mut state),
                random_2d(&mut state),
                random_2d(&mut state),
                random_2d(&mut state),
            )
        })
        .collect();
    // Corners of an axis-aligned rectangle are cocircular.
    let degenerate: Vec<_> = (0..SAMPLES)
        .map(|_| {
            let a = random_2d(&mut state);
            let (w, h) = (0.75, 0.5);
            (
                a,
                Point2::new(a.x + w, a.y),
                Point2::new(a.x + w, a.y + h),
                Point2::new(a.x, a.y + h),
            )
        })
        .collect();

    let mut group = c.benchmark_group("incircle");
    group.bench_function("fast_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s)| incirclefast(p, q, r, s)))
    });
    group.bench_function("robust_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s)| incircle(p, q, r, s)))
    });
    group.bench_function("robust_degenerate", |b| {
        b.iter(cycle(&degenerate, |(p, q, r, s)| incircle(p, q, r, s)))
    });
    group.finish();
}

fn bench_insphere(c: &mut Criterion) {
    let mut state = 0x1357_9bdf_2468_ace0u64;
    let random: Vec<_> = (0..SAMPLES)
        .map(|_| {
            (
                random_3d(&mut state),
                random_3d(&mut state),
                random_3d(&mut state),
                random_3d(&mut state),
                random_3d(&mut state),
            )
        })
        .collect();
    // Five corners of an axis-aligned box are cospherical.
    let degenerate: Vec<_> = (0..SAMPLES)
        .map(|_| {
            let a = random_3d(&mut state);
            let (w, h, d) = (0.75, 0.5, 0.25);
            (
                a,
                Point3::new(a.x + w, a.y, a.z),
                Point3::new(a.x, a.y + h, a.z),
                Point3::new(a.x, a.y, a.z + d),
                Point3::new(a.x + w, a.y + h, a.z + d),
            )
        })
        .collect();

    let mut group = c.benchmark_group("insphere");
    group.bench_function("fast_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s, t)| inspherefast(p, q, r, s, t)))
    });
    group.bench_function("robust_random", |b| {
        b.iter(cycle(&random, |(p, q, r, s, t)| insphere(p, q, r, s, t)))
    });
    group.bench_function("robust_degenerate", |b| {
        b.iter(cycle(&degenerate, |(p, q, r, s, t)| insphere(p, q, r, s, t)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_orient2d,
    bench_orient3d,
    bench_incircle,
    bench_insphere
);
criterion_main!(benches);
