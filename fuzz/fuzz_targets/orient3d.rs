#![no_main]

use adaptive_predicates::{orient3d, Point3};
use libfuzzer_sys::fuzz_target;

/// Keeps every intermediate product clear of overflow and underflow.
fn in_range(v: f64) -> bool {
    v == 0.0 || (1e-20..1e20).contains(&v.abs())
}

fuzz_target!(|data: [(f64, f64, f64); 4]| {
    if !data.iter().all(|&(x, y, z)| in_range(x) && in_range(y) && in_range(z)) {
        return;
    }
    let [pa, pb, pc, pd] = data.map(Point3::from);

    let result = orient3d(pa, pb, pc, pd);
    assert!(result.is_finite());

    let swapped = orient3d(pb, pa, pc, pd);
    assert_eq!(result > 0.0, swapped < 0.0);
    assert_eq!(result == 0.0, swapped == 0.0);
});
