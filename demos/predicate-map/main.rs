//! Renders the sign of a predicate over a 256x256 grid of adjacent doubles.
//!
//! Each pixel is one query point; neighbouring pixels differ by a single ulp
//! in x or y. Black is negative, grey is zero and white is positive. The
//! `fast` maps show the scattered wrong answers of plain double-precision
//! evaluation; the `robust` maps show the exact partition.
//!
//! Usage: `cargo run --example predicate-map -- {fast | robust} {incircle | orient2d} out.png`

use adaptive_predicates::{incircle, incirclefast, orient2d, orient2dfast, Point2};
use float_extras::f64::nextafter;
use std::cmp::Ordering;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const SIZE: usize = 256;

fn sign_map<F>(predicate: F, start: Point2<f64>) -> Vec<Ordering>
where
    F: Fn(Point2<f64>) -> f64,
{
    let mut data = Vec::with_capacity(SIZE * SIZE);
    let mut y = start.y;
    for _ in 0..SIZE {
        let mut x = start.x;
        for _ in 0..SIZE {
            data.push(predicate(Point2::new(x, y)).partial_cmp(&0.0).unwrap_or(Ordering::Equal));
            x = nextafter(x, f64::INFINITY);
        }
        y = nextafter(y, f64::INFINITY);
    }
    data
}

fn write_png(data: &[Ordering], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, SIZE as u32, SIZE as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let pixels: Vec<u8> = data
        .iter()
        .map(|sign| match sign {
            Ordering::Less => 0,
            Ordering::Equal => 127,
            Ordering::Greater => 255,
        })
        .collect();
    encoder.write_header()?.write_image_data(&pixels)?;
    Ok(())
}

fn usage(name: &str) -> ! {
    eprintln!(
        "Usage: {} {{fast | robust}} {{incircle | orient2d}} <output.png>",
        name
    );
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        usage(&args[0]);
    }

    // All three anchors lie on the diagonal y = x, which crosses the query window.
    let p1 = Point2::new(12.0, 12.0);
    let p2 = Point2::new(24.0, 24.0);
    let p3 = Point2::new(-12.0, -12.0);
    let predicate: Box<dyn Fn(Point2<f64>) -> f64> = match (args[1].as_str(), args[2].as_str()) {
        ("fast", "incircle") => Box::new(move |p| incirclefast(p1, p3, p2, p)),
        ("fast", "orient2d") => Box::new(move |p| orient2dfast(p1, p, p2)),
        ("robust", "incircle") => Box::new(move |p| incircle(p1, p3, p2, p)),
        ("robust", "orient2d") => Box::new(move |p| orient2d(p1, p, p2)),
        _ => usage(&args[0]),
    };

    let data = sign_map(predicate, Point2::new(0.5, 0.5));
    write_png(&data, Path::new(&args[3]))
}
