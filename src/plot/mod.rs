//! Rendering: ASCII terminal preview and SVG chart.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

/// Rotate points clockwise by `degrees` about the origin (the leading edge).
///
/// A positive angle of attack therefore lifts the nose relative to the
/// trailing edge, which is how the section meets the flow.
pub fn rotate(points: &[(f64, f64)], degrees: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    points
        .iter()
        .map(|&(x, y)| (x * cos + y * sin, y * cos - x * sin))
        .collect()
}
