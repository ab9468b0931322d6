//! SVG chart of the two surfaces.
//!
//! The section is rotated clockwise by the display angle about the leading
//! edge, scaled by the chord scale, and drawn with equal x/y units so the
//! thickness is not exaggerated.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{AirfoilOutline, Surface};
use crate::error::{AppError, EXIT_INPUT};
use crate::plot::rotate;

/// Rendered image size in pixels.
pub const SVG_SIZE: (u32, u32) = (1600, 400);

/// Write an SVG chart of `outline` to `path`.
pub fn render_svg(path: &Path, outline: &AirfoilOutline, aoa: f64, chord_scale: f64) -> Result<(), AppError> {
    let scaled = |surface: Surface| -> Vec<(f64, f64)> {
        rotate(&outline.points(surface), aoa)
            .into_iter()
            .map(|(x, y)| (x * chord_scale, y * chord_scale))
            .collect()
    };
    let upper = scaled(Surface::Upper);
    let lower = scaled(Surface::Lower);

    let all: Vec<(f64, f64)> = upper.iter().chain(&lower).copied().collect();
    let (x_bounds, y_bounds) = equal_aspect_bounds(&all, SVG_SIZE.0, SVG_SIZE.1);

    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("PARSEC airfoil (rotated {aoa:.1} deg)"), ("sans-serif", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 30)
        .build_cartesian_2d(x_bounds[0]..x_bounds[1], y_bounds[0]..y_bounds[1])
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .x_labels(10)
        .y_labels(5)
        .draw()
        .map_err(render_err)?;

    let upper_color = RGBColor(0, 90, 200);
    let lower_color = RGBColor(200, 40, 40);

    chart
        .draw_series(LineSeries::new(upper, &upper_color))
        .map_err(render_err)?
        .label("upper")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &upper_color));
    chart
        .draw_series(LineSeries::new(lower, &lower_color))
        .map_err(render_err)?
        .label("lower")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &lower_color));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Axis bounds that contain every point and give x and y the same scale
/// on a `width × height` canvas.
pub fn equal_aspect_bounds(points: &[(f64, f64)], width: u32, height: u32) -> ([f64; 2], [f64; 2]) {
    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;
    for &(x, y) in points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }
    if !(x0.is_finite() && x1 > x0) {
        x0 = 0.0;
        x1 = 1.0;
    }
    if !(y0.is_finite() && y1 >= y0) {
        y0 = 0.0;
        y1 = 0.0;
    }

    let aspect = height.max(1) as f64 / width.max(1) as f64;
    let pad = 0.05 * (x1 - x0);
    let (x0, x1) = (x0 - pad, x1 + pad);

    let mut x_span = x1 - x0;
    let mut y_span = x_span * aspect;
    if y_span < (y1 - y0) * 1.1 {
        y_span = (y1 - y0) * 1.1;
        x_span = y_span / aspect;
    }
    let xc = 0.5 * (x0 + x1);
    let yc = 0.5 * (y0 + y1);
    (
        [xc - 0.5 * x_span, xc + 0.5 * x_span],
        [yc - 0.5 * y_span, yc + 0.5 * y_span],
    )
}

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::new(EXIT_INPUT, format!("Failed to render SVG: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParsecParams;
    use crate::parsec::generate_airfoil;

    #[test]
    fn bounds_keep_equal_scale() {
        let pts = [(0.0, -0.05), (1.0, 0.08)];
        let (xb, yb) = equal_aspect_bounds(&pts, 1600, 400);
        let x_span = xb[1] - xb[0];
        let y_span = yb[1] - yb[0];
        assert!((y_span / x_span - 0.25).abs() < 1e-12);
        assert!(xb[0] < 0.0 && xb[1] > 1.0);
        assert!(yb[0] < -0.05 && yb[1] > 0.08);
    }

    #[test]
    fn tall_sections_widen_the_x_range() {
        let pts = [(0.0, -1.0), (1.0, 1.0)];
        let (xb, yb) = equal_aspect_bounds(&pts, 1600, 400);
        assert!(yb[0] <= -1.0 && yb[1] >= 1.0);
        assert!(((yb[1] - yb[0]) / (xb[1] - xb[0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn renders_svg_file() {
        let solution = generate_airfoil(&ParsecParams::default(), 101).unwrap();
        let path = std::env::temp_dir().join(format!("parsec_plot_{}.svg", std::process::id()));
        render_svg(&path, &solution.outline, 5.0, 0.5).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("<svg"));
        assert!(text.contains("polyline") || text.contains("path"));
    }
}
