//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - upper surface: `-`
//! - lower surface: `.`

use crate::domain::{AirfoilOutline, Surface};
use crate::plot::rotate;

/// Render both surfaces, rotated clockwise by `aoa` degrees.
pub fn render_ascii_plot(outline: &AirfoilOutline, aoa: f64, width: usize, height: usize) -> String {
    let upper = rotate(&outline.points(Surface::Upper), aoa);
    let lower = rotate(&outline.points(Surface::Lower), aoa);

    let (x_lo, x_hi) = extent(upper.iter().chain(&lower).map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_lo, y_hi) = extent(upper.iter().chain(&lower).map(|p| p.1)).unwrap_or((-0.1, 0.1));
    let span = (y_hi - y_lo).abs();
    let margin = (span * 0.05).max(1e-12);
    let (y_lo, y_hi) = (y_lo - margin, y_hi + margin);

    let mut canvas = Canvas::new(width.max(5), height.max(5), [x_lo, x_hi], [y_lo, y_hi]);
    canvas.trace(&upper, '-');
    canvas.trace(&lower, '.');

    let mut out = format!("Plot: x=[{x_lo:.3}, {x_hi:.3}] | y=[{y_lo:.3}, {y_hi:.3}]\n");
    out.push_str(&canvas.into_text());
    out
}

/// Finite `(min, max)` of the values, or `None` if they span nothing.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (hi > lo).then_some((lo, hi))
}

/// Character grid with a data-space window. Row 0 is the top.
struct Canvas {
    cells: Vec<Vec<char>>,
    x: [f64; 2],
    y: [f64; 2],
}

impl Canvas {
    fn new(width: usize, height: usize, x: [f64; 2], y: [f64; 2]) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x,
            y,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// Data point to `(column, row)`, clamped to the grid.
    fn cell(&self, px: f64, py: f64) -> (isize, isize) {
        let fx = ((px - self.x[0]) / (self.x[1] - self.x[0])).clamp(0.0, 1.0);
        let fy = ((py - self.y[0]) / (self.y[1] - self.y[0])).clamp(0.0, 1.0);
        let last_col = (self.width() - 1) as f64;
        let last_row = (self.height() - 1) as f64;
        ((fx * last_col).round() as isize, (last_row - fy * last_row).round() as isize)
    }

    /// Mark a blank cell. Drawn cells keep their first mark.
    fn mark(&mut self, col: isize, row: isize, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(c) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            if *c == ' ' {
                *c = ch;
            }
        }
    }

    /// Connect consecutive finite points with straight segments.
    fn trace(&mut self, points: &[(f64, f64)], ch: char) {
        let mut last: Option<(isize, isize)> = None;
        for &(px, py) in points {
            if !(px.is_finite() && py.is_finite()) {
                last = None;
                continue;
            }
            let here = self.cell(px, py);
            self.segment(last.unwrap_or(here), here, ch);
            last = Some(here);
        }
    }

    /// Bresenham segment between two cells, endpoints included.
    fn segment(&mut self, from: (isize, isize), to: (isize, isize), ch: char) {
        let (mut col, mut row) = from;
        let dc = (to.0 - col).abs();
        let dr = -(to.1 - row).abs();
        let step_c = if col < to.0 { 1 } else { -1 };
        let step_r = if row < to.1 { 1 } else { -1 };
        let mut err = dc + dr;

        loop {
            self.mark(col, row, ch);
            if (col, row) == to {
                break;
            }
            let twice = 2 * err;
            if twice >= dr {
                err += dr;
                col += step_c;
            }
            if twice <= dc {
                err += dc;
                row += step_r;
            }
        }
    }

    fn into_text(self) -> String {
        let mut out = String::new();
        for row in self.cells {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let outline = AirfoilOutline {
            stations: vec![0.0, 0.5, 1.0],
            upper: vec![0.0, 0.1, 0.0],
            lower: vec![0.0, -0.1, 0.0],
        };

        let txt = render_ascii_plot(&outline, 0.0, 5, 5);
        let expected = concat!(
            "Plot: x=[0.000, 1.000] | y=[-0.110, 0.110]\n",
            "  -  \n",
            " - - \n",
            "-   -\n",
            " . . \n",
            "  .  \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_has_requested_size() {
        let outline = AirfoilOutline {
            stations: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            upper: vec![0.0, 0.05, 0.06, 0.03, 0.0],
            lower: vec![0.0, -0.03, -0.02, -0.01, 0.0],
        };
        let txt = render_ascii_plot(&outline, 5.0, 40, 12);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.chars().count() == 40));
    }
}
