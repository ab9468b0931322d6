//! Export an airfoil outline as delimited text.
//!
//! One `(x, y, z)` row per point with `z = 0.0`, which is what CAD importers
//! expect for a planar section. The outline is traced as a closed loop:
//!
//! - upper surface from the leading edge to the trailing edge
//! - lower surface back from the trailing edge, stopping short of the
//!   leading edge (it coincides with the first upper point)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::AirfoilOutline;
use crate::error::{AppError, EXIT_INPUT};

/// Closed-loop `(x, y)` points, scaled by `chord_scale`.
pub fn outline_loop(outline: &AirfoilOutline, chord_scale: f64) -> Vec<(f64, f64)> {
    let n = outline.len();
    let mut points = Vec::with_capacity((2 * n).saturating_sub(1));
    for i in 0..n {
        points.push((outline.stations[i] * chord_scale, outline.upper[i] * chord_scale));
    }
    for i in (1..n).rev() {
        points.push((outline.stations[i] * chord_scale, outline.lower[i] * chord_scale));
    }
    points
}

/// Write the outline rows to any writer.
pub fn write_outline_rows<W: Write>(
    writer: W,
    outline: &AirfoilOutline,
    chord_scale: f64,
    delimiter: u8,
) -> Result<(), AppError> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    for (x, y) in outline_loop(outline, chord_scale) {
        csv.write_record([format!("{x:.6}"), format!("{y:.6}"), format!("{:.6}", 0.0)])
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write outline row: {e}")))?;
    }
    csv.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush outline: {e}")))?;
    Ok(())
}

/// Write the outline to a delimited text file.
pub fn write_outline_csv(
    path: &Path,
    outline: &AirfoilOutline,
    chord_scale: f64,
    delimiter: u8,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create outline CSV '{}': {e}", path.display()),
        )
    })?;
    write_outline_rows(file, outline, chord_scale, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_outline() -> AirfoilOutline {
        AirfoilOutline {
            stations: vec![0.0, 0.5, 1.0],
            upper: vec![0.0, 0.1, 0.01],
            lower: vec![0.0, -0.05, -0.01],
        }
    }

    #[test]
    fn loop_runs_upper_forward_then_lower_back() {
        let pts = outline_loop(&tiny_outline(), 1.0);
        assert_eq!(
            pts,
            vec![(0.0, 0.0), (0.5, 0.1), (1.0, 0.01), (1.0, -0.01), (0.5, -0.05)]
        );
    }

    #[test]
    fn rows_are_scaled_and_planar() {
        let mut buf = Vec::new();
        write_outline_rows(&mut buf, &tiny_outline(), 0.5, b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        let expected = concat!(
            "0.000000,0.000000,0.000000\n",
            "0.250000,0.050000,0.000000\n",
            "0.500000,0.005000,0.000000\n",
            "0.500000,-0.005000,0.000000\n",
            "0.250000,-0.025000,0.000000\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn delimiter_is_configurable() {
        let mut buf = Vec::new();
        write_outline_rows(&mut buf, &tiny_outline(), 1.0, b'\t').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().next().unwrap().contains('\t'));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn writes_file() {
        let path = std::env::temp_dir().join(format!("parsec_outline_{}.csv", std::process::id()));
        write_outline_csv(&path, &tiny_outline(), 1.0, b',').unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 5);
        let _ = std::fs::remove_file(&path);
    }
}
