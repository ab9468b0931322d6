//! Debug bundle writer for inspecting one boundary-system solve.
//!
//! The bundle is a markdown file holding the assembled system, the quality of
//! the inverse, the solved coefficients, and the outline statistics.

use std::fmt::Write as _;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use chrono::Local;
use nalgebra::DMatrix;

use crate::domain::{AirfoilSolution, SYSTEM_SIZE, Surface};
use crate::error::{AppError, EXIT_INPUT};
use crate::math::basis::TERM_COUNT;
use crate::math::reciprocal_condition;
use crate::parsec::{BoundarySystem, Constraint};
use crate::report::outline_stats;

/// Render the bundle text for a solved section.
pub fn debug_report(solution: &AirfoilSolution, aoa: f64) -> Result<String, AppError> {
    let system = BoundarySystem::new(&solution.params)?;
    let m = DMatrix::from_column_slice(SYSTEM_SIZE, SYSTEM_SIZE, system.matrix.as_slice());
    let inverse = system.inverse()?;
    let identity_error = (&m * &inverse - DMatrix::<f64>::identity(SYSTEM_SIZE, SYSTEM_SIZE)).amax();

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, solution, aoa, &system, &m, identity_error);
    Ok(out)
}

fn write_report(
    out: &mut String,
    solution: &AirfoilSolution,
    aoa: f64,
    system: &BoundarySystem,
    m: &DMatrix<f64>,
    identity_error: f64,
) -> std::fmt::Result {
    writeln!(out, "# parsec debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- stations: {}", solution.outline.len())?;
    writeln!(out, "- aoa: {aoa:.3} deg")?;

    writeln!(out, "\n## Parameters")?;
    writeln!(out, "| name | value |")?;
    writeln!(out, "| - | - |")?;
    for (name, value) in solution.params.named_values() {
        writeln!(out, "| {name} | {value} |")?;
    }

    writeln!(out, "\n## Boundary system (M | P)")?;
    writeln!(out, "| row | constraint | M | P |")?;
    writeln!(out, "| - | - | - | - |")?;
    for (i, constraint) in Constraint::ORDER.iter().enumerate() {
        let row: Vec<f64> = (0..SYSTEM_SIZE).map(|j| m[(i, j)]).collect();
        writeln!(
            out,
            "| {i} | {constraint:?} | {} | {:.9} |",
            fmt_vec(&row),
            system.rhs[i]
        )?;
    }

    writeln!(out, "\n## Inverse")?;
    writeln!(out, "- rcond: {}", fmt_opt(reciprocal_condition(m)))?;
    writeln!(out, "- max |M·M⁻¹ − I|: {identity_error:e}")?;
    writeln!(out, "- max |M·c − P|: {:e}", system.residual(&solution.coefficients))?;

    writeln!(out, "\n## Coefficients")?;
    writeln!(out, "| term | exponent | upper | lower |")?;
    writeln!(out, "| - | - | - | - |")?;
    for term in 0..TERM_COUNT {
        writeln!(
            out,
            "| {}/{} | {} | {:.12e} | {:.12e} |",
            Surface::Upper.coefficient_label(term),
            Surface::Lower.coefficient_label(term),
            crate::math::basis::exponent(term),
            solution.coefficients.get(Surface::Upper, term),
            solution.coefficients.get(Surface::Lower, term),
        )?;
    }

    writeln!(out, "\n## Outline")?;
    match outline_stats(&solution.outline) {
        Some(s) => {
            writeln!(out, "- max thickness: {:.6} at x={:.4}", s.max_thickness, s.max_thickness_x)?;
            writeln!(out, "- max camber: {:.6} at x={:.4}", s.max_camber, s.max_camber_x)?;
            writeln!(out, "- trailing-edge gap: {:.6}", s.trailing_edge_gap)?;
            writeln!(out, "- leading edge pinned: {}", s.leading_edge_pinned)?;
        }
        None => writeln!(out, "- (empty)")?,
    }
    Ok(())
}

/// Write the bundle under `dir` and return its path.
pub fn write_debug_bundle(dir: &Path, solution: &AirfoilSolution, aoa: f64) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "parsec_debug_xu{:.3}_xl{:.3}_{ts}.md",
        solution.params.xu, solution.params.xl
    ));

    let text = debug_report(solution, aoa)?;
    std::fs::write(&path, text)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write debug file: {e}")))?;
    Ok(path)
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
    parts.join(" ")
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:e}")).unwrap_or_else(|| "n/a".to_string())
}
