//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{AirfoilSolution, Surface};
use crate::math::basis::{self, TERM_COUNT};
use crate::report::outline_stats;

/// Format the full run summary (parameters + coefficients + geometry).
pub fn format_run_summary(solution: &AirfoilSolution, aoa: f64) -> String {
    let p = &solution.params;
    let mut out = String::new();

    out.push_str("=== parsec - PARSEC airfoil ===\n");
    out.push_str(&format!("Nose radius: r_LE={:.4}\n", p.r_le));
    out.push_str(&format!(
        "Upper crest: x={:.4} y={:.4} y''={:.4}\n",
        p.xu, p.yu, p.d2yu
    ));
    out.push_str(&format!(
        "Lower crest: x={:.4} y={:.4} y''={:.4}\n",
        p.xl, p.yl, p.d2yl
    ));
    out.push_str(&format!(
        "Trailing edge: dy={:.4} y={:.4} a={:.2}deg b={:.2}deg\n",
        p.delta_y_te, p.y_te, p.a_te, p.b_te
    ));
    out.push_str(&format!(
        "Stations: n={} | display angle={aoa:.2}deg\n",
        solution.outline.len()
    ));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format_coefficients(solution));

    if let Some(stats) = outline_stats(&solution.outline) {
        out.push_str("\nGeometry:\n");
        out.push_str(&format!(
            "- max thickness: {:.5} at x={:.3}\n",
            stats.max_thickness, stats.max_thickness_x
        ));
        out.push_str(&format!(
            "- max camber   : {:.5} at x={:.3}\n",
            stats.max_camber, stats.max_camber_x
        ));
        out.push_str(&format!(
            "- TE gap       : {:.6}\n",
            stats.trailing_edge_gap
        ));
        if !stats.leading_edge_pinned {
            out.push_str("- warning: leading edge is not at the origin\n");
        }
    }

    out
}

/// Coefficient table, one row per basis term.
pub fn format_coefficients(solution: &AirfoilSolution) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>6} {:>4} {:>14} {:>4} {:>14}\n", "x^e", "", "upper", "", "lower"));
    for term in 0..TERM_COUNT {
        out.push_str(&format!(
            "{:>6} {:>4} {:>14.8} {:>4} {:>14.8}\n",
            format!("{:.1}", basis::exponent(term)),
            Surface::Upper.coefficient_label(term),
            solution.coefficients.get(Surface::Upper, term),
            Surface::Lower.coefficient_label(term),
            solution.coefficients.get(Surface::Lower, term),
        ));
    }
    out
}
