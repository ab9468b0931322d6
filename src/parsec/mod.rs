//! PARSEC solve-and-evaluate pipeline.
//!
//! ```text
//! ParsecParams ─┬─ boundary_matrix(xu, xl) ── invert ─┐
//!               └─ boundary_vector(params) ───────────┴─ par_multiply ── evaluate ── AirfoilOutline
//! ```
//!
//! Every run owns its matrix, vector, coefficients, and output arrays.

pub mod error;
pub mod evaluate;
pub mod matrix;
pub mod solver;
pub mod vector;

use std::time::Instant;

use tracing::info;

pub use error::{ParsecError, ParsecResult};
pub use evaluate::{MAX_GRANULARITY, evaluate, stations};
pub use matrix::{BoundaryMatrix, Constraint, boundary_matrix};
pub use solver::{BoundarySystem, solve_coefficients, validate_params};
pub use vector::{BoundaryVector, boundary_vector};

use crate::domain::{AirfoilSolution, ParsecParams};

/// Solve for the coefficients of `params` and sample both surfaces.
///
/// Blocks until the outline is complete. Fails without producing any output
/// arrays if the parameters are invalid or the boundary system is singular.
pub fn generate_airfoil(params: &ParsecParams, granularity: usize) -> ParsecResult<AirfoilSolution> {
    let started = Instant::now();
    let coefficients = solve_coefficients(params)?;
    let outline = evaluate(&coefficients, granularity)?;

    info!(
        xu = params.xu,
        xl = params.xl,
        granularity,
        elapsed_us = started.elapsed().as_micros() as u64,
        "airfoil generated"
    );

    Ok(AirfoilSolution {
        params: *params,
        coefficients,
        outline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_GRANULARITY;

    fn reference_params() -> ParsecParams {
        ParsecParams {
            r_le: 0.04,
            xu: 0.3,
            yu: 0.11,
            d2yu: -0.8,
            xl: 0.3,
            yl: -0.06,
            d2yl: 0.45,
            delta_y_te: 0.0,
            y_te: 0.0,
            a_te: 10.0,
            b_te: 10.0,
        }
    }

    #[test]
    fn reference_section_end_to_end() {
        let solution = generate_airfoil(&reference_params(), DEFAULT_GRANULARITY).unwrap();
        let outline = &solution.outline;

        assert_eq!(outline.stations.len(), 201);
        assert_eq!(outline.upper.len(), 201);
        assert_eq!(outline.lower.len(), 201);
        assert_eq!(outline.upper[0], 0.0);
        assert_eq!(outline.lower[0], 0.0);

        let crest = outline
            .stations
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - 0.3).abs().total_cmp(&(b.1 - 0.3).abs()))
            .map(|(i, _)| i)
            .unwrap();
        assert!((outline.upper[crest] - 0.11).abs() < 1e-3, "upper at crest {}", outline.upper[crest]);
        assert!((outline.lower[crest] + 0.06).abs() < 1e-3, "lower at crest {}", outline.lower[crest]);

        assert!(outline.upper.iter().chain(&outline.lower).all(|v| v.is_finite()));
    }

    #[test]
    fn trailing_edge_closes_with_zero_thickness() {
        let solution = generate_airfoil(&reference_params(), 101).unwrap();
        let last = solution.outline.len() - 1;
        let gap = solution.outline.upper[last] - solution.outline.lower[last];
        assert!(gap.abs() < 1e-9, "trailing-edge gap {gap}");
    }

    #[test]
    fn zero_nose_radius_stays_finite() {
        let params = ParsecParams {
            r_le: 0.0,
            ..reference_params()
        };
        let solution = generate_airfoil(&params, DEFAULT_GRANULARITY).unwrap();
        assert_eq!(solution.coefficients.as_slice()[0], 0.0);
        assert_eq!(solution.coefficients.as_slice()[6], 0.0);
        let outline = &solution.outline;
        assert!(outline.upper.iter().chain(&outline.lower).all(|v| v.is_finite()));
    }

    #[test]
    fn repeated_pipeline_runs_are_bit_identical() {
        let first = generate_airfoil(&reference_params(), DEFAULT_GRANULARITY).unwrap();
        for _ in 0..10 {
            let again = generate_airfoil(&reference_params(), DEFAULT_GRANULARITY).unwrap();
            assert_eq!(first.coefficients, again.coefficients);
            assert_eq!(first.outline, again.outline);
        }
    }

    #[test]
    fn degenerate_crest_produces_no_outline() {
        for xu in [0.0, 1.0] {
            let params = ParsecParams {
                xu,
                ..reference_params()
            };
            let err = generate_airfoil(&params, DEFAULT_GRANULARITY).unwrap_err();
            assert!(matches!(err, ParsecError::SingularMatrix { .. }), "xu={xu}: {err:?}");
        }
    }
}
