//! Matrix inversion with an explicit singularity check.
//!
//! LU inversion alone only fails on an exact zero pivot, which rounding
//! almost never produces. A boundary system with a crest at the trailing edge
//! has two coincident rows, and one with a crest at the nose has infinite
//! entries; both must be reported rather than inverted into garbage. We
//! therefore screen the matrix first:
//!
//! - every entry must be finite
//! - the reciprocal condition number `σ_min / σ_max` (from the SVD) must be
//!   at least [`SINGULAR_RCOND`]

use nalgebra::DMatrix;
use tracing::debug;

use crate::parsec::{ParsecError, ParsecResult};

/// Reciprocal condition number below which a matrix is treated as singular.
pub const SINGULAR_RCOND: f64 = 1e-12;

/// `σ_min / σ_max`, or `None` if the matrix is empty, all-zero, or non-finite.
pub fn reciprocal_condition(m: &DMatrix<f64>) -> Option<f64> {
    if m.is_empty() || m.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let sv = m.clone().singular_values();
    let max = sv.max();
    let min = sv.min();
    if max > 0.0 { Some(min / max) } else { None }
}

/// Invert a square matrix, failing with `SingularMatrix` when it is not safely invertible.
pub fn invert(m: &DMatrix<f64>) -> ParsecResult<DMatrix<f64>> {
    if !m.is_square() {
        let (r, c) = m.shape();
        return Err(ParsecError::singular(format!("matrix is {r}x{c}, not square")));
    }
    if let Some(((row, col), v)) = m
        .iter()
        .enumerate()
        .map(|(k, v)| ((k % m.nrows(), k / m.nrows()), *v))
        .find(|(_, v)| !v.is_finite())
    {
        return Err(ParsecError::singular(format!(
            "entry ({row}, {col}) is {v}; a crest location of 0 makes the curvature rows blow up"
        )));
    }

    let rcond = reciprocal_condition(m)
        .ok_or_else(|| ParsecError::singular("matrix has no non-zero singular value"))?;
    debug!(rcond, "boundary matrix conditioning");
    if rcond < SINGULAR_RCOND {
        return Err(ParsecError::singular(format!(
            "reciprocal condition number {rcond:.3e} is below {SINGULAR_RCOND:.0e}"
        )));
    }

    let inverse = m
        .clone()
        .try_inverse()
        .ok_or_else(|| ParsecError::singular("LU factorization hit a zero pivot"))?;
    if inverse.iter().any(|v| !v.is_finite()) {
        return Err(ParsecError::singular("inverse has non-finite entries"));
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_well_conditioned_matrix() {
        let m = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let inv = invert(&m).unwrap();
        let id = &m * &inv;
        for i in 0..3 {
            for j in 0..3 {
                let target = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - target).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn duplicate_rows_are_singular() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 0.5, 1.5, 2.5, 1.0, 2.0, 3.0]);
        let err = invert(&m).unwrap_err();
        assert!(matches!(err, ParsecError::SingularMatrix { .. }), "{err:?}");
    }

    #[test]
    fn non_finite_entries_are_singular() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, f64::NEG_INFINITY, 0.0, 1.0]);
        let err = invert(&m).unwrap_err();
        match err {
            ParsecError::SingularMatrix { reason } => assert!(reason.contains("(0, 1)"), "{reason}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_square_is_rejected() {
        let m = DMatrix::<f64>::identity(2, 3);
        assert!(invert(&m).is_err());
    }

    #[test]
    fn reciprocal_condition_of_identity_is_one() {
        let rc = reciprocal_condition(&DMatrix::identity(5, 5)).unwrap();
        assert!((rc - 1.0).abs() < 1e-12);
    }
}
