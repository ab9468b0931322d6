//! Linear solve for the basis coefficients.
//!
//! `c = M⁻¹ · P`, with the product formed by the concurrent row-per-task
//! multiply in [`crate::math::matmul`].

use nalgebra::DMatrix;
use tracing::debug;

use crate::domain::{Coefficients, ParsecParams, SYSTEM_SIZE};
use crate::math::{invert, par_multiply};
use crate::parsec::matrix::{BoundaryMatrix, boundary_matrix};
use crate::parsec::vector::{BoundaryVector, boundary_vector};
use crate::parsec::{ParsecError, ParsecResult};

/// The boundary-condition system `M · c = P` for one parameter set.
#[derive(Debug, Clone)]
pub struct BoundarySystem {
    pub matrix: BoundaryMatrix,
    pub rhs: BoundaryVector,
}

impl BoundarySystem {
    /// Build `M` and `P` from validated parameters.
    pub fn new(params: &ParsecParams) -> ParsecResult<Self> {
        validate_params(params)?;
        Ok(Self {
            matrix: boundary_matrix(params.xu, params.xl),
            rhs: boundary_vector(params)?,
        })
    }

    /// `M⁻¹`, or `SingularMatrix`.
    pub fn inverse(&self) -> ParsecResult<DMatrix<f64>> {
        invert(&DMatrix::from_column_slice(
            SYSTEM_SIZE,
            SYSTEM_SIZE,
            self.matrix.as_slice(),
        ))
    }

    /// Solve for the coefficient vector.
    pub fn solve(&self) -> ParsecResult<Coefficients> {
        let inverse = self.inverse()?;
        let rhs = DMatrix::from_column_slice(SYSTEM_SIZE, 1, self.rhs.as_slice());
        let product = par_multiply(&inverse, &rhs)?;

        let mut values = [0.0; SYSTEM_SIZE];
        for (i, v) in values.iter_mut().enumerate() {
            *v = product[(i, 0)];
        }
        apply_unit_rows(&self.matrix, &self.rhs, &mut values);

        let coefficients = Coefficients::new(values);
        if !coefficients.is_finite() {
            return Err(ParsecError::singular("solution has non-finite coefficients"));
        }
        debug!(residual = self.residual(&coefficients), "boundary system solved");
        Ok(coefficients)
    }

    /// Largest `|(M · c − P)_i|`.
    pub fn residual(&self, coefficients: &Coefficients) -> f64 {
        let c = nalgebra::SVector::<f64, SYSTEM_SIZE>::from_column_slice(coefficients.as_slice());
        (self.matrix * c - self.rhs).amax()
    }
}

/// Solve the PARSEC boundary system for one parameter set.
pub fn solve_coefficients(params: &ParsecParams) -> ParsecResult<Coefficients> {
    BoundarySystem::new(params)?.solve()
}

/// Reject parameters the boundary system cannot be built from.
///
/// Crest locations exactly at `0` or `1` are let through on purpose: they
/// produce a degenerate matrix, which the inverter reports as singular.
pub fn validate_params(params: &ParsecParams) -> ParsecResult<()> {
    for (name, value) in params.named_values() {
        if !value.is_finite() {
            return Err(ParsecError::invalid(name, value, "must be finite"));
        }
    }
    for (name, value) in [("xu", params.xu), ("xl", params.xl)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParsecError::invalid(
                name,
                value,
                "crest location must lie on the chord [0, 1]",
            ));
        }
    }
    Ok(())
}

/// Rows of `M` that isolate a single coefficient fix it exactly.
fn apply_unit_rows(matrix: &BoundaryMatrix, rhs: &BoundaryVector, values: &mut [f64; SYSTEM_SIZE]) {
    for (i, row) in matrix.row_iter().enumerate() {
        let mut nonzero = row.iter().enumerate().filter(|(_, v)| **v != 0.0);
        if let (Some((col, &v)), None) = (nonzero.next(), nonzero.next()) {
            if v == 1.0 {
                values[col] = rhs[i];
            }
        }
    }
}
