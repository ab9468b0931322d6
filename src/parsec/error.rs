//! Error types for the PARSEC solve pipeline.

use thiserror::Error;

/// Errors that can occur while solving for or evaluating a PARSEC airfoil.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsecError {
    /// The boundary-condition matrix cannot be inverted.
    #[error("Boundary-condition matrix is singular: {reason}")]
    SingularMatrix {
        /// What made the system degenerate.
        reason: String,
    },

    /// A shape parameter is outside the range the solve can handle.
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on the command line.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// Operand shapes do not line up for a matrix product.
    #[error("Dimension mismatch: ({}x{}) * ({}x{})", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        /// Left operand shape (rows, cols).
        left: (usize, usize),
        /// Right operand shape (rows, cols).
        right: (usize, usize),
    },

    /// A concurrent stage did not deliver every result it owes.
    #[error("Numerical stage failed: {0}")]
    NumericalFailure(String),
}

impl ParsecError {
    pub(crate) fn singular(reason: impl Into<String>) -> Self {
        Self::SingularMatrix {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}

/// Result type for PARSEC operations.
pub type ParsecResult<T> = std::result::Result<T, ParsecError>;
