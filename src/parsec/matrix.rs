//! Boundary-condition matrix.
//!
//! Each row of the 12×12 system is one physical constraint on the two
//! six-term expansions. Columns `0..6` hold the upper-surface coefficients
//! `a1..a6`, columns `6..12` the lower-surface coefficients `b1..b6`.
//!
//! Rows are produced by pure per-constraint builders (see [`Constraint::row`])
//! and assembled into an immutable matrix, so a row can be tested on its own.

use nalgebra::SMatrix;

use crate::domain::{SYSTEM_SIZE, Surface};
use crate::math::basis::{self, TERM_COUNT};

/// The assembled 12×12 boundary-condition matrix.
pub type BoundaryMatrix = SMatrix<f64, SYSTEM_SIZE, SYSTEM_SIZE>;

/// One row of the boundary-condition matrix.
pub type ConstraintRow = [f64; SYSTEM_SIZE];

/// Physical constraints, in matrix row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// `a1` isolated: fixed by the leading-edge radius.
    NoseUpper,
    /// Upper surface passes through the crest ordinate.
    CrestValueUpper,
    /// Upper surface curvature at the crest.
    CrestCurvatureUpper,
    /// Lower surface passes through the crest ordinate.
    CrestValueLower,
    /// Lower surface curvature at the crest.
    CrestCurvatureLower,
    /// `Σa − Σb`: trailing-edge thickness.
    TrailingEdgeThickness,
    /// `(Σa + Σb) / 2`: trailing-edge mean ordinate.
    TrailingEdgeOrdinate,
    /// Upper surface slope at `x = 1`.
    TrailingEdgeSlopeUpper,
    /// Lower surface slope at `x = 1`.
    TrailingEdgeSlopeLower,
    /// Zero slope at the upper crest.
    CrestSlopeUpper,
    /// Zero slope at the lower crest.
    CrestSlopeLower,
    /// `b1` isolated: fixed by the leading-edge radius.
    NoseLower,
}

impl Constraint {
    pub const ORDER: [Constraint; SYSTEM_SIZE] = [
        Constraint::NoseUpper,
        Constraint::CrestValueUpper,
        Constraint::CrestCurvatureUpper,
        Constraint::CrestValueLower,
        Constraint::CrestCurvatureLower,
        Constraint::TrailingEdgeThickness,
        Constraint::TrailingEdgeOrdinate,
        Constraint::TrailingEdgeSlopeUpper,
        Constraint::TrailingEdgeSlopeLower,
        Constraint::CrestSlopeUpper,
        Constraint::CrestSlopeLower,
        Constraint::NoseLower,
    ];

    /// Build this constraint's matrix row for crest locations `xu` / `xl`.
    pub fn row(self, xu: f64, xl: f64) -> ConstraintRow {
        match self {
            Constraint::NoseUpper => unit(Surface::Upper.offset()),
            Constraint::CrestValueUpper => surface_row(Surface::Upper, |n| basis::value(xu, n)),
            Constraint::CrestCurvatureUpper => {
                surface_row(Surface::Upper, |n| basis::curvature(xu, n))
            }
            Constraint::CrestValueLower => surface_row(Surface::Lower, |n| basis::value(xl, n)),
            Constraint::CrestCurvatureLower => {
                surface_row(Surface::Lower, |n| basis::curvature(xl, n))
            }
            Constraint::TrailingEdgeThickness => {
                let mut row = surface_row(Surface::Upper, |_| 1.0);
                for v in &mut row[Surface::Lower.offset()..] {
                    *v = -1.0;
                }
                row
            }
            Constraint::TrailingEdgeOrdinate => [0.5; SYSTEM_SIZE],
            Constraint::TrailingEdgeSlopeUpper => surface_row(Surface::Upper, basis::exponent),
            Constraint::TrailingEdgeSlopeLower => surface_row(Surface::Lower, basis::exponent),
            Constraint::CrestSlopeUpper => surface_row(Surface::Upper, |n| basis::slope(xu, n)),
            Constraint::CrestSlopeLower => surface_row(Surface::Lower, |n| basis::slope(xl, n)),
            Constraint::NoseLower => unit(Surface::Lower.offset()),
        }
    }
}

/// Assemble the boundary-condition matrix for the given crest locations.
///
/// No validation happens here: crest locations of `0` or `1` yield a matrix
/// with infinite entries or coincident rows, which the inverter reports.
pub fn boundary_matrix(xu: f64, xl: f64) -> BoundaryMatrix {
    let rows = Constraint::ORDER.map(|c| c.row(xu, xl));
    BoundaryMatrix::from_fn(|i, j| rows[i][j])
}

fn unit(col: usize) -> ConstraintRow {
    let mut row = [0.0; SYSTEM_SIZE];
    row[col] = 1.0;
    row
}

fn surface_row(surface: Surface, term: impl Fn(usize) -> f64) -> ConstraintRow {
    let mut row = [0.0; SYSTEM_SIZE];
    let start = surface.offset();
    for n in 0..TERM_COUNT {
        row[start + n] = term(n);
    }
    row
}
