//! Concurrent dense matrix multiply.
//!
//! For an `(m×k)·(k×n)` product we fan out one task per output row. Each task
//! computes its row independently and reports `(row index, row values)` as a
//! single message; the collector places every row by its reported index.
//!
//! Because placement is keyed by index and each row is reduced in a fixed
//! order, the result does not depend on which task finishes first.

use std::sync::mpsc;

use nalgebra::DMatrix;
use tracing::debug;

use crate::parsec::{ParsecError, ParsecResult};

/// One finished output row.
#[derive(Debug)]
struct RowResult {
    index: usize,
    values: Vec<f64>,
}

/// Multiply `lhs · rhs`, computing each output row on the rayon pool.
pub fn par_multiply(lhs: &DMatrix<f64>, rhs: &DMatrix<f64>) -> ParsecResult<DMatrix<f64>> {
    if lhs.ncols() != rhs.nrows() {
        return Err(ParsecError::DimensionMismatch {
            left: lhs.shape(),
            right: rhs.shape(),
        });
    }

    let m = lhs.nrows();
    let n = rhs.ncols();
    let (tx, rx) = mpsc::channel::<RowResult>();

    // Every task is joined before the scope returns, so the collector below
    // never waits on a row that can no longer arrive.
    rayon::scope(|s| {
        for index in 0..m {
            let tx = tx.clone();
            s.spawn(move |_| {
                let values = row_product(lhs, rhs, index);
                // The receiver outlives the scope; a send error is impossible here.
                let _ = tx.send(RowResult { index, values });
            });
        }
    });
    drop(tx);

    let mut out = DMatrix::<f64>::zeros(m, n);
    let mut seen = vec![false; m];
    for RowResult { index, values } in rx.iter() {
        if seen[index] {
            return Err(ParsecError::NumericalFailure(format!(
                "row {index} reported twice"
            )));
        }
        seen[index] = true;
        for (j, v) in values.into_iter().enumerate() {
            out[(index, j)] = v;
        }
    }

    let received = seen.iter().filter(|&&s| s).count();
    if received != m {
        return Err(ParsecError::NumericalFailure(format!(
            "matrix multiply collected {received} of {m} rows"
        )));
    }

    debug!(rows = m, inner = lhs.ncols(), cols = n, "matrix multiply complete");
    Ok(out)
}

fn row_product(lhs: &DMatrix<f64>, rhs: &DMatrix<f64>, i: usize) -> Vec<f64> {
    let mut row = vec![0.0; rhs.ncols()];
    for p in 0..lhs.ncols() {
        let a = lhs[(i, p)];
        for (j, acc) in row.iter_mut().enumerate() {
            *acc += a * rhs[(p, j)];
        }
    }
    row
}
