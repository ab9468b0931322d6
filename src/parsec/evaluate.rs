//! Curve evaluation over a discretized chord.
//!
//! Evaluation runs as two fan-out/fan-in stages on the rayon pool:
//!
//! 1. six tasks compute the power columns `x^(n+0.5)` over the stations and
//!    report them tagged by term;
//! 2. once all six columns are in hand, twelve tasks scale a column by one
//!    coefficient each and deposit the result, tagged by `(Surface, term)`,
//!    into a shared accumulator.
//!
//! The accumulator sums each surface in ascending term order, so the output
//! is bit-identical no matter which task finishes first.

use std::sync::{Mutex, mpsc};

use tracing::debug;

use crate::domain::{AirfoilOutline, Coefficients, SYSTEM_SIZE, Surface};
use crate::math::basis::{self, TERM_COUNT};
use crate::parsec::{ParsecError, ParsecResult};

/// Largest supported station count; stations are rounded to 1e-6, so finer
/// grids would repeat values.
pub const MAX_GRANULARITY: usize = 1_000_001;

/// Stations are rounded to this many steps per unit chord.
const STATION_RESOLUTION: f64 = 1e6;

/// One power column, tagged by its term index.
#[derive(Debug)]
struct BasisColumn {
    term: usize,
    values: Vec<f64>,
}

/// One coefficient-scaled column, tagged at task creation.
#[derive(Debug)]
struct ScaledColumn {
    surface: Surface,
    term: usize,
    values: Vec<f64>,
}

/// Per-(surface, term) slots for the scaled columns.
#[derive(Debug)]
struct Accumulator {
    slots: Vec<Option<Vec<f64>>>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            slots: vec![None; SYSTEM_SIZE],
        }
    }

    fn deposit(&mut self, column: ScaledColumn) {
        self.slots[column.surface.offset() + column.term] = Some(column.values);
    }

    /// Sum each surface's columns in ascending term order.
    fn finish(self, len: usize) -> ParsecResult<(Vec<f64>, Vec<f64>)> {
        let mut sums = [vec![0.0; len], vec![0.0; len]];
        for (sum, surface) in sums.iter_mut().zip(Surface::ALL) {
            for term in 0..TERM_COUNT {
                let column = self.slots[surface.offset() + term].as_ref().ok_or_else(|| {
                    ParsecError::NumericalFailure(format!(
                        "no result for coefficient {}",
                        surface.coefficient_label(term)
                    ))
                })?;
                for (acc, v) in sum.iter_mut().zip(column) {
                    *acc += v;
                }
            }
        }
        let [upper, lower] = sums;
        Ok((upper, lower))
    }
}

/// Uniform chord stations in `[0, 1]`, rounded to 1e-6.
pub fn stations(granularity: usize) -> ParsecResult<Vec<f64>> {
    if !(2..=MAX_GRANULARITY).contains(&granularity) {
        return Err(ParsecError::invalid(
            "granularity",
            granularity as f64,
            format!("station count must be between 2 and {MAX_GRANULARITY}"),
        ));
    }
    let last = (granularity - 1) as f64;
    Ok((0..granularity)
        .map(|i| (i as f64 / last * STATION_RESOLUTION).round() / STATION_RESOLUTION)
        .collect())
}

/// Evaluate both surfaces over `granularity` stations.
pub fn evaluate(coefficients: &Coefficients, granularity: usize) -> ParsecResult<AirfoilOutline> {
    if !coefficients.is_finite() {
        return Err(ParsecError::NumericalFailure(
            "cannot evaluate non-finite coefficients".to_string(),
        ));
    }
    let stations = stations(granularity)?;
    let columns = basis_columns(&stations)?;
    let (upper, lower) = scale_and_accumulate(coefficients, &columns, stations.len())?;

    debug!(stations = stations.len(), "surfaces evaluated");
    Ok(AirfoilOutline {
        stations,
        upper,
        lower,
    })
}

/// Stage 1: all six power columns. Returns only once every column is in.
fn basis_columns(stations: &[f64]) -> ParsecResult<Vec<Vec<f64>>> {
    let (tx, rx) = mpsc::channel::<BasisColumn>();
    rayon::scope(|s| {
        for term in 0..TERM_COUNT {
            let tx = tx.clone();
            s.spawn(move |_| {
                let values = basis::power_column(stations, term);
                let _ = tx.send(BasisColumn { term, values });
            });
        }
    });
    drop(tx);

    let mut columns: Vec<Option<Vec<f64>>> = vec![None; TERM_COUNT];
    for BasisColumn { term, values } in rx.iter() {
        columns[term] = Some(values);
    }
    columns
        .into_iter()
        .enumerate()
        .map(|(term, col)| {
            col.ok_or_else(|| {
                ParsecError::NumericalFailure(format!(
                    "basis column x^{} was never produced",
                    basis::exponent(term)
                ))
            })
        })
        .collect()
}

/// Stage 2: twelve scalar multiplies feeding one accumulator.
fn scale_and_accumulate(
    coefficients: &Coefficients,
    columns: &[Vec<f64>],
    len: usize,
) -> ParsecResult<(Vec<f64>, Vec<f64>)> {
    let accumulator = Mutex::new(Accumulator::new());
    rayon::scope(|s| {
        for surface in Surface::ALL {
            for (term, column) in columns.iter().enumerate() {
                let coefficient = coefficients.get(surface, term);
                let accumulator = &accumulator;
                s.spawn(move |_| {
                    let values = column.iter().map(|x| coefficient * x).collect();
                    // A poisoned lock leaves the slot empty; `finish` reports it.
                    if let Ok(mut acc) = accumulator.lock() {
                        acc.deposit(ScaledColumn {
                            surface,
                            term,
                            values,
                        });
                    }
                });
            }
        }
    });

    accumulator
        .into_inner()
        .map_err(|_| ParsecError::NumericalFailure("accumulator lock poisoned".to_string()))?
        .finish(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coefficients() -> Coefficients {
        Coefficients::new([
            0.28, 0.12, -0.9, 1.3, -1.1, 0.33, -0.28, 0.4, -0.2, 0.7, -0.5, 0.1,
        ])
    }

    #[test]
    fn default_stations_are_uniform() {
        let s = stations(201).unwrap();
        assert_eq!(s.len(), 201);
        assert_eq!(s[0], 0.0);
        assert_eq!(s[200], 1.0);
        for w in s.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] - w[0] - 0.005).abs() < 1e-12, "step {}", w[1] - w[0]);
        }
    }

    #[test]
    fn granularity_out_of_range_is_rejected() {
        assert!(stations(1).is_err());
        assert!(stations(MAX_GRANULARITY + 1).is_err());
        assert_eq!(stations(2).unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn matches_direct_expansion() {
        let c = sample_coefficients();
        let outline = evaluate(&c, 51).unwrap();
        for (i, &x) in outline.stations.iter().enumerate() {
            let upper: f64 = (0..6).map(|n| c.get(Surface::Upper, n) * x.powf(n as f64 + 0.5)).sum();
            let lower: f64 = (0..6).map(|n| c.get(Surface::Lower, n) * x.powf(n as f64 + 0.5)).sum();
            assert!((outline.upper[i] - upper).abs() < 1e-12);
            assert!((outline.lower[i] - lower).abs() < 1e-12);
        }
    }

    #[test]
    fn leading_edge_is_pinned() {
        let outline = evaluate(&sample_coefficients(), 201).unwrap();
        assert_eq!(outline.upper[0], 0.0);
        assert_eq!(outline.lower[0], 0.0);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let c = sample_coefficients();
        let first = evaluate(&c, 301).unwrap();
        for _ in 0..25 {
            let again = evaluate(&c, 301).unwrap();
            let same = |a: &[f64], b: &[f64]| a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits());
            assert!(same(&first.upper, &again.upper));
            assert!(same(&first.lower, &again.lower));
            assert!(same(&first.stations, &again.stations));
        }
    }

    #[test]
    fn non_finite_coefficients_are_rejected() {
        let mut values = [0.0; SYSTEM_SIZE];
        values[3] = f64::NAN;
        assert!(evaluate(&Coefficients::new(values), 11).is_err());
    }

    #[test]
    fn missing_slot_is_reported() {
        let acc = Accumulator::new();
        let err = acc.finish(3).unwrap_err();
        assert!(format!("{err}").contains("a1"), "{err}");
    }
}
