//! Half-integer power basis of the PARSEC expansion.
//!
//! Each surface is written as
//!
//! ```text
//! y(x) = Σ_{n=0}^{5} c_n · x^(n + 1/2)
//! ```
//!
//! so the boundary conditions only ever need three primitives per term:
//! its value, first derivative, and second derivative at a chord station.
//!
//! Numerical notes:
//! - The derivatives carry negative powers for the low-order terms
//!   (`x^-0.5`, `x^-1.5`), so they blow up at `x = 0`. Callers that build
//!   matrices from them are expected to check finiteness.
//! - Derivative prefactors `e` and `e(e - 1)` are products of halves and
//!   therefore exact in binary floating point.

/// Number of basis terms per surface.
pub const TERM_COUNT: usize = 6;

/// Exponent of term `n` (`n + 0.5`).
pub fn exponent(n: usize) -> f64 {
    n as f64 + 0.5
}

/// All six exponents in ascending order.
pub fn exponents() -> [f64; TERM_COUNT] {
    std::array::from_fn(exponent)
}

/// `x^e`.
pub fn value(x: f64, n: usize) -> f64 {
    x.powf(exponent(n))
}

/// `d/dx x^e = e · x^(e-1)`.
pub fn slope(x: f64, n: usize) -> f64 {
    let e = exponent(n);
    e * x.powf(e - 1.0)
}

/// Prefactor of the second derivative, `e(e - 1)`.
///
/// For `n = 0..5` this is `[-0.25, 0.75, 3.75, 8.75, 15.75, 24.75]`.
pub fn curvature_factor(n: usize) -> f64 {
    let e = exponent(n);
    e * (e - 1.0)
}

/// `d²/dx² x^e = e(e - 1) · x^(e-2)`.
pub fn curvature(x: f64, n: usize) -> f64 {
    curvature_factor(n) * x.powf(exponent(n) - 2.0)
}

/// Elementwise `x^e` over a station array.
pub fn power_column(stations: &[f64], n: usize) -> Vec<f64> {
    let e = exponent(n);
    stations.iter().map(|&x| x.powf(e)).collect()
}
