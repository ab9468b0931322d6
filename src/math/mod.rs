//! Numerical building blocks: the half-integer power basis, a concurrent
//! matrix multiply, and a guarded matrix inverse.

pub mod basis;
pub mod inverse;
pub mod matmul;

pub use inverse::{SINGULAR_RCOND, invert, reciprocal_condition};
pub use matmul::par_multiply;
