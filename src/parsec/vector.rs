//! Boundary-condition vector.
//!
//! Entry `i` is the target value of row `i` of the boundary matrix:
//!
//! ```text
//! [ √(2 R_LE), Yu, d2Yu, Yl, d2Yl, ΔY_TE, Y_TE,
//!   tan(a_TE) − tan(b_TE/2), tan(a_TE) + tan(b_TE/2), 0, 0, −√(2 R_LE) ]
//! ```
//!
//! The two zeros pin the slope at both crests.

use nalgebra::SVector;

use crate::domain::{ParsecParams, SYSTEM_SIZE};
use crate::parsec::{ParsecError, ParsecResult};

/// The assembled 12-element right-hand side.
pub type BoundaryVector = SVector<f64, SYSTEM_SIZE>;

/// `|cos θ|` below which `tan θ` is treated as undefined.
const TAN_POLE_EPS: f64 = 1e-12;

/// Build the boundary vector from the physical parameters.
pub fn boundary_vector(params: &ParsecParams) -> ParsecResult<BoundaryVector> {
    if !(params.r_le.is_finite() && params.r_le >= 0.0) {
        return Err(ParsecError::invalid(
            "r-le",
            params.r_le,
            "leading-edge radius must be finite and >= 0",
        ));
    }
    let nose = (2.0 * params.r_le).sqrt();
    let tan_a = tan_degrees("a-te", params.a_te, params.a_te)?;
    let tan_half_b = tan_degrees("b-te", params.b_te, params.b_te / 2.0)?;

    Ok(BoundaryVector::from([
        nose,
        params.yu,
        params.d2yu,
        params.yl,
        params.d2yl,
        params.delta_y_te,
        params.y_te,
        tan_a - tan_half_b,
        tan_a + tan_half_b,
        0.0,
        0.0,
        -nose,
    ]))
}

/// `tan` of an angle in degrees, rejecting angles at a pole.
fn tan_degrees(name: &'static str, reported: f64, degrees: f64) -> ParsecResult<f64> {
    if !degrees.is_finite() {
        return Err(ParsecError::invalid(name, reported, "angle must be finite"));
    }
    let rad = degrees.to_radians();
    if rad.cos().abs() < TAN_POLE_EPS {
        return Err(ParsecError::invalid(
            name,
            reported,
            "trailing-edge tangent is undefined at this angle",
        ));
    }
    Ok(rad.tan())
}
