//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages by value
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::math::basis::TERM_COUNT;

/// Number of unknowns in the boundary-condition system (six per surface).
pub const SYSTEM_SIZE: usize = 2 * TERM_COUNT;

/// Default number of chord stations.
pub const DEFAULT_GRANULARITY: usize = 201;

/// Which airfoil surface a coefficient or ordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Upper,
    Lower,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Upper, Surface::Lower];

    /// Offset of this surface's first coefficient in the coefficient vector.
    pub fn offset(self) -> usize {
        match self {
            Surface::Upper => 0,
            Surface::Lower => TERM_COUNT,
        }
    }

    /// Coefficient label (`a1`..`a6`, `b1`..`b6`) for display.
    pub fn coefficient_label(self, term: usize) -> String {
        let prefix = match self {
            Surface::Upper => 'a',
            Surface::Lower => 'b',
        };
        format!("{prefix}{}", term + 1)
    }
}

/// The nine PARSEC shape parameters plus the two crest locations.
///
/// Angles are in degrees. Ordinates and curvatures are in chord units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsecParams {
    /// Leading-edge radius.
    pub r_le: f64,
    /// Upper crest location.
    pub xu: f64,
    /// Upper crest ordinate.
    pub yu: f64,
    /// Upper crest curvature.
    pub d2yu: f64,
    /// Lower crest location.
    pub xl: f64,
    /// Lower crest ordinate.
    pub yl: f64,
    /// Lower crest curvature.
    pub d2yl: f64,
    /// Trailing-edge thickness.
    pub delta_y_te: f64,
    /// Trailing-edge ordinate.
    pub y_te: f64,
    /// Trailing-edge direction angle (degrees).
    pub a_te: f64,
    /// Trailing-edge wedge angle (degrees).
    pub b_te: f64,
}

impl Default for ParsecParams {
    /// The reference section the request handler has always been built around.
    fn default() -> Self {
        Self {
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
}

impl ParsecParams {
    /// `(name, value)` pairs in CLI order, used for validation and reports.
    pub fn named_values(&self) -> [(&'static str, f64); 11] {
        [
            ("r-le", self.r_le),
            ("xu", self.xu),
            ("yu", self.yu),
            ("d2yu", self.d2yu),
            ("xl", self.xl),
            ("yl", self.yl),
            ("d2yl", self.d2yl),
            ("delta-y-te", self.delta_y_te),
            ("y-te", self.y_te),
            ("a-te", self.a_te),
            ("b-te", self.b_te),
        ]
    }
}

/// Solved basis coefficients: `a1..a6` (upper) followed by `b1..b6` (lower).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    values: [f64; SYSTEM_SIZE],
}

impl Coefficients {
    pub fn new(values: [f64; SYSTEM_SIZE]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Coefficients of one surface, in ascending exponent order.
    pub fn surface(&self, surface: Surface) -> &[f64] {
        let start = surface.offset();
        &self.values[start..start + TERM_COUNT]
    }

    pub fn get(&self, surface: Surface, term: usize) -> f64 {
        self.values[surface.offset() + term]
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Sampled airfoil: chord stations and the ordinates of both surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilOutline {
    pub stations: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl AirfoilOutline {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn ordinates(&self, surface: Surface) -> &[f64] {
        match surface {
            Surface::Upper => &self.upper,
            Surface::Lower => &self.lower,
        }
    }

    /// `(x, y)` pairs of one surface.
    pub fn points(&self, surface: Surface) -> Vec<(f64, f64)> {
        self.stations
            .iter()
            .copied()
            .zip(self.ordinates(surface).iter().copied())
            .collect()
    }
}

/// Everything a single solve produces.
#[derive(Debug, Clone)]
pub struct AirfoilSolution {
    pub params: ParsecParams,
    pub coefficients: Coefficients,
    pub outline: AirfoilOutline,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, environment defaults, or a request payload.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub params: ParsecParams,
    pub granularity: usize,
    /// Display rotation (angle of attack, degrees) for rendered charts.
    pub aoa: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    /// Multiplier applied to exported/rendered coordinates.
    pub chord_scale: f64,
    pub delimiter: u8,

    pub export_outline_csv: Option<PathBuf>,
    pub export_outline_json: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,

    /// Write a markdown debug bundle alongside the run.
    pub debug: bool,
}

/// A saved outline file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub params: ParsecParams,
    pub aoa: f64,
    pub coefficients: Coefficients,
    pub outline: AirfoilOutline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_views_split_the_vector() {
        let mut values = [0.0; SYSTEM_SIZE];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f64;
        }
        let c = Coefficients::new(values);
        assert_eq!(c.surface(Surface::Upper), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(c.surface(Surface::Lower), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
        assert_eq!(c.get(Surface::Lower, 2), 8.0);
    }

    #[test]
    fn coefficient_labels() {
        assert_eq!(Surface::Upper.coefficient_label(0), "a1");
        assert_eq!(Surface::Lower.coefficient_label(5), "b6");
    }

    #[test]
    fn outline_points_pair_stations_with_ordinates() {
        let outline = AirfoilOutline {
            stations: vec![0.0, 1.0],
            upper: vec![0.0, 0.1],
            lower: vec![0.0, -0.1],
        };
        assert_eq!(outline.points(Surface::Lower), vec![(0.0, 0.0), (1.0, -0.1)]);
    }
}
