//! Reporting utilities: outline statistics and formatted terminal output.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::AirfoilOutline;

/// Geometric summary of a sampled section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlineStats {
    pub max_thickness: f64,
    pub max_thickness_x: f64,
    /// Signed mean-line ordinate with the largest magnitude.
    pub max_camber: f64,
    pub max_camber_x: f64,
    pub upper_crest: f64,
    pub upper_crest_x: f64,
    pub lower_crest: f64,
    pub lower_crest_x: f64,
    /// `upper − lower` at the last station.
    pub trailing_edge_gap: f64,
    pub leading_edge_pinned: bool,
}

/// Compute the summary statistics of an outline. `None` if it is empty.
pub fn outline_stats(outline: &AirfoilOutline) -> Option<OutlineStats> {
    if outline.is_empty() {
        return None;
    }

    let mut stats = OutlineStats {
        max_thickness: f64::NEG_INFINITY,
        max_thickness_x: 0.0,
        max_camber: 0.0,
        max_camber_x: 0.0,
        upper_crest: f64::NEG_INFINITY,
        upper_crest_x: 0.0,
        lower_crest: f64::INFINITY,
        lower_crest_x: 0.0,
        trailing_edge_gap: 0.0,
        leading_edge_pinned: outline.upper[0] == 0.0 && outline.lower[0] == 0.0,
    };

    for ((&x, &yu), &yl) in outline.stations.iter().zip(&outline.upper).zip(&outline.lower) {
        let thickness = yu - yl;
        if thickness > stats.max_thickness {
            stats.max_thickness = thickness;
            stats.max_thickness_x = x;
        }
        let camber = 0.5 * (yu + yl);
        if camber.abs() > stats.max_camber.abs() {
            stats.max_camber = camber;
            stats.max_camber_x = x;
        }
        if yu > stats.upper_crest {
            stats.upper_crest = yu;
            stats.upper_crest_x = x;
        }
        if yl < stats.lower_crest {
            stats.lower_crest = yl;
            stats.lower_crest_x = x;
        }
    }

    let last = outline.len() - 1;
    stats.trailing_edge_gap = outline.upper[last] - outline.lower[last];
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_symmetric_section() {
        let outline = AirfoilOutline {
            stations: vec![0.0, 0.25, 0.5, 1.0],
            upper: vec![0.0, 0.06, 0.04, 0.0],
            lower: vec![0.0, -0.06, -0.04, 0.0],
        };
        let s = outline_stats(&outline).unwrap();
        assert!((s.max_thickness - 0.12).abs() < 1e-12);
        assert_eq!(s.max_thickness_x, 0.25);
        assert_eq!(s.max_camber, 0.0);
        assert_eq!(s.upper_crest_x, 0.25);
        assert_eq!(s.lower_crest_x, 0.25);
        assert_eq!(s.trailing_edge_gap, 0.0);
        assert!(s.leading_edge_pinned);
    }

    #[test]
    fn camber_keeps_its_sign() {
        let outline = AirfoilOutline {
            stations: vec![0.0, 0.5, 1.0],
            upper: vec![0.0, 0.02, 0.0],
            lower: vec![0.0, -0.08, 0.0],
        };
        let s = outline_stats(&outline).unwrap();
        assert!((s.max_camber + 0.03).abs() < 1e-12);
        assert_eq!(s.max_camber_x, 0.5);
    }

    #[test]
    fn empty_outline_has_no_stats() {
        let outline = AirfoilOutline {
            stations: vec![],
            upper: vec![],
            lower: vec![],
        };
        assert!(outline_stats(&outline).is_none());
    }
}
