//! Random exploration of the airfoil design space.
//!
//! Each design fixes the four genes the optimiser searches over (lower crest
//! curvature, trailing-edge ordinate, trailing-edge direction, angle of
//! attack) on top of a base parameter set. Designs are drawn sequentially from
//! a seeded RNG so a seed always reproduces the same list, then solved in
//! parallel. A design that fails to solve is recorded, not fatal.

use std::fs::File;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::ParsecParams;
use crate::error::{AppError, EXIT_INPUT};
use crate::parsec::generate_airfoil;
use crate::report::{OutlineStats, outline_stats};

pub const D2YL_RANGE: RangeInclusive<f64> = -0.4..=0.4;
pub const Y_TE_RANGE: RangeInclusive<f64> = -0.15..=0.1;
pub const A_TE_RANGE: RangeInclusive<f64> = -18.5..=7.5;
pub const AOA_RANGE: RangeInclusive<f64> = -3.0..=9.0;

/// Multiplicative Gaussian perturbation `gene · (1 + N(0, sigma))`,
/// applied to each gene independently with probability `chance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub chance: f64,
    pub sigma: f64,
}

impl Default for Mutation {
    fn default() -> Self {
        Self {
            chance: 0.2,
            sigma: 0.25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    pub granularity: usize,
    pub base: ParsecParams,
    pub mutation: Option<Mutation>,
}

/// One drawn design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Design {
    pub index: usize,
    pub params: ParsecParams,
    pub aoa: f64,
}

/// A design and what solving it produced.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    pub design: Design,
    pub result: Result<OutlineStats, String>,
}

/// Draw `config.count` designs.
pub fn draw_designs(config: &SampleConfig) -> Result<Vec<Design>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(EXIT_INPUT, "Sample count must be > 0."));
    }
    let normal = match config.mutation {
        Some(m) => {
            if !(0.0..=1.0).contains(&m.chance) {
                return Err(AppError::new(
                    EXIT_INPUT,
                    format!("Mutation chance must be in [0, 1], got {}", m.chance),
                ));
            }
            let normal = Normal::new(0.0, m.sigma).map_err(|e| {
                AppError::new(EXIT_INPUT, format!("Invalid mutation sigma {}: {e}", m.sigma))
            })?;
            Some((m.chance, normal))
        }
        None => None,
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut designs = Vec::with_capacity(config.count);
    for index in 0..config.count {
        let mut genes = [
            rng.gen_range(AOA_RANGE),
            rng.gen_range(D2YL_RANGE),
            rng.gen_range(Y_TE_RANGE),
            rng.gen_range(A_TE_RANGE),
        ];
        if let Some((chance, normal)) = &normal {
            for gene in &mut genes {
                if rng.gen_bool(*chance) {
                    *gene *= 1.0 + normal.sample(&mut rng);
                }
            }
        }
        let [aoa, d2yl, y_te, a_te] = genes;
        designs.push(Design {
            index,
            params: ParsecParams {
                d2yl,
                y_te,
                a_te,
                ..config.base
            },
            aoa,
        });
    }
    Ok(designs)
}

/// Solve every design in parallel. Output order matches `designs`.
pub fn evaluate_designs(designs: &[Design], granularity: usize) -> Vec<DesignOutcome> {
    designs
        .par_iter()
        .map(|design| {
            let result = generate_airfoil(&design.params, granularity)
                .map_err(|e| e.to_string())
                .and_then(|solution| {
                    outline_stats(&solution.outline).ok_or_else(|| "empty outline".to_string())
                });
            if let Err(err) = &result {
                warn!(index = design.index, error = %err, "design failed");
            }
            DesignOutcome {
                design: *design,
                result,
            }
        })
        .collect()
}

/// Draw and solve a full sample.
pub fn run_sample(config: &SampleConfig) -> Result<Vec<DesignOutcome>, AppError> {
    let designs = draw_designs(config)?;
    let outcomes = evaluate_designs(&designs, config.granularity);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(count = outcomes.len(), failed, seed = config.seed, "sample evaluated");
    Ok(outcomes)
}

#[derive(Debug, Serialize)]
struct SampleRow<'a> {
    index: usize,
    aoa: f64,
    d2yl: f64,
    y_te: f64,
    a_te: f64,
    status: &'a str,
    max_thickness: Option<f64>,
    max_thickness_x: Option<f64>,
    max_camber: Option<f64>,
    max_camber_x: Option<f64>,
    trailing_edge_gap: Option<f64>,
    error: Option<&'a str>,
}

impl<'a> From<&'a DesignOutcome> for SampleRow<'a> {
    fn from(outcome: &'a DesignOutcome) -> Self {
        let d = &outcome.design;
        let stats = outcome.result.as_ref().ok();
        Self {
            index: d.index,
            aoa: d.aoa,
            d2yl: d.params.d2yl,
            y_te: d.params.y_te,
            a_te: d.params.a_te,
            status: if stats.is_some() { "ok" } else { "failed" },
            max_thickness: stats.map(|s| s.max_thickness),
            max_thickness_x: stats.map(|s| s.max_thickness_x),
            max_camber: stats.map(|s| s.max_camber),
            max_camber_x: stats.map(|s| s.max_camber_x),
            trailing_edge_gap: stats.map(|s| s.trailing_edge_gap),
            error: outcome.result.as_ref().err().map(String::as_str),
        }
    }
}

/// Write one CSV row (with header) per outcome.
pub fn write_sample_csv(path: &Path, outcomes: &[DesignOutcome]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create sample CSV '{}': {e}", path.display()),
        )
    })?;
    let mut wtr = csv::Writer::from_writer(file);
    for outcome in outcomes {
        wtr.serialize(SampleRow::from(outcome))
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write sample row: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush sample CSV: {e}")))?;
    Ok(())
}

/// One-line-per-design terminal summary.
pub fn format_sample_summary(outcomes: &[DesignOutcome]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>7} {:>8} {:>8} {:>8} {:>10} {:>8}\n",
        "#", "aoa", "d2Yl", "y_TE", "a_TE", "t_max", "x(t)"
    ));
    for o in outcomes {
        let d = &o.design;
        let tail = match &o.result {
            Ok(s) => format!("{:>10.5} {:>8.4}", s.max_thickness, s.max_thickness_x),
            Err(e) => format!("  failed: {e}"),
        };
        out.push_str(&format!(
            "{:>5} {:>7.3} {:>8.4} {:>8.4} {:>8.3} {tail}\n",
            d.index, d.aoa, d.params.d2yl, d.params.y_te, d.params.a_te
        ));
    }
    let ok = outcomes.iter().filter(|o| o.result.is_ok()).count();
    out.push_str(&format!("\n{ok}/{} designs solved\n", outcomes.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64, mutation: Option<Mutation>) -> SampleConfig {
        SampleConfig {
            count: 64,
            seed,
            granularity: 41,
            base: ParsecParams::default(),
            mutation,
        }
    }

    #[test]
    fn designs_stay_inside_the_design_space() {
        let designs = draw_designs(&config(11, None)).unwrap();
        assert_eq!(designs.len(), 64);
        for d in &designs {
            assert!(AOA_RANGE.contains(&d.aoa));
            assert!(D2YL_RANGE.contains(&d.params.d2yl));
            assert!(Y_TE_RANGE.contains(&d.params.y_te));
            assert!(A_TE_RANGE.contains(&d.params.a_te));
            assert_eq!(d.params.xu, ParsecParams::default().xu);
        }
    }

    #[test]
    fn same_seed_same_designs() {
        let a = draw_designs(&config(3, Some(Mutation::default()))).unwrap();
        let b = draw_designs(&config(3, Some(Mutation::default()))).unwrap();
        assert_eq!(a, b);
        let c = draw_designs(&config(4, Some(Mutation::default()))).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn zero_sigma_mutation_changes_nothing() {
        let m = Mutation {
            chance: 1.0,
            sigma: 0.0,
        };
        let designs = draw_designs(&config(5, Some(m))).unwrap();
        for d in &designs {
            assert!(AOA_RANGE.contains(&d.aoa));
            assert!(D2YL_RANGE.contains(&d.params.d2yl));
        }
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut c = config(1, None);
        c.count = 0;
        assert!(draw_designs(&c).is_err());

        let bad = Mutation {
            chance: 1.5,
            sigma: 0.1,
        };
        assert!(draw_designs(&config(1, Some(bad))).is_err());
    }

    #[test]
    fn failures_are_recorded_per_design() {
        let mut c = config(9, None);
        c.count = 4;
        let mut designs = draw_designs(&c).unwrap();
        designs[2].params.xu = 1.0;
        let outcomes = evaluate_designs(&designs, 41);
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[2].result.is_err());
        assert!(outcomes.iter().enumerate().all(|(i, o)| o.design.index == i));
        assert_eq!(outcomes.iter().filter(|o| o.result.is_ok()).count(), 3);
    }

    #[test]
    fn writes_summary_csv() {
        let mut c = config(2, None);
        c.count = 5;
        let outcomes = run_sample(&c).unwrap();
        let path = std::env::temp_dir().join(format!("parsec_sample_{}.csv", std::process::id()));
        write_sample_csv(&path, &outcomes).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("index,aoa,d2yl,y_te,a_te,status"));
        assert_eq!(lines.count(), 5);
        assert!(format_sample_summary(&outcomes).contains("designs solved"));
    }
}
