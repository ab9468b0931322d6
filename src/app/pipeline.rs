//! Shared "solve pipeline" logic used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! params -> boundary system -> coefficients -> outline -> exports
//!
//! The commands can then focus on presentation (printing).

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{AirfoilSolution, SolveConfig};
use crate::error::AppError;
use crate::parsec::generate_airfoil;
use crate::report::{OutlineStats, outline_stats};

/// Directory debug bundles are written to.
pub const DEBUG_DIR: &str = "debug";

/// All computed outputs of a single `parsec solve` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub solution: AirfoilSolution,
    pub stats: Option<OutlineStats>,
    pub debug_bundle: Option<PathBuf>,
}

/// Execute the solve and write every requested export.
pub fn run_solve(config: &SolveConfig) -> Result<RunOutput, AppError> {
    let solution = generate_airfoil(&config.params, config.granularity)?;
    let stats = outline_stats(&solution.outline);

    if let Some(path) = &config.export_outline_csv {
        crate::io::write_outline_csv(path, &solution.outline, config.chord_scale, config.delimiter)?;
        info!(path = %path.display(), "outline rows written");
    }
    if let Some(path) = &config.export_outline_json {
        crate::io::write_outline_json(path, &solution, config.aoa)?;
        info!(path = %path.display(), "outline JSON written");
    }
    if let Some(path) = &config.export_svg {
        crate::plot::render_svg(path, &solution.outline, config.aoa, config.chord_scale)?;
        info!(path = %path.display(), "SVG written");
    }

    let debug_bundle = if config.debug {
        let path = crate::debug::write_debug_bundle(Path::new(DEBUG_DIR), &solution, config.aoa)?;
        info!(path = %path.display(), "debug bundle written");
        Some(path)
    } else {
        None
    };

    Ok(RunOutput {
        solution,
        stats,
        debug_bundle,
    })
}
