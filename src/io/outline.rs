//! Read/write outline JSON files.
//!
//! Outline JSON is the "portable" representation of a solved section:
//! - the shape parameters and display angle
//! - the solved coefficients
//! - the sampled stations and both surfaces, for quick re-plotting
//!
//! The schema is defined by `domain::OutlineFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{AirfoilSolution, OutlineFile};
use crate::error::{AppError, EXIT_INPUT};

/// Build the serializable record for a solution.
pub fn outline_file(solution: &AirfoilSolution, aoa: f64) -> OutlineFile {
    OutlineFile {
        tool: "parsec".to_string(),
        generated_at: Utc::now(),
        params: solution.params,
        aoa,
        coefficients: solution.coefficients,
        outline: solution.outline.clone(),
    }
}

/// Write an outline JSON file.
pub fn write_outline_json(path: &Path, solution: &AirfoilSolution, aoa: f64) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create outline JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, &outline_file(solution, aoa))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write outline JSON: {e}")))?;

    Ok(())
}

/// Read an outline JSON file.
pub fn read_outline_json(path: &Path) -> Result<OutlineFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to open outline JSON '{}': {e}", path.display()),
        )
    })?;
    let outline: OutlineFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid outline JSON: {e}")))?;

    let n = outline.outline.stations.len();
    if outline.outline.upper.len() != n || outline.outline.lower.len() != n {
        return Err(AppError::new(
            EXIT_INPUT,
            "Invalid outline JSON: stations and surfaces differ in length.",
        ));
    }
    Ok(outline)
}
