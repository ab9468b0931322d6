//! Environment-driven defaults.
//!
//! `.env` is loaded with `dotenvy` (missing file is fine); CLI flags override
//! whatever is read here.
//!
//! | Variable | Default | Meaning |
//! | - | - | - |
//! | `PARSEC_OUTPUT_DIR` | `outputs` | where request artifacts are written |
//! | `PARSEC_GRANULARITY` | `201` | default station count |
//! | `PARSEC_CHORD_SCALE` | `0.5` | coordinate multiplier for exported/rendered outlines |

use std::path::PathBuf;

use crate::domain::DEFAULT_GRANULARITY;
use crate::error::{AppError, EXIT_INPUT};

/// Legacy exports draw the section at half chord.
pub const DEFAULT_CHORD_SCALE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub granularity: usize,
    pub chord_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            granularity: DEFAULT_GRANULARITY,
            chord_scale: DEFAULT_CHORD_SCALE,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("PARSEC_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = lookup("PARSEC_GRANULARITY") {
            config.granularity = raw.trim().parse().map_err(|e| {
                AppError::new(EXIT_INPUT, format!("Invalid PARSEC_GRANULARITY '{raw}': {e}"))
            })?;
        }
        if let Some(raw) = lookup("PARSEC_CHORD_SCALE") {
            let scale: f64 = raw.trim().parse().map_err(|e| {
                AppError::new(EXIT_INPUT, format!("Invalid PARSEC_CHORD_SCALE '{raw}': {e}"))
            })?;
            if !(scale.is_finite() && scale > 0.0) {
                return Err(AppError::new(
                    EXIT_INPUT,
                    format!("PARSEC_CHORD_SCALE must be finite and > 0, got {scale}"),
                ));
            }
            config.chord_scale = scale;
        }

        Ok(config)
    }
}
