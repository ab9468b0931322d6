//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the PARSEC shape parameters (`ParsecParams`)
//! - solve outputs (`Coefficients`, `AirfoilOutline`, `AirfoilSolution`)
//! - run configuration and the saved outline schema (`SolveConfig`, `OutlineFile`)

pub mod types;

pub use types::*;
