//! Input/output helpers.
//!
//! - delimited outline export (`export`)
//! - outline JSON read/write (`outline`)

pub mod export;
pub mod outline;

pub use export::*;
pub use outline::*;
