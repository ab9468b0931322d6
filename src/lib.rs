//! `parsec-airfoil` library crate.
//!
//! The binary (`parsec`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the request handler can be mounted behind any transport
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod parsec;
pub mod plot;
pub mod report;
pub mod request;
pub mod sample;
