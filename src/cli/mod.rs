//! Command-line parsing for the PARSEC airfoil generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the geometry/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ParsecParams;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "parsec", version, about = "PARSEC airfoil generator")]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve one parameter set, print a summary, and optionally plot/export.
    Solve(SolveArgs),
    /// Handle a JSON request payload and write its SVG/CSV artifacts.
    Request(RequestArgs),
    /// Plot a previously exported outline JSON.
    Plot(PlotArgs),
    /// Sample random designs from the optimiser's design space.
    Sample(SampleArgs),
}

/// The shape parameters. Defaults are the reference section.
#[derive(Debug, Args, Clone)]
pub struct ParamArgs {
    /// Leading-edge radius.
    #[arg(long = "r-le", default_value_t = 0.04)]
    pub r_le: f64,

    /// Upper crest location (0 < xu < 1).
    #[arg(long, default_value_t = 0.3)]
    pub xu: f64,

    /// Upper crest ordinate.
    #[arg(long, default_value_t = 0.11)]
    pub yu: f64,

    /// Upper crest curvature.
    #[arg(long, default_value_t = -0.8)]
    pub d2yu: f64,

    /// Lower crest location (0 < xl < 1).
    #[arg(long, default_value_t = 0.3)]
    pub xl: f64,

    /// Lower crest ordinate.
    #[arg(long, default_value_t = -0.06)]
    pub yl: f64,

    /// Lower crest curvature.
    #[arg(long, default_value_t = 0.45)]
    pub d2yl: f64,

    /// Trailing-edge thickness.
    #[arg(long = "delta-y-te", default_value_t = 0.0)]
    pub delta_y_te: f64,

    /// Trailing-edge ordinate.
    #[arg(long = "y-te", default_value_t = 0.0)]
    pub y_te: f64,

    /// Trailing-edge direction angle (degrees).
    #[arg(long = "a-te", default_value_t = 10.0)]
    pub a_te: f64,

    /// Trailing-edge wedge angle (degrees).
    #[arg(long = "b-te", default_value_t = 10.0)]
    pub b_te: f64,
}

impl ParamArgs {
    pub fn to_params(&self) -> ParsecParams {
        ParsecParams {
            r_le: self.r_le,
            xu: self.xu,
            yu: self.yu,
            d2yu: self.d2yu,
            xl: self.xl,
            yl: self.yl,
            d2yl: self.d2yl,
            delta_y_te: self.delta_y_te,
            y_te: self.y_te,
            a_te: self.a_te,
            b_te: self.b_te,
        }
    }
}

/// Options for a single solve.
#[derive(Debug, Parser, Clone)]
#[command(allow_negative_numbers = true)]
pub struct SolveArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Number of chord stations (default: PARSEC_GRANULARITY or 201).
    #[arg(short = 'n', long)]
    pub granularity: Option<usize>,

    /// Angle of attack (degrees); rotates rendered charts clockwise.
    #[arg(long, default_value_t = 0.0)]
    pub aoa: f64,

    /// Coordinate multiplier for exports (default: PARSEC_CHORD_SCALE or 0.5).
    #[arg(long)]
    pub chord_scale: Option<f64>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the closed outline as delimited `x, y, z` rows.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Field delimiter for `--export`.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Export params, coefficients, and outline to JSON.
    #[arg(long = "export-outline")]
    pub export_outline: Option<PathBuf>,

    /// Render the section to an SVG chart.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Write a markdown debug bundle under `debug/`.
    #[arg(long)]
    pub debug: bool,
}

/// Options for handling a request payload.
#[derive(Debug, Parser)]
pub struct RequestArgs {
    /// JSON payload file, or `-` for stdin.
    #[arg(long, value_name = "JSON")]
    pub payload: PathBuf,

    /// Artifact directory (default: PARSEC_OUTPUT_DIR or `outputs`).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Options for plotting a saved outline.
#[derive(Debug, Parser)]
#[command(allow_negative_numbers = true)]
pub struct PlotArgs {
    /// Outline JSON file produced by `parsec solve --export-outline`.
    #[arg(long, value_name = "JSON")]
    pub outline: PathBuf,

    /// Override the saved angle of attack (degrees).
    #[arg(long)]
    pub aoa: Option<f64>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for design-space sampling.
#[derive(Debug, Parser)]
#[command(allow_negative_numbers = true)]
pub struct SampleArgs {
    /// Number of designs to draw.
    #[arg(short = 'n', long, default_value_t = 60)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Perturb each design with multiplicative Gaussian mutation.
    #[arg(long)]
    pub mutate: bool,

    /// Probability that a gene is mutated.
    #[arg(long, default_value_t = 0.2)]
    pub mutation_chance: f64,

    /// Standard deviation of the mutation factor.
    #[arg(long, default_value_t = 0.25)]
    pub mutation_sigma: f64,

    /// Number of chord stations per design.
    #[arg(long)]
    pub granularity: Option<usize>,

    /// Write a per-design CSV summary.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_reference_section() {
        let cli = Cli::parse_from(["parsec", "solve"]);
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.params.to_params(), ParsecParams::default());
        assert!(args.plot && !args.no_plot);
        assert_eq!(args.delimiter, ',');
    }

    #[test]
    fn negative_values_parse() {
        let cli = Cli::parse_from(["parsec", "-v", "solve", "--d2yu", "-0.5", "--a-te", "-12", "--aoa", "-2"]);
        assert!(cli.verbose);
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.params.d2yu, -0.5);
        assert_eq!(args.params.a_te, -12.0);
        assert_eq!(args.aoa, -2.0);
    }

    #[test]
    fn request_takes_a_payload() {
        let cli = Cli::parse_from(["parsec", "request", "--payload", "-"]);
        assert!(matches!(cli.command, Command::Request(RequestArgs { ref payload, .. }) if payload.as_os_str() == "-"));
    }
}
