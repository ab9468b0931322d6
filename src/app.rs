//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads environment defaults
//! - dispatches to the solve, request, plot, and sample commands

use std::io::Read;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, PlotArgs, RequestArgs, SampleArgs, SolveArgs};
use crate::config::AppConfig;
use crate::domain::{ParsecParams, SolveConfig};
use crate::error::{AppError, EXIT_INPUT};
use crate::sample::{Mutation, SampleConfig};

pub mod pipeline;

/// Entry point for the `parsec` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_tracing(cli.verbose);
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Solve(args) => handle_solve(args, &config),
        Command::Request(args) => handle_request(args, &config),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args, &config),
    }
}

/// Structured logs go to stderr so stdout carries only reports.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn handle_solve(args: SolveArgs, app_config: &AppConfig) -> Result<(), AppError> {
    let config = solve_config_from_args(&args, app_config)?;
    let run = pipeline::run_solve(&config)?;

    println!("{}", crate::report::format_run_summary(&run.solution, config.aoa));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.solution.outline,
            config.aoa,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }
    if let Some(path) = &run.debug_bundle {
        println!("Debug bundle: {}", path.display());
    }
    Ok(())
}

fn handle_request(args: RequestArgs, app_config: &AppConfig) -> Result<(), AppError> {
    let body = read_payload(&args.payload)?;
    let mut config = app_config.clone();
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let result = crate::request::serve(&body, &config);
    let outcome = crate::request::into_outcome(&result);
    let text = serde_json::to_string_pretty(&outcome.body)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to encode response: {e}")))?;
    println!("{text}");

    result.map(|_| ()).map_err(AppError::from)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let saved = crate::io::read_outline_json(&args.outline)?;
    let aoa = args.aoa.unwrap_or(saved.aoa);
    let plot = crate::plot::render_ascii_plot(&saved.outline, aoa, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs, app_config: &AppConfig) -> Result<(), AppError> {
    let config = SampleConfig {
        count: args.count,
        seed: args.seed,
        granularity: args.granularity.unwrap_or(app_config.granularity),
        base: ParsecParams::default(),
        mutation: args.mutate.then_some(Mutation {
            chance: args.mutation_chance,
            sigma: args.mutation_sigma,
        }),
    };
    let outcomes = crate::sample::run_sample(&config)?;
    println!("{}", crate::sample::format_sample_summary(&outcomes));

    if let Some(path) = &args.export {
        crate::sample::write_sample_csv(path, &outcomes)?;
    }
    Ok(())
}

fn read_payload(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read payload from stdin: {e}")))?;
        return Ok(body);
    }
    std::fs::read_to_string(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to read payload '{}': {e}", path.display()),
        )
    })
}

/// Merge CLI flags over environment defaults.
pub fn solve_config_from_args(args: &SolveArgs, app_config: &AppConfig) -> Result<SolveConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Delimiter must be a single ASCII character, got '{}'", args.delimiter),
        ));
    }
    let chord_scale = args.chord_scale.unwrap_or(app_config.chord_scale);
    if !(chord_scale.is_finite() && chord_scale > 0.0) {
        return Err(AppError::new(
            EXIT_INPUT,
            format!("Chord scale must be finite and > 0, got {chord_scale}"),
        ));
    }

    Ok(SolveConfig {
        params: args.params.to_params(),
        granularity: args.granularity.unwrap_or(app_config.granularity),
        aoa: args.aoa,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        chord_scale,
        delimiter: args.delimiter as u8,
        export_outline_csv: args.export.clone(),
        export_outline_json: args.export_outline.clone(),
        export_svg: args.svg.clone(),
        debug: args.debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn solve_args(argv: &[&str]) -> SolveArgs {
        let mut full = vec!["parsec", "solve"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Solve(args) => args,
            other => panic!("expected solve, got {other:?}"),
        }
    }

    #[test]
    fn environment_fills_unset_flags() {
        let env = AppConfig {
            granularity: 77,
            chord_scale: 2.0,
            ..AppConfig::default()
        };
        let cfg = solve_config_from_args(&solve_args(&["--no-plot"]), &env).unwrap();
        assert_eq!(cfg.granularity, 77);
        assert_eq!(cfg.chord_scale, 2.0);
        assert!(!cfg.plot);
        assert_eq!(cfg.delimiter, b',');
    }

    #[test]
    fn flags_override_environment() {
        let cfg = solve_config_from_args(
            &solve_args(&["-n", "31", "--chord-scale", "1", "--delimiter", ";"]),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(cfg.granularity, 31);
        assert_eq!(cfg.chord_scale, 1.0);
        assert_eq!(cfg.delimiter, b';');
    }

    #[test]
    fn rejects_bad_delimiter_and_scale() {
        let env = AppConfig::default();
        assert!(solve_config_from_args(&solve_args(&["--delimiter", "é"]), &env).is_err());
        assert!(solve_config_from_args(&solve_args(&["--chord-scale", "0"]), &env).is_err());
    }
}
