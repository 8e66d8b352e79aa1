//! Command-line parsing for the measurement fitting toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::ExperimentKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "labfit", version, about = "Physics-Lab Measurement Fitting Toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit an experiment request JSON, print the result summary, and optionally export.
    Fit(FitArgs),
    /// Generate a seeded synthetic request and run it through the same pipeline.
    Demo(DemoArgs),
    /// Run several request files as background tasks and report each outcome.
    ///
    /// This exercises the same fire-and-forget task queue a serving front-end
    /// would use: submissions return immediately and the command polls each
    /// task until it reaches a terminal status.
    Batch(BatchArgs),
}

/// Options for fitting a request from disk.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Experiment request JSON file.
    #[arg(value_name = "JSON")]
    pub request: PathBuf,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Options for the synthetic-data demo.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Which experiment to synthesize.
    #[arg(short = 'e', long, value_enum)]
    pub experiment: ExperimentKind,

    /// Random seed for the measurement noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the generated request JSON (reusable with `labfit fit`).
    #[arg(long, value_name = "JSON")]
    pub save_request: Option<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Options for the batch task runner.
#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Experiment request JSON files, one background task each.
    #[arg(value_name = "JSON", required = true)]
    pub requests: Vec<PathBuf>,
}

/// Export flags shared by `fit` and `demo`.
#[derive(Debug, Parser, Clone, Default)]
pub struct ExportArgs {
    /// Export fitted curves (coefficients, R², derived quantities) to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full output (fits + renderer figures) to JSON.
    #[arg(long = "export-figures", value_name = "JSON")]
    pub export_figures: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_parses_request_path_and_exports() {
        let cli = Cli::try_parse_from([
            "labfit",
            "fit",
            "request.json",
            "--export",
            "fits.csv",
            "--export-figures",
            "figures.json",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit subcommand");
        };
        assert_eq!(args.request, PathBuf::from("request.json"));
        assert_eq!(args.export.export, Some(PathBuf::from("fits.csv")));
        assert_eq!(
            args.export.export_figures,
            Some(PathBuf::from("figures.json"))
        );
    }

    #[test]
    fn demo_accepts_kebab_case_experiment_names() {
        let cli = Cli::try_parse_from(["labfit", "demo", "-e", "franck-hertz"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo subcommand");
        };
        assert_eq!(args.experiment, ExperimentKind::FranckHertz);
        assert_eq!(args.seed, 42);
        assert!(args.save_request.is_none());
    }

    #[test]
    fn batch_requires_at_least_one_request() {
        assert!(Cli::try_parse_from(["labfit", "batch"]).is_err());
        let cli = Cli::try_parse_from(["labfit", "batch", "a.json", "b.json"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch subcommand");
        };
        assert_eq!(args.requests.len(), 2);
    }
}
