//! Command-line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use solverbench_generator::PuzzleSeed;
use solverbench_runner::ProcessInvoker;

use crate::{settings::RunSettings, suite::SuiteKind};

/// Benchmark external sudoku solvers across difficulty tiers and thread counts.
#[derive(Debug, Parser)]
#[command(name = "solverbench", version)]
pub struct Args {
    /// Suite preset to run.
    #[arg(long, value_enum, default_value_t = SuiteKind::Omp)]
    pub suite: SuiteKind,

    /// Directory containing the solver executables.
    #[arg(long, value_name = "DIR")]
    pub solver_dir: Option<PathBuf>,

    /// Comma-separated concurrency levels for threaded solvers.
    #[arg(
        long,
        value_name = "N,..",
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: Option<Vec<u32>>,

    /// Trial puzzles per difficulty tier.
    #[arg(long, value_name = "N")]
    pub trials: Option<usize>,

    /// Per-invocation timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Result log file.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Hex run seed for reproducible puzzles.
    #[arg(long, value_name = "HEX")]
    pub seed: Option<PuzzleSeed>,

    /// Read puzzles from `<DIR>/<tier>/*.txt` instead of generating them.
    #[arg(long, value_name = "DIR")]
    pub problem_dir: Option<PathBuf>,

    /// Environment variable carrying the concurrency level.
    #[arg(long, value_name = "NAME", default_value = ProcessInvoker::DEFAULT_ENV_VAR)]
    pub env_var: String,
}

impl Args {
    /// Converts the arguments into run settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is negative or not finite.
    pub fn into_settings(self) -> Result<RunSettings, clap::Error> {
        let timeout = self
            .timeout
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|err| {
                    clap::Error::raw(
                        clap::error::ErrorKind::ValueValidation,
                        format!("invalid --timeout {secs}: {err}\n"),
                    )
                })
            })
            .transpose()?;
        Ok(RunSettings {
            suite: self.suite,
            solver_dir: self.solver_dir,
            concurrency_levels: self.threads,
            trials: self.trials,
            timeout,
            output: self.output,
            seed: self.seed,
            problem_dir: self.problem_dir,
            env_var: self.env_var,
        })
    }
}
