//! Executing a resolved run.

use std::{io, path::PathBuf};

use solverbench_runner::{
    BenchError, BenchmarkMatrix, BenchmarkPlan, DirectorySource, LogSink, ProcessInvoker,
    PuzzleSource, Report, SyntheticSource, TeeSink, run_banner, summarize,
};

use crate::{
    settings::{PuzzleMode, RunConfig},
    version::build_version,
};

/// Errors that abort a run.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RunError {
    /// The result log could not be created.
    #[display("cannot create result log {}: {source}", path.display())]
    CreateLog { path: PathBuf, source: io::Error },
    /// The benchmark itself failed.
    #[display("{_0}")]
    Bench(BenchError),
}

impl From<BenchError> for RunError {
    fn from(err: BenchError) -> Self {
        Self::Bench(err)
    }
}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        Self::Bench(BenchError::Sink(err))
    }
}

/// Runs `config`, writing the result log to its output file.
///
/// # Errors
///
/// Returns [`RunError`] if the log cannot be written or the puzzles cannot be
/// produced.
pub fn run(config: &RunConfig) -> Result<Vec<Report>, RunError> {
    let mut sink = TeeSink::create(&config.output).map_err(|source| RunError::CreateLog {
        path: config.output.clone(),
        source,
    })?;
    let reports = run_with_sink(config, &mut sink)?;
    log::info!("results written to {}", config.output.display());
    Ok(reports)
}

/// Runs `config`, writing the result log to `sink`.
///
/// Returns one report per suite section.
///
/// # Errors
///
/// Returns [`RunError`] if `sink` cannot be written or the puzzles cannot be
/// produced.
pub fn run_with_sink(config: &RunConfig, sink: &mut dyn LogSink) -> Result<Vec<Report>, RunError> {
    sink.write_line(&run_banner(&config.banner))?;
    sink.write_line(&format!("solverbench {}", build_version()))?;
    match &config.mode {
        PuzzleMode::Synthetic(seed) => sink.write_line(&format!("Seed: {seed}"))?,
        PuzzleMode::Directory(dir) => {
            sink.write_line(&format!("Problems: {}", dir.display()))?;
        }
    }

    let mut matrix = BenchmarkMatrix::new(
        ProcessInvoker::new(config.timeout).with_env_var(config.env_var.as_str()),
    );
    let mut reports = Vec::with_capacity(config.sections.len());
    for section in &config.sections {
        let mut source: Box<dyn PuzzleSource> = match &config.mode {
            PuzzleMode::Synthetic(seed) => Box::new(SyntheticSource::new(section.order, *seed)),
            PuzzleMode::Directory(dir) => Box::new(DirectorySource::new(dir.clone())),
        };
        let plan = BenchmarkPlan {
            tiers: section.tiers.clone(),
            solvers: section.solvers(&config.solver_dir),
            concurrency_levels: config.concurrency_levels.clone(),
            trials_per_tier: config.trials_per_tier,
        };
        log::info!(
            "{} benchmark: {} solvers, {} tiers",
            section.title(),
            plan.solvers.len(),
            plan.tiers.len()
        );

        sink.write_line("")?;
        sink.write_line(&format!("=== {} Sudoku Benchmark ===", section.title()))?;
        let table = matrix.run(&plan, source.as_mut(), sink)?;
        let report = summarize(&table);
        report.write_to(sink)?;
        reports.push(report);
    }
    Ok(reports)
}
