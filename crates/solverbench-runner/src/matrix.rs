//! The benchmark sweep and its aggregate table.

use std::{
    fmt::{self, Display},
    io,
};

use crate::{
    DifficultyTier, LogSink, PuzzleSource, SolverDescriptor, SolverRunner, SourceError,
    TrialOutcome,
};

/// Errors that abort a benchmark run.
///
/// Solver failures never end up here; they are recorded per cell.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BenchError {
    /// The puzzles of a tier could not be produced.
    #[display("{_0}")]
    Source(SourceError),
    /// The result log could not be written.
    #[display("cannot write result log: {_0}")]
    Sink(io::Error),
}

/// Everything a benchmark run sweeps over.
#[derive(Debug, Clone)]
pub struct BenchmarkPlan {
    /// Difficulty tiers, in report order.
    pub tiers: Vec<DifficultyTier>,
    /// Solvers, in report order.
    pub solvers: Vec<SolverDescriptor>,
    /// Concurrency levels swept for threaded solvers, in report order.
    pub concurrency_levels: Vec<u32>,
    /// Maximum number of trial puzzles per tier.
    pub trials_per_tier: usize,
}

/// Failure counts of one aggregate cell, by failure class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FailureCounts {
    /// Executable missing.
    pub not_found: usize,
    /// Killed on timeout.
    pub timed_out: usize,
    /// Output without a parsable elapsed time.
    pub unparsed: usize,
    /// Spawn, pipe or encoding faults.
    pub invocation_failed: usize,
}

impl FailureCounts {
    /// Returns the total number of failed trials.
    #[must_use]
    pub fn total(&self) -> usize {
        self.not_found + self.timed_out + self.unparsed + self.invocation_failed
    }
}

impl Display for FailureCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("not found", self.not_found),
            ("timed out", self.timed_out),
            ("unparsed", self.unparsed),
            ("failed", self.invocation_failed),
        ];
        let mut first = true;
        for (label, count) in parts.into_iter().filter(|&(_, count)| count > 0) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{label}: {count}")?;
            first = false;
        }
        Ok(())
    }
}

/// The statistics bucket of one (tier, solver, concurrency level) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCell {
    solver_index: usize,
    solver: String,
    concurrency: u32,
    samples: Vec<f64>,
    failures: FailureCounts,
}

impl AggregateCell {
    /// Creates an empty cell.
    #[must_use]
    pub fn new(solver_index: usize, solver: impl Into<String>, concurrency: u32) -> Self {
        Self {
            solver_index,
            solver: solver.into(),
            concurrency,
            samples: vec![],
            failures: FailureCounts::default(),
        }
    }

    /// Returns the position of the solver in the plan.
    #[must_use]
    pub fn solver_index(&self) -> usize {
        self.solver_index
    }

    /// Returns the solver's display name.
    #[must_use]
    pub fn solver(&self) -> &str {
        &self.solver
    }

    /// Returns the concurrency level.
    #[must_use]
    pub fn concurrency(&self) -> u32 {
        self.concurrency
    }

    /// Returns the successful times in milliseconds, in trial order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the failure counts.
    #[must_use]
    pub fn failures(&self) -> FailureCounts {
        self.failures
    }

    /// Records one outcome: successes become samples, failures are only counted.
    pub fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::Elapsed(ms) => self.samples.push(ms),
            TrialOutcome::NotFound => self.failures.not_found += 1,
            TrialOutcome::TimedOut => self.failures.timed_out += 1,
            TrialOutcome::UnparsedOutput => self.failures.unparsed += 1,
            TrialOutcome::InvocationFailed => self.failures.invocation_failed += 1,
        }
    }

    /// Returns the arithmetic mean of the samples, or `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_runner::{AggregateCell, TrialOutcome};
    ///
    /// let mut cell = AggregateCell::new(0, "sudoku_serial", 1);
    /// assert_eq!(cell.mean(), None);
    ///
    /// for ms in [10.0, 20.0, 30.0] {
    ///     cell.record(TrialOutcome::Elapsed(ms));
    /// }
    /// cell.record(TrialOutcome::TimedOut);
    /// assert_eq!(cell.mean(), Some(20.0));
    /// ```
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let len = self.samples.len() as f64;
        Some(self.samples.iter().sum::<f64>() / len)
    }
}

/// The cells of one tier, ordered by solver then concurrency level.
#[derive(Debug, Clone, PartialEq)]
pub struct TierResults {
    tier: DifficultyTier,
    trials: usize,
    cells: Vec<AggregateCell>,
}

impl TierResults {
    /// Creates empty results with one cell per solver and effective concurrency level.
    #[must_use]
    pub fn new(tier: DifficultyTier, solvers: &[SolverDescriptor], sweep: &[u32]) -> Self {
        let cells = solvers
            .iter()
            .enumerate()
            .flat_map(|(index, solver)| {
                solver
                    .levels(sweep)
                    .iter()
                    .map(move |&level| AggregateCell::new(index, solver.name(), level))
            })
            .collect();
        Self {
            tier,
            trials: 0,
            cells,
        }
    }

    /// Returns the tier.
    #[must_use]
    pub fn tier(&self) -> &DifficultyTier {
        &self.tier
    }

    /// Returns the number of trial puzzles run.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Returns all cells in iteration order.
    #[must_use]
    pub fn cells(&self) -> &[AggregateCell] {
        &self.cells
    }

    /// Returns all cells mutably, in iteration order.
    pub fn cells_mut(&mut self) -> &mut [AggregateCell] {
        &mut self.cells
    }

    /// Returns the cell of a solver (by display name) and concurrency level.
    #[must_use]
    pub fn cell(&self, solver: &str, concurrency: u32) -> Option<&AggregateCell> {
        self.cells
            .iter()
            .find(|cell| cell.solver == solver && cell.concurrency == concurrency)
    }
}

/// Aggregated results of a whole run, one entry per tier in plan order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    tiers: Vec<TierResults>,
}

impl AggregateTable {
    /// Creates a table from per-tier results.
    #[must_use]
    pub fn new(tiers: Vec<TierResults>) -> Self {
        Self { tiers }
    }

    /// Returns the per-tier results.
    #[must_use]
    pub fn tiers(&self) -> &[TierResults] {
        &self.tiers
    }

    /// Returns the results of the tier with the given name.
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&TierResults> {
        self.tiers.iter().find(|results| results.tier.name() == name)
    }
}

/// Drives every solver through every tier, trial and concurrency level.
///
/// The sweep is strictly sequential: one child process at a time, in the order
/// tier, trial, solver, concurrency level. Each trial puzzle is shared by all
/// solvers and levels of that trial.
#[derive(Debug)]
pub struct BenchmarkMatrix<R> {
    runner: R,
}

impl<R> BenchmarkMatrix<R>
where
    R: SolverRunner,
{
    /// Creates a matrix that runs solvers through `runner`.
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the runner.
    #[must_use]
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Runs the full sweep of `plan` on puzzles from `source`.
    ///
    /// Progress lines are written to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError`] if `source` cannot produce the puzzles of a tier or
    /// `sink` cannot be written. Solver failures are recorded, not returned.
    pub fn run(
        &mut self,
        plan: &BenchmarkPlan,
        source: &mut dyn PuzzleSource,
        sink: &mut dyn LogSink,
    ) -> Result<AggregateTable, BenchError> {
        let mut tiers = Vec::with_capacity(plan.tiers.len());
        for tier in &plan.tiers {
            let puzzles = source.puzzles(tier, plan.trials_per_tier)?;
            sink.write_line(&format!(
                "Running {} tests ({} trials)...",
                tier.name(),
                puzzles.len()
            ))?;

            let mut results =
                TierResults::new(tier.clone(), &plan.solvers, &plan.concurrency_levels);
            for (trial, puzzle) in puzzles.iter().enumerate() {
                for cell in &mut results.cells {
                    let solver = &plan.solvers[cell.solver_index];
                    let outcome = self.runner.run(solver, puzzle, cell.concurrency);
                    log::debug!(
                        "{} trial {trial}: {} at level {} -> {outcome}",
                        tier.name(),
                        solver.name(),
                        cell.concurrency
                    );
                    if outcome.is_timed_out() {
                        log::warn!(
                            "{} timed out on {} trial {trial} at level {}",
                            solver.name(),
                            tier.name(),
                            cell.concurrency
                        );
                    }
                    cell.record(outcome);
                }
                results.trials += 1;
            }
            tiers.push(results);
        }
        Ok(AggregateTable::new(tiers))
    }
}
