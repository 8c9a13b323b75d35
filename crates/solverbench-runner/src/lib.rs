//! Benchmark orchestration for external puzzle solver executables.
//!
//! This crate runs opaque solver binaries over a sweep of difficulty tiers,
//! solvers and concurrency levels, and reports which configuration is fastest.
//!
//! # Overview
//!
//! - [`SolverDescriptor`]: one executable, how it receives its puzzle
//!   ([`Invocation`]) and whether it honours a concurrency level ([`Concurrency`])
//! - [`ProcessInvoker`]: runs a solver as a child process under a timeout and
//!   turns its output into a [`TrialOutcome`]
//! - [`PuzzleSource`]: supplies trial puzzles, either freshly generated
//!   ([`SyntheticSource`]) or read from disk ([`DirectorySource`])
//! - [`BenchmarkMatrix`]: the sequential sweep, producing an [`AggregateTable`]
//! - [`report`]: means, winners and the printed table, written to a [`LogSink`]
//!
//! # Examples
//!
//! ```
//! use solverbench_core::{Grid, Order};
//! use solverbench_generator::PuzzleSeed;
//! use solverbench_runner::{
//!     BenchmarkMatrix, BenchmarkPlan, Concurrency, DifficultyTier, Invocation, MemorySink,
//!     SolverDescriptor, SolverRunner, SyntheticSource, TrialOutcome, report,
//! };
//!
//! // A stand-in for a real solver process.
//! struct Constant;
//!
//! impl SolverRunner for Constant {
//!     fn run(&mut self, _: &SolverDescriptor, _: &Grid, level: u32) -> TrialOutcome {
//!         TrialOutcome::Elapsed(10.0 / f64::from(level))
//!     }
//! }
//!
//! let plan = BenchmarkPlan {
//!     tiers: vec![DifficultyTier::new("Easy", 35)],
//!     solvers: vec![SolverDescriptor::new(
//!         "build/sudoku_omp",
//!         Invocation::Stdin,
//!         Concurrency::Threaded,
//!     )],
//!     concurrency_levels: vec![1, 2, 4],
//!     trials_per_tier: 2,
//! };
//! let mut source = SyntheticSource::new(Order::NINE, PuzzleSeed::random());
//! let mut sink = MemorySink::new();
//!
//! let table = BenchmarkMatrix::new(Constant).run(&plan, &mut source, &mut sink)?;
//! let summary = report::summarize(&table);
//! let winner = summary.tiers[0].winner.as_ref().unwrap();
//! assert_eq!(winner.concurrency, 4);
//! # Ok::<(), solverbench_runner::BenchError>(())
//! ```

pub use self::{
    invoker::{ProcessInvoker, SolverRunner},
    matrix::{
        AggregateCell, AggregateTable, BenchError, BenchmarkMatrix, BenchmarkPlan, FailureCounts,
        TierResults,
    },
    outcome::TrialOutcome,
    report::{Report, summarize},
    sink::{LogSink, MemorySink, TeeSink, run_banner},
    solver::{Concurrency, Invocation, Launcher, SolverDescriptor},
    source::{DirectorySource, PuzzleSource, SourceError, SyntheticSource},
    tier::DifficultyTier,
};

mod invoker;
mod matrix;
mod outcome;
pub mod report;
mod sink;
mod solver;
mod source;
mod tier;
