//! Built-in benchmark suites.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use solverbench_core::Order;
use solverbench_runner::{Concurrency, DifficultyTier, Invocation, Launcher, SolverDescriptor};

/// Process count used when wrapping multi-process solvers in `mpirun`.
pub const MPI_PROCS: u32 = 4;

/// Concurrency levels swept by default.
pub const DEFAULT_THREADS: [u32; 7] = [1, 2, 4, 8, 12, 16, 24];

/// Selects a built-in suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SuiteKind {
    /// Serial, OpenMP and SIMD solvers reading the puzzle from standard input.
    Omp,
    /// Generic algorithm solvers taking the puzzle as an argument.
    Generic,
    /// Parallel back-ends (CUDA, OpenMP, MPI, pthreads) taking the puzzle as an argument.
    Parallel,
}

/// How a suite's solver is built from its file name.
#[derive(Debug, Clone, Copy)]
struct SolverEntry {
    file: &'static str,
    name: Option<&'static str>,
    concurrency: Concurrency,
    mpi: bool,
}

const fn serial(file: &'static str) -> SolverEntry {
    SolverEntry {
        file,
        name: None,
        concurrency: Concurrency::Serial,
        mpi: false,
    }
}

const fn threaded(file: &'static str) -> SolverEntry {
    SolverEntry {
        file,
        name: None,
        concurrency: Concurrency::Threaded,
        mpi: false,
    }
}

const fn named(name: &'static str, entry: SolverEntry) -> SolverEntry {
    SolverEntry {
        name: Some(name),
        ..entry
    }
}

/// The tiers, solvers and order of one puzzle size within a suite.
#[derive(Debug, Clone)]
pub struct SuiteSection {
    /// Puzzle order.
    pub order: Order,
    /// Difficulty tiers.
    pub tiers: Vec<DifficultyTier>,
    entries: Vec<SolverEntry>,
    invocation: Invocation,
}

impl SuiteSection {
    /// Returns the section heading, e.g. `"9x9"`.
    #[must_use]
    pub fn title(&self) -> String {
        self.order.to_string()
    }

    /// Returns the solver descriptors, resolved against `solver_dir`.
    #[must_use]
    pub fn solvers(&self, solver_dir: &Path) -> Vec<SolverDescriptor> {
        self.entries
            .iter()
            .map(|entry| {
                let invocation = match (&self.invocation, entry.mpi) {
                    (Invocation::Argv { .. }, true) => Invocation::Argv {
                        launcher: Some(Launcher::mpirun(MPI_PROCS)),
                    },
                    (invocation, _) => invocation.clone(),
                };
                let solver =
                    SolverDescriptor::new(solver_dir.join(entry.file), invocation, entry.concurrency);
                match entry.name {
                    Some(name) => solver.with_name(name),
                    None => solver,
                }
            })
            .collect()
    }
}

/// A complete benchmark configuration.
#[derive(Debug, Clone)]
pub struct Suite {
    /// First words of the result log banner.
    pub banner: &'static str,
    /// Puzzle sizes, in run order.
    pub sections: Vec<SuiteSection>,
    /// Concurrency levels swept for threaded solvers.
    pub concurrency_levels: Vec<u32>,
    /// Trial puzzles per tier.
    pub trials_per_tier: usize,
    /// Time budget of each invocation.
    pub timeout: Duration,
    /// Result log path.
    pub output: PathBuf,
    /// Directory holding the solver executables.
    pub solver_dir: PathBuf,
}

/// Returns the standard tier table of an order.
///
/// 9x9, 16x16 and 25x25 have fixed tables; other orders empty roughly 40%, 50%,
/// 60% and 70% of their cells.
#[must_use]
pub fn standard_tiers(order: Order) -> Vec<DifficultyTier> {
    let counts = match order.side() {
        9 => [35, 45, 52, 58],
        16 => [100, 128, 150, 180],
        25 => [180, 250, 300, 350],
        _ => {
            let cells = order.cell_count();
            [cells * 4 / 10, cells / 2, cells * 6 / 10, cells * 7 / 10]
        }
    };
    ["Easy", "Medium", "Hard", "Expert"]
        .into_iter()
        .zip(counts)
        .map(|(name, removed)| DifficultyTier::new(name, removed))
        .collect()
}

impl SuiteKind {
    /// Builds the suite.
    #[must_use]
    pub fn suite(self) -> Suite {
        match self {
            Self::Omp => Suite {
                banner: "Benchmark Run",
                sections: vec![
                    stdin_section(
                        Order::NINE,
                        &["sudoku_serial", "sudoku_omp", "sudoku_simd", "sudoku_omp_simd"],
                    ),
                    stdin_section(
                        Order::SIXTEEN,
                        &[
                            "sudoku_serial_16",
                            "sudoku_omp_16",
                            "sudoku_simd_16",
                            "sudoku_omp_simd_16",
                        ],
                    ),
                ],
                concurrency_levels: DEFAULT_THREADS.to_vec(),
                trials_per_tier: 5,
                timeout: Duration::from_secs(10),
                output: PathBuf::from("benchmark_results.txt"),
                solver_dir: PathBuf::from("build"),
            },
            Self::Generic => {
                let entries = [
                    "generic_backtrack",
                    "generic_bitset",
                    "generic_csp",
                    "generic_pruning",
                    "generic_dlx",
                ]
                .map(serial);
                Suite {
                    banner: "Benchmark Run",
                    sections: [Order::NINE, Order::SIXTEEN, Order::TWENTY_FIVE]
                        .into_iter()
                        .map(|order| argv_section(order, &entries))
                        .collect(),
                    concurrency_levels: DEFAULT_THREADS.to_vec(),
                    trials_per_tier: 5,
                    timeout: Duration::from_secs(20),
                    output: PathBuf::from("benchmark_results.txt"),
                    solver_dir: PathBuf::from("build"),
                }
            }
            Self::Parallel => {
                let entries = [
                    named("CUDA", serial("sudoku_cuda")),
                    named("OMP", threaded("sudoku_omp")),
                    named(
                        "MPI",
                        SolverEntry {
                            mpi: true,
                            ..serial("sudoku_mpi")
                        },
                    ),
                    named("PTHREAD", threaded("sudoku_pthread")),
                ];
                Suite {
                    banner: "Parallel Benchmark Run",
                    sections: [Order::NINE, Order::SIXTEEN, Order::TWENTY_FIVE]
                        .into_iter()
                        .map(|order| argv_section(order, &entries))
                        .collect(),
                    concurrency_levels: vec![1, 2, 4, 8],
                    trials_per_tier: 3,
                    timeout: Duration::from_secs(20),
                    output: PathBuf::from("benchmark_parallel_results.txt"),
                    solver_dir: PathBuf::from("."),
                }
            }
        }
    }
}

/// OpenMP builds honour the concurrency level; serial and plain SIMD builds do not.
fn stdin_entry(file: &'static str) -> SolverEntry {
    if file.contains("omp") {
        threaded(file)
    } else {
        serial(file)
    }
}

fn stdin_section(order: Order, files: &[&'static str]) -> SuiteSection {
    SuiteSection {
        order,
        tiers: standard_tiers(order),
        entries: files.iter().copied().map(stdin_entry).collect(),
        invocation: Invocation::Stdin,
    }
}

fn argv_section(order: Order, entries: &[SolverEntry]) -> SuiteSection {
    SuiteSection {
        order,
        tiers: standard_tiers(order),
        entries: entries.to_vec(),
        invocation: Invocation::Argv { launcher: None },
    }
}
