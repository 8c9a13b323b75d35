//! Descriptions of solver executables and how to invoke them.

use std::path::{Path, PathBuf};

use solverbench_core::encoding::Encoding;

const SERIAL_LEVELS: &[u32] = &[1];

/// How a solver executable receives its puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `<executable>` reading the line form from standard input.
    Stdin,
    /// `<executable> <side> <compact>`, optionally wrapped by a launcher.
    Argv {
        /// Outer launcher for multi-process solvers.
        launcher: Option<Launcher>,
    },
}

impl Invocation {
    /// Returns the wire encoding the solver expects.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        match self {
            Self::Stdin => Encoding::Lines,
            Self::Argv { .. } => Encoding::Compact,
        }
    }
}

/// An outer program that spawns the solver, such as a distributed-process launcher.
///
/// The solver command line is appended after the launcher's own arguments:
/// `<program> <args...> <executable> <side> <compact>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    program: PathBuf,
    args: Vec<String>,
}

impl Launcher {
    /// Creates a launcher running `program` with fixed leading arguments.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Creates an `mpirun -np <procs>` launcher.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_runner::Launcher;
    ///
    /// let launcher = Launcher::mpirun(4);
    /// assert_eq!(launcher.program().to_str(), Some("mpirun"));
    /// assert_eq!(launcher.args(), ["-np", "4"]);
    /// ```
    #[must_use]
    pub fn mpirun(procs: u32) -> Self {
        Self::new("mpirun", vec!["-np".to_owned(), procs.to_string()])
    }

    /// Returns the launcher program.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the arguments placed before the solver command line.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Whether a solver honours the requested concurrency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Concurrency {
    /// Single-threaded; always invoked with level 1.
    Serial,
    /// Runs with as many threads as the requested level.
    Threaded,
}

/// One solver executable under benchmark.
///
/// # Examples
///
/// ```
/// use solverbench_runner::{Concurrency, Invocation, SolverDescriptor};
///
/// let serial = SolverDescriptor::new("build/sudoku_serial", Invocation::Stdin, Concurrency::Serial);
/// let omp = SolverDescriptor::new("build/sudoku_omp", Invocation::Stdin, Concurrency::Threaded);
///
/// let sweep = [1, 2, 4];
/// assert_eq!(serial.name(), "sudoku_serial");
/// assert_eq!(serial.levels(&sweep), [1]);
/// assert_eq!(omp.levels(&sweep), [1, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverDescriptor {
    name: String,
    path: PathBuf,
    invocation: Invocation,
    concurrency: Concurrency,
}

impl SolverDescriptor {
    /// Creates a descriptor named after the executable's file name.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, invocation: Invocation, concurrency: Concurrency) -> Self {
        let path = path.into();
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self {
            name,
            path,
            invocation,
            concurrency,
        }
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the display name used in reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path to the executable.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the invocation convention.
    #[must_use]
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Returns the concurrency capability.
    #[must_use]
    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    /// Returns the concurrency levels this solver is run at for the given sweep.
    #[must_use]
    pub fn levels<'a>(&self, sweep: &'a [u32]) -> &'a [u32] {
        match self.concurrency {
            Concurrency::Serial => SERIAL_LEVELS,
            Concurrency::Threaded => sweep,
        }
    }
}
