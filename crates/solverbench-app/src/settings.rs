//! Run settings and their resolution against a suite preset.

use std::{path::PathBuf, time::Duration};

use solverbench_generator::PuzzleSeed;
use solverbench_runner::ProcessInvoker;

use crate::suite::{Suite, SuiteKind, SuiteSection};

/// Timeout used when reading puzzles from disk.
pub const REAL_TIMEOUT: Duration = Duration::from_secs(5);
/// Number of leading tiers (easy, medium, hard) read from disk.
pub const REAL_TIERS: usize = 3;
/// Result log written when reading puzzles from disk.
pub const REAL_OUTPUT: &str = "benchmark_real_results.txt";

/// User overrides on top of a suite preset.
///
/// `None` fields take the preset's value.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub suite: SuiteKind,
    pub solver_dir: Option<PathBuf>,
    pub concurrency_levels: Option<Vec<u32>>,
    pub trials: Option<usize>,
    pub timeout: Option<Duration>,
    pub output: Option<PathBuf>,
    pub seed: Option<PuzzleSeed>,
    pub problem_dir: Option<PathBuf>,
    pub env_var: String,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            suite: SuiteKind::Omp,
            solver_dir: None,
            concurrency_levels: None,
            trials: None,
            timeout: None,
            output: None,
            seed: None,
            problem_dir: None,
            env_var: ProcessInvoker::DEFAULT_ENV_VAR.to_owned(),
        }
    }
}

/// Where trial puzzles come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleMode {
    /// Generated from a run seed.
    Synthetic(PuzzleSeed),
    /// Read from `<dir>/<tier>/*.txt`.
    Directory(PathBuf),
}

/// A fully resolved run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub banner: String,
    pub sections: Vec<SuiteSection>,
    pub solver_dir: PathBuf,
    pub concurrency_levels: Vec<u32>,
    pub trials_per_tier: usize,
    pub timeout: Duration,
    pub output: PathBuf,
    pub env_var: String,
    pub mode: PuzzleMode,
}

impl RunSettings {
    /// Applies the overrides to the selected suite.
    ///
    /// Directory mode runs only the first section of the suite and its first
    /// three tiers, with its own default timeout and output file. Without
    /// `--seed`, a fresh seed is drawn.
    #[must_use]
    pub fn resolve(self) -> RunConfig {
        let Suite {
            banner,
            mut sections,
            concurrency_levels,
            trials_per_tier,
            timeout,
            output,
            solver_dir,
        } = self.suite.suite();

        let (banner, timeout, output, mode) = match self.problem_dir {
            Some(dir) => {
                sections.truncate(1);
                for section in &mut sections {
                    section.tiers.truncate(REAL_TIERS);
                }
                (
                    "Real Benchmark Run".to_owned(),
                    REAL_TIMEOUT,
                    PathBuf::from(REAL_OUTPUT),
                    PuzzleMode::Directory(dir),
                )
            }
            None => (
                banner.to_owned(),
                timeout,
                output,
                PuzzleMode::Synthetic(self.seed.unwrap_or_else(PuzzleSeed::random)),
            ),
        };

        RunConfig {
            banner,
            sections,
            solver_dir: self.solver_dir.unwrap_or(solver_dir),
            concurrency_levels: self.concurrency_levels.unwrap_or(concurrency_levels),
            trials_per_tier: self.trials.unwrap_or(trials_per_tier),
            timeout: self.timeout.unwrap_or(timeout),
            output: self.output.unwrap_or(output),
            env_var: self.env_var,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use solverbench_runner::DifficultyTier;

    use super::*;

    #[test]
    fn test_defaults_follow_preset() {
        let config = RunSettings::default().resolve();
        assert_eq!(config.banner, "Benchmark Run");
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.concurrency_levels, [1, 2, 4, 8, 12, 16, 24]);
        assert_eq!(config.trials_per_tier, 5);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.output, Path::new("benchmark_results.txt"));
        assert_eq!(config.solver_dir, Path::new("build"));
        assert_eq!(config.env_var, "OMP_NUM_THREADS");
        assert!(matches!(config.mode, PuzzleMode::Synthetic(_)));
    }

    #[test]
    fn test_overrides_win() {
        let seed = PuzzleSeed::from_bytes([7; 32]);
        let config = RunSettings {
            suite: SuiteKind::Parallel,
            solver_dir: Some("bin".into()),
            concurrency_levels: Some(vec![3]),
            trials: Some(1),
            timeout: Some(Duration::from_millis(250)),
            output: Some("out.txt".into()),
            seed: Some(seed),
            env_var: "SOLVER_THREADS".to_owned(),
            ..RunSettings::default()
        }
        .resolve();
        assert_eq!(config.banner, "Parallel Benchmark Run");
        assert_eq!(config.sections.len(), 3);
        assert_eq!(config.solver_dir, Path::new("bin"));
        assert_eq!(config.concurrency_levels, [3]);
        assert_eq!(config.trials_per_tier, 1);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.output, Path::new("out.txt"));
        assert_eq!(config.env_var, "SOLVER_THREADS");
        assert_eq!(config.mode, PuzzleMode::Synthetic(seed));
    }

    #[test]
    fn test_directory_mode() {
        let config = RunSettings {
            problem_dir: Some("problems".into()),
            ..RunSettings::default()
        }
        .resolve();
        assert_eq!(config.banner, "Real Benchmark Run");
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].title(), "9x9");
        let tiers = config.sections[0]
            .tiers
            .iter()
            .map(DifficultyTier::name)
            .collect::<Vec<_>>();
        assert_eq!(tiers, ["Easy", "Medium", "Hard"]);
        assert_eq!(config.timeout, REAL_TIMEOUT);
        assert_eq!(config.output, Path::new(REAL_OUTPUT));
        assert_eq!(config.mode, PuzzleMode::Directory("problems".into()));
    }
}
