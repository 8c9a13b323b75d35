//! Where trial puzzles come from.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use solverbench_core::{
    Grid, Order,
    encoding::{self, DecodeError},
};
use solverbench_generator::{GenerateError, PuzzleGenerator, PuzzleSeed};

use crate::DifficultyTier;

/// Errors that prevent a source from producing the puzzles of a tier.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SourceError {
    /// A synthetic puzzle could not be generated.
    #[display("cannot generate puzzle: {_0}")]
    Generate(#[from] GenerateError),
    /// A puzzle file or directory could not be read.
    #[display("cannot read {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A puzzle file is not a valid line-form grid.
    #[display("cannot decode {}: {source}", path.display())]
    Decode {
        /// The offending file.
        path: PathBuf,
        /// The underlying error.
        source: DecodeError,
    },
}

/// Supplies the puzzle instances of each trial.
///
/// Each returned puzzle is one trial: it is handed unchanged to every solver and
/// every concurrency level, so all configurations race on the same instance.
pub trait PuzzleSource {
    /// Returns at most `limit` puzzles for `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the puzzles cannot be produced.
    fn puzzles(&mut self, tier: &DifficultyTier, limit: usize) -> Result<Vec<Grid>, SourceError>;
}

/// Generates fresh random puzzles, exactly `limit` per tier.
///
/// Every trial's seed is derived from the run seed, the tier name and the trial
/// index, so the same run seed reproduces the whole benchmark input.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    generator: PuzzleGenerator,
    seed: PuzzleSeed,
}

impl SyntheticSource {
    /// Creates a source for puzzles of `order` derived from `seed`.
    #[must_use]
    pub fn new(order: Order, seed: PuzzleSeed) -> Self {
        Self {
            generator: PuzzleGenerator::new(order),
            seed,
        }
    }

    /// Returns the run seed.
    #[must_use]
    pub fn seed(&self) -> PuzzleSeed {
        self.seed
    }
}

impl PuzzleSource for SyntheticSource {
    fn puzzles(&mut self, tier: &DifficultyTier, limit: usize) -> Result<Vec<Grid>, SourceError> {
        (0..limit)
            .map(|trial| {
                let seed = self.seed.derive(tier.name(), trial as u64);
                let puzzle = self
                    .generator
                    .generate_with_seed(tier.removed_cells(), seed)?;
                Ok(puzzle.problem)
            })
            .collect()
    }
}

/// Reads puzzles from `<root>/<tier name in lowercase>/*.txt`.
///
/// Files are read in path order and decoded from line form. The tier's removal
/// count is not used. A missing tier directory yields no puzzles.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory holding the puzzles of `tier`.
    #[must_use]
    pub fn tier_dir(&self, tier: &DifficultyTier) -> PathBuf {
        self.root.join(tier.name().to_lowercase())
    }
}

impl PuzzleSource for DirectorySource {
    fn puzzles(&mut self, tier: &DifficultyTier, limit: usize) -> Result<Vec<Grid>, SourceError> {
        let dir = self.tier_dir(tier);
        if !dir.is_dir() {
            log::warn!("{}: no puzzle directory for tier {}", dir.display(), tier.name());
            return Ok(vec![]);
        }

        let mut files = fs::read_dir(&dir)
            .map_err(|source| SourceError::Io {
                path: dir.clone(),
                source,
            })?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SourceError::Io {
                path: dir.clone(),
                source,
            })?;
        files.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"));
        files.sort();

        files.iter().take(limit).map(|path| read_puzzle(path)).collect()
    }
}

fn read_puzzle(path: &Path) -> Result<Grid, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_owned(),
        source,
    })?;
    encoding::decode_lines(&text).map_err(|source| SourceError::Decode {
        path: path.to_owned(),
        source,
    })
}
