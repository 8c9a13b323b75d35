//! Randomized puzzle generation for solver benchmarks.
//!
//! [`PuzzleGenerator`] builds a complete, valid grid of any supported order by
//! shuffling a canonical pattern, then empties a requested number of cells. The
//! result is not guaranteed to have a unique solution; it only guarantees that
//! the seed solution satisfies every row, column and box constraint.
//!
//! Generation is deterministic for a given [`PuzzleSeed`], which makes benchmark
//! runs reproducible.
//!
//! # Examples
//!
//! ```
//! use solverbench_core::Order;
//! use solverbench_generator::PuzzleGenerator;
//!
//! let generator = PuzzleGenerator::new(Order::NINE);
//! let puzzle = generator.generate(35)?;
//!
//! assert!(puzzle.solution.is_complete_solution());
//! assert_eq!(puzzle.problem.empty_count(), 35);
//! assert!(puzzle.problem.agrees_with(&puzzle.solution));
//! # Ok::<(), solverbench_generator::GenerateError>(())
//! ```

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;
use solverbench_core::{Grid, Order};

pub use self::seed::{PuzzleSeed, PuzzleSeedError};

mod seed;

/// Errors returned by [`PuzzleGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    /// More cells were requested to be removed than the grid has.
    #[display("cannot remove {requested} cells from a grid of {available}")]
    TooManyRemovals {
        /// Number of cells requested to be removed.
        requested: usize,
        /// Number of cells in the grid.
        available: usize,
    },
}

/// A generated puzzle together with its seed solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The puzzle handed to solvers, with removed cells set to `0`.
    pub problem: Grid,
    /// The complete grid the puzzle was carved from.
    pub solution: Grid,
    /// The seed that reproduces this puzzle.
    pub seed: PuzzleSeed,
}

/// Generates randomized puzzles of a fixed order.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleGenerator {
    order: Order,
}

impl PuzzleGenerator {
    /// Creates a generator for puzzles of the given order.
    #[must_use]
    pub const fn new(order: Order) -> Self {
        Self { order }
    }

    /// Returns the order of generated puzzles.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Generates a puzzle with `removed_cells` empty cells from a random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::TooManyRemovals`] if `removed_cells` exceeds the
    /// number of cells in the grid.
    pub fn generate(&self, removed_cells: usize) -> Result<GeneratedPuzzle, GenerateError> {
        self.generate_with_seed(removed_cells, PuzzleSeed::random())
    }

    /// Generates a puzzle with `removed_cells` empty cells from the given seed.
    ///
    /// The same order, removal count and seed always produce the same puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::TooManyRemovals`] if `removed_cells` exceeds the
    /// number of cells in the grid.
    pub fn generate_with_seed(
        &self,
        removed_cells: usize,
        seed: PuzzleSeed,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        let available = self.order.cell_count();
        if removed_cells > available {
            return Err(GenerateError::TooManyRemovals {
                requested: removed_cells,
                available,
            });
        }

        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        let solution = self.shuffled_solution(&mut rng);

        let mut problem = solution.clone();
        let mut positions = (0..available).collect::<Vec<_>>();
        positions.shuffle(&mut rng);
        for &index in &positions[..removed_cells] {
            problem.clear_at(index);
        }

        Ok(GeneratedPuzzle {
            problem,
            solution,
            seed,
        })
    }

    /// Builds a complete grid from the canonical pattern with rows, columns and
    /// values independently permuted.
    ///
    /// Band permutations, line permutations within a band and relabelling of
    /// values all preserve validity, so the result needs no checking.
    fn shuffled_solution(&self, rng: &mut Pcg64) -> Grid {
        let base = self.order.base();
        let side = self.order.side();

        let rows = shuffled_lines(base, rng);
        let cols = shuffled_lines(base, rng);
        let mut values = (1..=self.order.max_value()).collect::<Vec<_>>();
        values.shuffle(rng);

        let pattern = |r: usize, c: usize| (base * (r % base) + r / base + c) % side;

        let mut grid = Grid::empty(self.order);
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in cols.iter().enumerate() {
                grid.set(i, j, values[pattern(r, c)]);
            }
        }
        grid
    }
}

/// Returns all line indices with the bands shuffled and the lines within each
/// band shuffled independently.
fn shuffled_lines(base: usize, rng: &mut Pcg64) -> Vec<usize> {
    let mut bands = (0..base).collect::<Vec<_>>();
    bands.shuffle(rng);
    bands
        .into_iter()
        .flat_map(|band| {
            let mut offsets = (0..base).collect::<Vec<_>>();
            offsets.shuffle(&mut *rng);
            offsets.into_iter().map(move |offset| band * base + offset)
        })
        .collect()
}
