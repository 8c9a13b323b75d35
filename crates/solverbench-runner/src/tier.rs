//! Difficulty tiers.

use std::fmt::{self, Display};

/// A named difficulty level defined by how many cells are emptied.
///
/// # Examples
///
/// ```
/// use solverbench_runner::DifficultyTier;
///
/// let tier = DifficultyTier::new("Easy", 35);
/// assert_eq!(tier.name(), "Easy");
/// assert_eq!(tier.removed_cells(), 35);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DifficultyTier {
    name: String,
    removed_cells: usize,
}

impl DifficultyTier {
    /// Creates a tier.
    #[must_use]
    pub fn new(name: impl Into<String>, removed_cells: usize) -> Self {
        Self {
            name: name.into(),
            removed_cells,
        }
    }

    /// Returns the tier name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of cells emptied in synthetic puzzles of this tier.
    #[must_use]
    pub fn removed_cells(&self) -> usize {
        self.removed_cells
    }
}

impl Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} removals)", self.name, self.removed_cells)
    }
}
