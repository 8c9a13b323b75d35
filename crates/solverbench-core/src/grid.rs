//! Square puzzle grid of arbitrary order.

use std::{
    fmt::{self, Display},
    ops::Index,
};

use crate::Order;

/// Errors returned when building a [`Grid`] from raw cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The number of cells does not match the order.
    #[display("expected {expected} cells, found {found}")]
    CellCountMismatch {
        /// Number of cells required by the order.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
    /// A cell holds a value larger than the side length.
    #[display("cell {index} holds {value}, which exceeds side {side}")]
    ValueOutOfRange {
        /// Row-major index of the offending cell.
        index: usize,
        /// The offending value.
        value: u8,
        /// Side length of the grid.
        side: usize,
    },
}

/// A square grid of cell values in row-major order.
///
/// Each cell holds a value in `0..=side`, where `0` marks an empty cell.
///
/// # Examples
///
/// ```
/// use solverbench_core::{Grid, Order};
///
/// let mut grid = Grid::empty(Order::NINE);
/// grid.set(0, 4, 7);
/// assert_eq!(grid[(0, 4)], 7);
/// assert_eq!(grid.empty_count(), 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    order: Order,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates a grid with every cell empty.
    #[must_use]
    pub fn empty(order: Order) -> Self {
        Self {
            order,
            cells: vec![0; order.cell_count()],
        }
    }

    /// Creates a grid from row-major cell values.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the number of cells does not match `order`, or
    /// if any value exceeds the side length.
    pub fn from_cells(order: Order, cells: Vec<u8>) -> Result<Self, GridError> {
        if cells.len() != order.cell_count() {
            return Err(GridError::CellCountMismatch {
                expected: order.cell_count(),
                found: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > order.max_value())
        {
            return Err(GridError::ValueOutOfRange {
                index,
                value,
                side: order.side(),
            });
        }
        Ok(Self { order, cells })
    }

    /// Returns the order of the grid.
    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub fn side(&self) -> usize {
        self.order.side()
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns an iterator over the rows of the grid.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(self.side())
    }

    /// Sets the value of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid or `value` exceeds the side length.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        let side = self.side();
        assert!(
            usize::from(value) <= side,
            "Invalid cell value {value} for side {side}"
        );
        let index = self.index_of(row, col);
        self.cells[index] = value;
    }

    /// Empties the cell at the given row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    pub fn clear_at(&mut self, index: usize) {
        self.cells[index] = 0;
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Returns `true` if every row, column and box contains each value in
    /// `1..=side` exactly once.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_core::{Grid, Order};
    ///
    /// let grid = Grid::from_cells(Order::new(2)?, vec![
    ///     1, 2, 3, 4,
    ///     3, 4, 1, 2,
    ///     2, 1, 4, 3,
    ///     4, 3, 2, 1,
    /// ])?;
    /// assert!(grid.is_complete_solution());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn is_complete_solution(&self) -> bool {
        let side = self.side();
        let base = self.order.base();
        (0..side).all(|house| {
            let row = (0..side).map(|col| self[(house, col)]);
            let col = (0..side).map(|row| self[(row, house)]);
            let (box_row, box_col) = ((house / base) * base, (house % base) * base);
            let boxed = (0..side).map(|i| self[(box_row + i / base, box_col + i % base)]);
            is_permutation(side, row) && is_permutation(side, col) && is_permutation(side, boxed)
        })
    }

    /// Returns `true` if every non-empty cell of `self` holds the same value as
    /// the corresponding cell of `other`.
    #[must_use]
    pub fn agrees_with(&self, other: &Self) -> bool {
        self.order == other.order
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(&mine, &theirs)| mine == 0 || mine == theirs)
    }

    fn index_of(&self, row: usize, col: usize) -> usize {
        let side = self.side();
        assert!(
            row < side && col < side,
            "Position ({row}, {col}) is outside a grid of side {side}"
        );
        row * side + col
    }
}

fn is_permutation(side: usize, values: impl Iterator<Item = u8>) -> bool {
    let mut seen = vec![false; side + 1];
    for value in values {
        let value = usize::from(value);
        if value == 0 || value > side || seen[value] {
            return false;
        }
        seen[value] = true;
    }
    true
}

impl Index<(usize, usize)> for Grid {
    type Output = u8;

    fn index(&self, (row, col): (usize, usize)) -> &u8 {
        &self.cells[self.index_of(row, col)]
    }
}

/// Formats the grid in line form: space-separated values, one row per line.
impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order2() -> Order {
        Order::new(2).unwrap()
    }

    fn solved_4x4() -> Grid {
        Grid::from_cells(
            order2(),
            vec![1, 2, 3, 4, 3, 4, 1, 2, 2, 1, 4, 3, 4, 3, 2, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_from_cells_validates() {
        assert_eq!(
            Grid::from_cells(order2(), vec![0; 15]),
            Err(GridError::CellCountMismatch {
                expected: 16,
                found: 15
            })
        );
        let mut cells = vec![0; 16];
        cells[5] = 5;
        assert_eq!(
            Grid::from_cells(order2(), cells),
            Err(GridError::ValueOutOfRange {
                index: 5,
                value: 5,
                side: 4
            })
        );
    }

    #[test]
    fn test_complete_solution() {
        let grid = solved_4x4();
        assert!(grid.is_complete_solution());

        // Valid rows and columns but broken boxes.
        let latin = Grid::from_cells(
            order2(),
            vec![1, 2, 3, 4, 2, 3, 4, 1, 3, 4, 1, 2, 4, 1, 2, 3],
        )
        .unwrap();
        assert!(!latin.is_complete_solution());

        let mut holed = grid.clone();
        holed.clear_at(0);
        assert!(!holed.is_complete_solution());
    }

    #[test]
    fn test_agrees_with() {
        let solution = solved_4x4();
        let mut puzzle = solution.clone();
        puzzle.clear_at(3);
        puzzle.clear_at(10);
        assert!(puzzle.agrees_with(&solution));

        puzzle.set(0, 0, 2);
        assert!(!puzzle.agrees_with(&solution));
    }

    #[test]
    fn test_display_line_form() {
        let mut grid = solved_4x4();
        grid.clear_at(1);
        assert_eq!(grid.to_string(), "1 0 3 4\n3 4 1 2\n2 1 4 3\n4 3 2 1");
        assert_eq!(grid.empty_count(), 1);
    }

    #[test]
    #[should_panic(expected = "Invalid cell value 5 for side 4")]
    fn test_set_rejects_large_value() {
        Grid::empty(order2()).set(0, 0, 5);
    }
}
