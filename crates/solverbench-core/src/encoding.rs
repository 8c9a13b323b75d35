//! Wire encodings understood by solver executables.
//!
//! Two forms exist:
//!
//! - **Line form**: one row per line, values separated by single spaces. Solvers
//!   reading the puzzle from standard input expect this form.
//! - **Compact form**: one character per cell in row-major order. `0` marks an
//!   empty cell, `1`-`9` stand for themselves and `A`-`Z` stand for `10`-`35`.
//!   Solvers taking the puzzle as a process argument expect this form.
//!
//! # Examples
//!
//! ```
//! use solverbench_core::{Grid, Order, encoding};
//!
//! let mut grid = Grid::empty(Order::SIXTEEN);
//! grid.set(0, 1, 10);
//! grid.set(0, 2, 16);
//!
//! let compact = encoding::encode_compact(&grid)?;
//! assert!(compact.starts_with("0AG0"));
//! assert_eq!(encoding::decode_compact(Order::SIXTEEN, &compact)?, grid);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{Grid, GridError, Order, OrderError};

/// Largest side length the compact form can represent.
pub const COMPACT_MAX_SIDE: usize = 35;

/// Errors returned when encoding a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EncodeError {
    /// The grid is too large for the compact form.
    #[display("side {side} exceeds the compact form limit of {COMPACT_MAX_SIDE}")]
    CompactSideTooLarge {
        /// Side length of the rejected grid.
        side: usize,
    },
}

/// Errors returned when decoding a grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DecodeError {
    /// A token or character is not a valid cell value.
    #[display("invalid cell token {token:?}")]
    InvalidToken {
        /// The offending token.
        #[error(not(source))]
        token: String,
    },
    /// A row does not have as many values as the grid has rows.
    #[display("row {row} has {found} values, expected {expected}")]
    RowLength {
        /// Zero-based row number.
        row: usize,
        /// Number of values found in the row.
        found: usize,
        /// Number of values expected.
        expected: usize,
    },
    /// The number of rows does not describe a supported order.
    #[display("unsupported grid shape: {_0}")]
    Shape(OrderError),
    /// The decoded values do not form a valid grid.
    #[display("invalid grid: {_0}")]
    Grid(GridError),
}

/// Selects one of the two wire encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Space-separated values, one row per line.
    Lines,
    /// One character per cell.
    Compact,
}

impl Encoding {
    /// Encodes `grid` in this form.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::CompactSideTooLarge`] if the compact form is
    /// selected for a grid larger than [`COMPACT_MAX_SIDE`].
    pub fn encode(self, grid: &Grid) -> Result<String, EncodeError> {
        match self {
            Self::Lines => Ok(encode_lines(grid)),
            Self::Compact => encode_compact(grid),
        }
    }
}

/// Encodes a grid in line form.
#[must_use]
pub fn encode_lines(grid: &Grid) -> String {
    grid.to_string()
}

/// Decodes a grid in line form.
///
/// Blank lines are ignored. The order is inferred from the number of rows.
///
/// # Errors
///
/// Returns [`DecodeError`] if a token is not a number, a row has the wrong
/// length, or the row count is not a supported side length.
///
/// # Examples
///
/// ```
/// use solverbench_core::encoding;
///
/// let grid = encoding::decode_lines("1 0 3 4\n3 4 1 2\n\n2 1 4 3\n4 3 2 0\n")?;
/// assert_eq!(grid.side(), 4);
/// assert_eq!(grid.empty_count(), 2);
/// # Ok::<(), encoding::DecodeError>(())
/// ```
pub fn decode_lines(text: &str) -> Result<Grid, DecodeError> {
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split_whitespace()
                .map(|token| {
                    token.parse::<u8>().map_err(|_| DecodeError::InvalidToken {
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let order = Order::from_side(rows.len()).map_err(DecodeError::Shape)?;
    let side = order.side();
    let mut cells = Vec::with_capacity(order.cell_count());
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != side {
            return Err(DecodeError::RowLength {
                row,
                found: values.len(),
                expected: side,
            });
        }
        cells.extend(values);
    }
    Grid::from_cells(order, cells).map_err(DecodeError::Grid)
}

/// Encodes a grid in compact form.
///
/// # Errors
///
/// Returns [`EncodeError::CompactSideTooLarge`] if the grid side exceeds
/// [`COMPACT_MAX_SIDE`].
pub fn encode_compact(grid: &Grid) -> Result<String, EncodeError> {
    let side = grid.side();
    if side > COMPACT_MAX_SIDE {
        return Err(EncodeError::CompactSideTooLarge { side });
    }
    Ok(grid.cells().iter().map(|&value| compact_char(value)).collect())
}

/// Decodes a grid of the given order in compact form.
///
/// # Errors
///
/// Returns [`DecodeError`] if a character is not a valid cell value or the
/// string has the wrong length for `order`.
pub fn decode_compact(order: Order, text: &str) -> Result<Grid, DecodeError> {
    let cells = text
        .trim()
        .chars()
        .map(|ch| {
            compact_value(ch).ok_or_else(|| DecodeError::InvalidToken {
                token: ch.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Grid::from_cells(order, cells).map_err(DecodeError::Grid)
}

fn compact_char(value: u8) -> char {
    match value {
        0..=9 => char::from(b'0' + value),
        _ => char::from(b'A' + (value - 10)),
    }
}

fn compact_value(ch: char) -> Option<u8> {
    match ch {
        // Both arms are ASCII, so the narrowing casts are lossless.
        '0'..='9' => Some(ch as u8 - b'0'),
        'A'..='Z' => Some(ch as u8 - b'A' + 10),
        _ => None,
    }
}
