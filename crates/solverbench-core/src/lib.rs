//! Core data structures for solverbench.
//!
//! This crate provides the puzzle representation shared by the generator and the
//! benchmark runner:
//!
//! - [`order`]: [`Order`], the box size and side length of a puzzle
//! - [`grid`]: [`Grid`], a square matrix of cell values where `0` means empty
//! - [`encoding`]: the line and compact wire forms solver executables read
//!
//! # Examples
//!
//! ```
//! use solverbench_core::{Grid, Order, encoding::Encoding};
//!
//! let mut grid = Grid::empty(Order::NINE);
//! grid.set(0, 0, 5);
//!
//! let lines = Encoding::Lines.encode(&grid)?;
//! assert!(lines.starts_with("5 0 0"));
//!
//! let compact = Encoding::Compact.encode(&grid)?;
//! assert_eq!(compact.len(), 81);
//! # Ok::<(), solverbench_core::encoding::EncodeError>(())
//! ```

pub mod encoding;
pub mod grid;
pub mod order;

pub use self::{
    grid::{Grid, GridError},
    order::{Order, OrderError},
};
