//! Puzzle order (box size and side length).

use std::fmt::{self, Display};

/// Errors returned when constructing an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OrderError {
    /// The box size is outside the supported range.
    #[display("box size {base} is outside the supported range {min}..={max}")]
    BaseOutOfRange {
        /// The rejected box size.
        base: usize,
        /// Smallest supported box size.
        min: usize,
        /// Largest supported box size.
        max: usize,
    },
    /// The side length is not the square of a supported box size.
    #[display("side {side} is not the square of a supported box size")]
    SideNotSquare {
        /// The rejected side length.
        side: usize,
    },
}

/// The order of a number-place puzzle.
///
/// A puzzle of box size `base` has `side = base²` rows, columns and boxes, and
/// its cells hold values in `1..=side`. The classic 9x9 puzzle has `base = 3`.
///
/// # Examples
///
/// ```
/// use solverbench_core::Order;
///
/// let order = Order::new(4)?;
/// assert_eq!(order.side(), 16);
/// assert_eq!(order.cell_count(), 256);
/// assert_eq!(order.to_string(), "16x16");
/// # Ok::<(), solverbench_core::OrderError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order {
    base: usize,
}

impl Order {
    /// Smallest supported box size.
    pub const MIN_BASE: usize = 2;
    /// Largest supported box size. Cell values of larger orders would not fit in a `u8`.
    pub const MAX_BASE: usize = 15;

    /// The classic 9x9 order.
    pub const NINE: Self = Self { base: 3 };
    /// The 16x16 order.
    pub const SIXTEEN: Self = Self { base: 4 };
    /// The 25x25 order.
    pub const TWENTY_FIVE: Self = Self { base: 5 };

    /// Creates an order from its box size.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::BaseOutOfRange`] if `base` is not in
    /// [`MIN_BASE`](Self::MIN_BASE)`..=`[`MAX_BASE`](Self::MAX_BASE).
    pub fn new(base: usize) -> Result<Self, OrderError> {
        if !(Self::MIN_BASE..=Self::MAX_BASE).contains(&base) {
            return Err(OrderError::BaseOutOfRange {
                base,
                min: Self::MIN_BASE,
                max: Self::MAX_BASE,
            });
        }
        Ok(Self { base })
    }

    /// Creates an order from its side length.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::SideNotSquare`] if `side` is not `base²` for a
    /// supported box size.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_core::Order;
    ///
    /// assert_eq!(Order::from_side(9), Ok(Order::NINE));
    /// assert!(Order::from_side(10).is_err());
    /// ```
    pub fn from_side(side: usize) -> Result<Self, OrderError> {
        (Self::MIN_BASE..=Self::MAX_BASE)
            .find(|base| base * base == side)
            .map(|base| Self { base })
            .ok_or(OrderError::SideNotSquare { side })
    }

    /// Returns the box size.
    #[must_use]
    pub const fn base(self) -> usize {
        self.base
    }

    /// Returns the number of rows (and columns, and boxes).
    #[must_use]
    pub const fn side(self) -> usize {
        self.base * self.base
    }

    /// Returns the largest cell value, which equals the side length.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn max_value(self) -> u8 {
        // `MAX_BASE²` fits in a `u8`.
        self.side() as u8
    }

    /// Returns the total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.side() * self.side()
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{side}x{side}", side = self.side())
    }
}
