//! Geometry primitives: [`Cell`] coordinates and unit [`Direction`] steps.
//!
//! Rows grow downwards and columns grow to the right, so "up" is `row - 1`.

use std::fmt;
use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate `(row, col)`.
///
/// Ordering is row-major, which keeps sorted cell lists readable in test
/// failures. The derived `Hash` is the key used by every visited/frontier set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by `(dr, dc)`.
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The unit step that moves `self` towards `other` on both axes at once.
    ///
    /// Each component is the sign of the corresponding coordinate difference,
    /// so the result is [`Direction::NONE`] when the cells coincide.
    #[inline]
    pub fn direction_to(self, other: Cell) -> Direction {
        Direction::new(
            (other.row - self.row).signum(),
            (other.col - self.col).signum(),
        )
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;
    #[inline]
    fn add(self, d: Direction) -> Cell {
        self.shift(d.dr, d.dc)
    }
}

impl Sub<Direction> for Cell {
    type Output = Cell;
    #[inline]
    fn sub(self, d: Direction) -> Cell {
        self.shift(-d.dr, -d.dc)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// A unit step: each component is -1, 0 or 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub dr: i32,
    pub dc: i32,
}

impl Direction {
    pub const NONE: Self = Self::new(0, 0);
    pub const UP: Self = Self::new(-1, 0);
    pub const DOWN: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(0, -1);
    pub const RIGHT: Self = Self::new(0, 1);
    pub const UP_LEFT: Self = Self::new(-1, -1);
    pub const UP_RIGHT: Self = Self::new(-1, 1);
    pub const DOWN_LEFT: Self = Self::new(1, -1);
    pub const DOWN_RIGHT: Self = Self::new(1, 1);

    /// Cardinal steps in neighbour order: up, down, left, right.
    pub const CARDINALS: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Diagonal steps in neighbour order: NW, NE, SW, SE.
    pub const DIAGONALS: [Self; 4] = [
        Self::UP_LEFT,
        Self::UP_RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN_RIGHT,
    ];

    /// All eight steps, cardinals first.
    pub const ALL: [Self; 8] = [
        Self::UP,
        Self::DOWN,
        Self::LEFT,
        Self::RIGHT,
        Self::UP_LEFT,
        Self::UP_RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN_RIGHT,
    ];

    /// Create a direction from its components.
    #[inline]
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.dr == 0 && self.dc == 0
    }

    /// Whether both components are non-zero.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }

    /// The row-only component `(dr, 0)`.
    #[inline]
    pub const fn vertical(self) -> Self {
        Self::new(self.dr, 0)
    }

    /// The column-only component `(0, dc)`.
    #[inline]
    pub const fn horizontal(self) -> Self {
        Self::new(0, self.dc)
    }
}

impl Neg for Direction {
    type Output = Direction;
    #[inline]
    fn neg(self) -> Direction {
        Direction::new(-self.dr, -self.dc)
    }
}
