use std::fmt;

use crate::geom::Cell;

/// Which endpoint of the search a construction error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Errors that can occur when building a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A dimension was zero or negative.
    EmptyGrid { rows: i32, cols: i32 },
    /// The start or goal cell lies outside the grid.
    OutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        rows: i32,
        cols: i32,
    },
    /// The obstacle fraction was outside `[0, 1)` (or NaN).
    ObstacleFraction(f64),
    /// A text map line had a different width from the first line.
    RaggedMap {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A text map contained a character other than `.`, `#`, `S`, `G`, `*`.
    InvalidGlyph { glyph: char, cell: Cell },
    /// A text map had no start or no goal.
    MissingEndpoint(Endpoint),
    /// A text map marked more than one start or goal.
    DuplicateEndpoint(Endpoint),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must be at least 1×1, got {rows}×{cols}")
            }
            Self::OutOfBounds {
                endpoint,
                cell,
                rows,
                cols,
            } => write!(
                f,
                "{endpoint} cell {cell} is out of bounds for a {rows}×{cols} grid"
            ),
            Self::ObstacleFraction(pct) => {
                write!(f, "obstacle fraction must be in [0, 1), got {pct}")
            }
            Self::RaggedMap {
                line,
                expected,
                found,
            } => write!(
                f,
                "map line {line} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidGlyph { glyph, cell } => {
                write!(f, "map contains invalid glyph \u{201c}{glyph}\u{201d} at {cell}")
            }
            Self::MissingEndpoint(e) => write!(f, "map has no {e} cell"),
            Self::DuplicateEndpoint(e) => write!(f, "map has more than one {e} cell"),
        }
    }
}

impl std::error::Error for GridError {}
