//! Error types for the maze core.

use crate::cell::Coord;
use thiserror::Error;

/// Errors raised by grid construction and wall/player operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A grid needs at least one row and one column.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },

    /// Wall operation on two cells that do not share a side.
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent {
        /// First cell.
        a: Coord,
        /// Second cell.
        b: Coord,
    },

    /// Coordinate outside the live grid.
    #[error("cell {0} lies outside the grid")]
    OutOfBounds(Coord),
}
