//! Cardinal directions for 4-connected grid adjacency

use crate::spatial::grid::Cell;

/// One of the four sides of a square cell
///
/// Variants are listed clockwise starting at the top, which is the order
/// tile sockets are extracted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards row - 1
    Up,
    /// Towards column + 1
    Right,
    /// Towards row + 1
    Down,
    /// Towards column - 1
    Left,
}

impl Direction {
    /// All directions in clockwise socket order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Socket side index (0 = top, 1 = right, 2 = bottom, 3 = left)
    pub const fn side(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }

    /// The direction facing back across a shared edge
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Row and column delta to the neighbouring cell
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Neighbour of `cell` in this direction, if it lies inside a `rows` x `cols` grid
    pub const fn step(self, cell: Cell, rows: usize, cols: usize) -> Option<Cell> {
        let (d_row, d_col) = self.offset();
        let Some(row) = cell[0].checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = cell[1].checked_add_signed(d_col) else {
            return None;
        };
        if row < rows && col < cols {
            Some([row, col])
        } else {
            None
        }
    }
}
