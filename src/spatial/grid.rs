//! Grid state management for tile assignment
//!
//! Each cell is either unfilled or holds the id of an assigned tile. The grid
//! keeps a running count of filled cells so completion checks are O(1).

use ndarray::Array2;
use std::ops::Range;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::TileId;

/// Grid coordinates as `[row, col]`
pub type Cell = [usize; 2];

/// Rectangular array of cell states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Option<TileId>>,
    filled: usize,
}

impl Grid {
    /// Create a fully unfilled grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), None),
            filled: 0,
        }
    }

    /// Create an unfilled grid after validating its dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn checked(rows: usize, cols: usize) -> Result<Self> {
        for (parameter, value) in [("height", rows), ("width", cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("Grid dimensions must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self::new(rows, cols))
    }

    /// Number of rows (grid height)
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns (grid width)
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells holding a tile
    pub const fn filled_count(&self) -> usize {
        self.filled
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.filled == self.cell_count()
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell[0] < self.rows() && cell[1] < self.cols()
    }

    /// Tile assigned to a cell, if any
    pub fn get(&self, cell: Cell) -> Option<TileId> {
        self.cells.get(cell).copied().flatten()
    }

    /// Whether a cell holds a tile
    pub fn is_filled(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Assign a tile to a cell, replacing any previous assignment
    pub fn fill(&mut self, cell: Cell, tile: TileId) {
        if let Some(slot) = self.cells.get_mut(cell) {
            if slot.is_none() {
                self.filled += 1;
            }
            *slot = Some(tile);
        }
    }

    /// Clear a cell, returning the tile it held
    pub fn unfill(&mut self, cell: Cell) -> Option<TileId> {
        let previous = self.cells.get_mut(cell).and_then(Option::take);
        if previous.is_some() {
            self.filled -= 1;
        }
        previous
    }

    /// Neighbour of a cell in one direction, if it lies inside the grid
    pub fn neighbour(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        direction.step(cell, self.rows(), self.cols())
    }

    /// In-bounds neighbours of a cell in clockwise order from the top
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = (Direction, Cell)> + use<> {
        let (rows, cols) = (self.rows(), self.cols());
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| direction.step(cell, rows, cols).map(|n| (direction, n)))
    }

    /// Whether at least one 4-adjacent cell holds a tile
    pub fn has_filled_neighbour(&self, cell: Cell) -> bool {
        self.neighbours(cell).any(|(_, n)| self.is_filled(n))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols();
        (0..self.cell_count()).map(move |index| [index / cols, index % cols])
    }

    /// Underlying cell states indexed by `[row, col]`
    pub const fn states(&self) -> &Array2<Option<TileId>> {
        &self.cells
    }

    /// Clamped row and column spans of the square of `radius` around `center`
    pub fn region_spans(&self, center: Cell, radius: usize) -> (Range<usize>, Range<usize>) {
        let row_start = center[0].saturating_sub(radius);
        let col_start = center[1].saturating_sub(radius);
        let row_end = center[0].saturating_add(radius).saturating_add(1).min(self.rows());
        let col_end = center[1].saturating_add(radius).saturating_add(1).min(self.cols());
        (row_start..row_end.max(row_start), col_start..col_end.max(col_start))
    }

    /// Unfill every cell in the square of `radius` around `center`
    ///
    /// Returns the cells that held a tile before clearing.
    pub fn clear_region(&mut self, center: Cell, radius: usize) -> Vec<Cell> {
        let (row_span, col_span) = self.region_spans(center, radius);
        let mut cleared = Vec::new();
        for row in row_span {
            for col in col_span.clone() {
                if self.unfill([row, col]).is_some() {
                    cleared.push([row, col]);
                }
            }
        }
        cleared
    }
}
