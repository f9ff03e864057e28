//! Results and statistics shared by every strategy

use ndarray::Array2;
use std::fmt;

use crate::spatial::{Cell, Grid, TileId};

/// A complete tiling: every cell holds a catalog tile id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    tiles: Array2<TileId>,
}

impl Solution {
    /// Extract a solution from a grid, or `None` if any cell is unfilled
    pub fn from_grid(grid: &Grid) -> Option<Self> {
        if !grid.is_complete() {
            return None;
        }
        let ids: Option<Vec<TileId>> = grid.states().iter().copied().collect();
        Array2::from_shape_vec((grid.rows(), grid.cols()), ids?)
            .ok()
            .map(|tiles| Self { tiles })
    }

    /// Number of rows (grid height)
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns (grid width)
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Tile assigned to a cell
    pub fn tile_at(&self, cell: Cell) -> Option<TileId> {
        self.tiles.get(cell).copied()
    }

    /// Tile ids indexed by `[row, col]`
    pub const fn tiles(&self) -> &Array2<TileId> {
        &self.tiles
    }

    /// Rebuild the filled grid this solution came from
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(self.rows(), self.cols());
        for ((row, col), &tile) in self.tiles.indexed_iter() {
            grid.fill([row, col], tile);
        }
        grid
    }
}

/// Terminal result of a solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every cell holds a tile and all shared edges match
    Solved(Solution),
    /// The exhaustive search proved no tiling exists from the start configuration
    Unsatisfiable,
    /// A best-effort strategy stopped with unfilled cells left in the grid
    Incomplete(Grid),
    /// The cancellation signal fired before the search finished
    Cancelled,
}

impl SolveOutcome {
    /// Whether a complete tiling was produced
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The tiling, when solved
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Short lowercase name of the outcome
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Solved(_) => "solved",
            Self::Unsatisfiable => "unsatisfiable",
            Self::Incomplete(_) => "incomplete",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete(grid) => write!(
                f,
                "incomplete ({} of {} cells unfilled)",
                grid.cell_count() - grid.filled_count(),
                grid.cell_count()
            ),
            other => f.write_str(other.label()),
        }
    }
}

/// Counters describing the work a strategy has done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Calls to `step`
    pub steps: usize,
    /// Tentative tile assignments made
    pub assignments: usize,
    /// Cells unfilled by backtracking
    pub backtracks: usize,
    /// Deepest work stack reached
    pub max_depth: usize,
    /// Cells left unresolved by the greedy strategy
    pub gaps: usize,
    /// Regions cleared by the block-deletion strategy
    pub block_clears: usize,
    /// Cells currently filled
    pub filled: usize,
    /// Cells in the grid
    pub total_cells: usize,
}
