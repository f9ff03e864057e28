//! Greedy priority collapse without recovery
//!
//! Cells are collapsed in ascending order of possibility count. A cell whose
//! possibility set is empty when it comes up is left unfilled for good, so
//! the result may contain gaps.

use ndarray::Array2;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::debug;

use crate::algorithm::cancellation::Cancellation;
use crate::algorithm::constraint::ConstraintEvaluator;
use crate::algorithm::outcome::{Solution, SolveOutcome, SolveStats};
use crate::algorithm::selection::{RandomSource, draw, random_cell};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::{Cell, Grid, TileCatalog};

/// Min-priority queue of cells keyed by possibility count, then `[row, col]`
///
/// Entries are never updated in place. A cell may be queued several times
/// and callers skip entries for cells that were resolved in the meantime.
#[derive(Debug, Clone, Default)]
pub struct CollapseQueue {
    heap: BinaryHeap<Reverse<(usize, Cell)>>,
}

impl CollapseQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a cell with its current possibility count
    pub fn push(&mut self, cell: Cell, count: usize) {
        self.heap.push(Reverse((count, cell)));
    }

    /// Take the entry with the smallest count
    pub fn pop(&mut self) -> Option<(Cell, usize)> {
        self.heap.pop().map(|Reverse((count, cell))| (cell, count))
    }

    /// Number of queued entries, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries are queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Forward-only collapse that leaves gaps where it gets stuck
#[derive(Debug, Clone)]
pub struct GreedyCollapse<'a> {
    evaluator: ConstraintEvaluator<'a>,
    grid: Grid,
    queue: CollapseQueue,
    gaps: Array2<bool>,
    stats: SolveStats,
    started: bool,
}

impl<'a> GreedyCollapse<'a> {
    /// Create a greedy run over a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is out of range, the catalog is empty,
    /// or the wildcard appears on a tile edge
    pub fn new(
        catalog: &'a TileCatalog,
        width: usize,
        height: usize,
        wildcard: char,
    ) -> Result<Self> {
        let evaluator = ConstraintEvaluator::checked(catalog, wildcard)?;
        let grid = Grid::checked(height, width)?;
        let stats = SolveStats {
            total_cells: grid.cell_count(),
            ..SolveStats::default()
        };

        Ok(Self {
            evaluator,
            gaps: Array2::from_elem((height, width), false),
            grid,
            queue: CollapseQueue::new(),
            stats,
            started: false,
        })
    }

    /// Seed the queue with a chosen start cell
    ///
    /// # Errors
    ///
    /// Returns an error if the run already started or the cell is out of bounds
    pub fn start_at(&mut self, cell: Cell) -> Result<()> {
        if self.started || !self.grid.contains(cell) {
            return Err(invalid_parameter(
                "start",
                &format!("{cell:?}"),
                &"Start cell must lie inside the grid and be chosen once",
            ));
        }
        self.started = true;
        self.queue.push(cell, self.evaluator.catalog().len());
        Ok(())
    }

    /// Seed the queue with a uniformly drawn start cell
    ///
    /// # Errors
    ///
    /// Returns an error if the run already started
    pub fn start_random<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Result<Cell> {
        let cell = random_cell(source, self.grid.rows(), self.grid.cols());
        self.start_at(cell)?;
        Ok(cell)
    }

    /// Collapse the next queued cell
    ///
    /// Returns `Some` once the queue is exhausted: `Solved` if every cell was
    /// filled, `Incomplete` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the run had not started and no start could be chosen
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Option<SolveOutcome>> {
        if !self.started {
            self.start_random(source)?;
        }

        while let Some((cell, _)) = self.queue.pop() {
            if self.grid.is_filled(cell) || self.is_gap(cell) {
                continue;
            }
            self.stats.steps += 1;

            let mut possibilities = self.evaluator.possibilities_at(&self.grid, cell);
            let Some(tile) = draw(&mut possibilities, source) else {
                if let Some(gap) = self.gaps.get_mut(cell) {
                    *gap = true;
                }
                self.stats.gaps += 1;
                debug!(row = cell[0], col = cell[1], "no tile fits, leaving gap");
                return Ok(None);
            };

            self.grid.fill(cell, tile);
            self.stats.assignments += 1;
            self.stats.filled = self.grid.filled_count();

            for (_, neighbour) in self.grid.neighbours(cell) {
                if !self.grid.is_filled(neighbour) && !self.is_gap(neighbour) {
                    let count = self.evaluator.possibilities_at(&self.grid, neighbour).count();
                    self.queue.push(neighbour, count);
                }
            }
            return Ok(None);
        }

        self.finish().map(Some)
    }

    /// Run until the queue is exhausted or the run is cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if a step fails
    pub fn solve<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
        cancel: &Cancellation,
    ) -> Result<SolveOutcome> {
        loop {
            if cancel.is_cancelled() {
                return Ok(SolveOutcome::Cancelled);
            }
            if let Some(outcome) = self.step(source)? {
                return Ok(outcome);
            }
        }
    }

    /// Whether a cell was given up on
    pub fn is_gap(&self, cell: Cell) -> bool {
        self.gaps.get(cell).copied().unwrap_or(false)
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Work counters so far
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }

    fn finish(&self) -> Result<SolveOutcome> {
        if !self.grid.is_complete() {
            debug!(
                filled = self.grid.filled_count(),
                gaps = self.stats.gaps,
                "greedy collapse finished with unfilled cells"
            );
            return Ok(SolveOutcome::Incomplete(self.grid.clone()));
        }
        Solution::from_grid(&self.grid)
            .map(SolveOutcome::Solved)
            .ok_or_else(|| computation_error("solution extraction", &"grid has unfilled cells"))
    }
}
