//! Block-deletion recovery for the greedy collapse
//!
//! Instead of leaving a gap, a cell with no fitting tile triggers the
//! clearing of the square block around it. The block boundary is queued
//! again and the collapse carries on from there. This is an approximate
//! recovery: nothing outside the block is restored and the same region may
//! fail repeatedly, so the radius grows on repeated failures at one cell and
//! a global clear budget bounds the run.

use ndarray::Array2;
use tracing::{debug, warn};

use crate::algorithm::cancellation::Cancellation;
use crate::algorithm::constraint::ConstraintEvaluator;
use crate::algorithm::greedy::CollapseQueue;
use crate::algorithm::outcome::{Solution, SolveOutcome, SolveStats};
use crate::algorithm::selection::{RandomSource, draw, random_cell};
use crate::io::configuration::MAX_BLOCK_RADIUS;
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::{Cell, Grid, TileCatalog};

/// Summary of one block clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockClear {
    /// Cell whose possibility set was empty
    pub center: Cell,
    /// Radius of the cleared square
    pub radius: usize,
    /// Cells that held a tile before the clear
    pub cleared: Vec<Cell>,
}

/// Greedy collapse that clears a neighbourhood on contradiction
#[derive(Debug, Clone)]
pub struct BlockDeletion<'a> {
    evaluator: ConstraintEvaluator<'a>,
    grid: Grid,
    queue: CollapseQueue,
    clear_counts: Array2<u8>,
    base_radius: usize,
    max_clears: usize,
    stats: SolveStats,
    started: bool,
}

impl<'a> BlockDeletion<'a> {
    /// Create a block-deletion run over a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is out of range, the radius is outside
    /// `1..=MAX_BLOCK_RADIUS`, the catalog is empty, or the wildcard appears
    /// on a tile edge
    pub fn new(
        catalog: &'a TileCatalog,
        width: usize,
        height: usize,
        wildcard: char,
        base_radius: usize,
        max_clears: usize,
    ) -> Result<Self> {
        let evaluator = ConstraintEvaluator::checked(catalog, wildcard)?;
        let grid = Grid::checked(height, width)?;
        if !(1..=MAX_BLOCK_RADIUS).contains(&base_radius) {
            return Err(invalid_parameter(
                "block_radius",
                &base_radius,
                &format!("Block radius must be between 1 and {MAX_BLOCK_RADIUS}"),
            ));
        }
        let stats = SolveStats {
            total_cells: grid.cell_count(),
            ..SolveStats::default()
        };

        Ok(Self {
            evaluator,
            clear_counts: Array2::zeros((height, width)),
            grid,
            queue: CollapseQueue::new(),
            base_radius,
            max_clears,
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

    /// Collapse the next queued cell, clearing its block if nothing fits
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
            if self.grid.is_filled(cell) {
                continue;
            }
            self.stats.steps += 1;

            let mut possibilities = self.evaluator.possibilities_at(&self.grid, cell);
            let Some(tile) = draw(&mut possibilities, source) else {
                if self.stats.block_clears >= self.max_clears {
                    warn!(
                        clears = self.stats.block_clears,
                        "block clear budget exhausted"
                    );
                    return Ok(Some(SolveOutcome::Incomplete(self.grid.clone())));
                }
                self.clear_block(cell);
                return Ok(None);
            };

            self.grid.fill(cell, tile);
            self.stats.assignments += 1;
            self.stats.filled = self.grid.filled_count();
            for (_, neighbour) in self.grid.neighbours(cell) {
                self.enqueue(neighbour);
            }
            return Ok(None);
        }

        self.finish().map(Some)
    }

    /// Run until the grid is complete, the budget runs out, or the run is cancelled
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

    /// Radius the next clear at `cell` would use
    ///
    /// Grows by one with every earlier clear centred on the same cell.
    pub fn radius_at(&self, cell: Cell) -> usize {
        let repeats = self.clear_counts.get(cell).copied().unwrap_or(0);
        (self.base_radius + usize::from(repeats)).min(MAX_BLOCK_RADIUS)
    }

    /// Clear the block around a contradiction and queue its boundary
    pub fn clear_block(&mut self, center: Cell) -> BlockClear {
        let radius = self.radius_at(center);
        if let Some(count) = self.clear_counts.get_mut(center) {
            *count = count.saturating_add(1);
        }

        let cleared = self.grid.clear_region(center, radius);
        let (row_span, col_span) = self.grid.region_spans(center, radius);

        let mut boundary = Vec::new();
        for row in row_span.clone() {
            for col in col_span.clone() {
                let on_edge = row == row_span.start
                    || row + 1 == row_span.end
                    || col == col_span.start
                    || col + 1 == col_span.end;
                if on_edge {
                    boundary.push([row, col]);
                }
            }
        }
        for cell in boundary {
            self.enqueue(cell);
        }

        self.stats.block_clears += 1;
        self.stats.filled = self.grid.filled_count();
        debug!(
            row = center[0],
            col = center[1],
            radius,
            cleared = cleared.len(),
            "cleared block around contradiction"
        );

        BlockClear {
            center,
            radius,
            cleared,
        }
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Work counters so far
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }

    fn enqueue(&mut self, cell: Cell) {
        if !self.grid.is_filled(cell) {
            let count = self.evaluator.possibilities_at(&self.grid, cell).count();
            self.queue.push(cell, count);
        }
    }

    fn finish(&self) -> Result<SolveOutcome> {
        if !self.grid.is_complete() {
            return Ok(SolveOutcome::Incomplete(self.grid.clone()));
        }
        Solution::from_grid(&self.grid)
            .map(SolveOutcome::Solved)
            .ok_or_else(|| computation_error("solution extraction", &"grid has unfilled cells"))
    }
}
