//! Backtracking constraint solver
//!
//! Depth-first search over cell assignments driven by an explicit work stack
//! instead of native recursion. Each frame owns one cell and the tiles not
//! yet tried there. A step either commits the next untried tile at the top
//! frame and descends into the most constrained frontier cell, or, once the
//! top frame has run dry, unfills its cell and pops it.
//!
//! Possibility sets are always recomputed from the grid when a neighbour
//! changes, never patched. Because recomputation depends only on the grid,
//! undoing an assignment restores the frontier exactly as it was before the
//! assignment was made.

use tracing::{debug, trace};

use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::cancellation::Cancellation;
use crate::algorithm::constraint::ConstraintEvaluator;
use crate::algorithm::frontier::Frontier;
use crate::algorithm::outcome::{Solution, SolveOutcome, SolveStats};
use crate::algorithm::selection::{RandomSource, draw, random_cell};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::{Cell, Grid, TileCatalog};

/// One decision point on the search path
#[derive(Debug, Clone)]
struct Frame {
    cell: Cell,
    remaining: PossibilitySet,
}

/// Complete search for a tiling in which every shared edge matches
///
/// The solver owns the grid, the frontier and the work stack for the
/// lifetime of one solve. Random choices come from the source passed to
/// each [`step`](Self::step), so the same source state reproduces the same
/// search.
#[derive(Debug, Clone)]
pub struct BacktrackingSolver<'a> {
    evaluator: ConstraintEvaluator<'a>,
    grid: Grid,
    frontier: Frontier,
    stack: Vec<Frame>,
    stats: SolveStats,
    started: bool,
}

impl<'a> BacktrackingSolver<'a> {
    /// Create a solver for a `width` x `height` grid
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
            grid,
            frontier: Frontier::new(),
            stack: Vec::new(),
            stats,
            started: false,
        })
    }

    /// Begin the search at a chosen cell with the whole catalog as candidates
    ///
    /// # Errors
    ///
    /// Returns an error if the search already started or the cell is out of bounds
    pub fn start_at(&mut self, cell: Cell) -> Result<()> {
        if self.started {
            return Err(invalid_parameter(
                "start",
                &format!("{cell:?}"),
                &"Search has already started",
            ));
        }
        if !self.grid.contains(cell) {
            return Err(invalid_parameter(
                "start",
                &format!("{cell:?}"),
                &format!(
                    "Start cell must lie inside the {}x{} grid",
                    self.grid.rows(),
                    self.grid.cols()
                ),
            ));
        }

        debug!(
            row = cell[0],
            col = cell[1],
            tiles = self.evaluator.catalog().len(),
            "starting backtracking search"
        );

        self.started = true;
        self.frontier
            .insert(cell, PossibilitySet::all(self.evaluator.catalog().len()));
        self.enter(cell);
        Ok(())
    }

    /// Begin the search at a uniformly drawn cell
    ///
    /// # Errors
    ///
    /// Returns an error if the search already started
    pub fn start_random<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Result<Cell> {
        let cell = random_cell(source, self.grid.rows(), self.grid.cols());
        self.start_at(cell)?;
        Ok(cell)
    }

    /// Advance the search by one assignment or one rollback
    ///
    /// Returns `Some` with the terminal outcome once the grid is complete or
    /// the root frame is exhausted. Starts at a random cell if no start was
    /// chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontier loses track of unfilled cells, which
    /// would mean the grid state is corrupt
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Option<SolveOutcome>> {
        if !self.started {
            self.start_random(source)?;
        }
        if self.grid.is_complete() {
            return self.solved().map(Some);
        }

        self.stats.steps += 1;

        let Some(frame) = self.stack.last_mut() else {
            return Ok(Some(SolveOutcome::Unsatisfiable));
        };
        let cell = frame.cell;

        if let Some(tile) = draw(&mut frame.remaining, source) {
            self.grid.fill(cell, tile);
            self.stats.assignments += 1;
            self.stats.filled = self.grid.filled_count();

            if self.grid.is_complete() {
                let outcome = self.solved()?;
                debug!(
                    assignments = self.stats.assignments,
                    backtracks = self.stats.backtracks,
                    max_depth = self.stats.max_depth,
                    "tiling solved"
                );
                return Ok(Some(outcome));
            }

            self.refresh_after_fill(cell);

            let next = self.frontier.select_min().ok_or_else(|| {
                computation_error(
                    "next cell selection",
                    &"frontier is empty while cells remain unfilled",
                )
            })?;
            self.enter(next);
            return Ok(None);
        }

        self.stack.pop();
        self.rollback(cell);
        self.stats.backtracks += 1;
        self.stats.filled = self.grid.filled_count();
        trace!(
            row = cell[0],
            col = cell[1],
            depth = self.stack.len(),
            "candidates exhausted, backtracking"
        );

        if self.stack.is_empty() {
            debug!(
                assignments = self.stats.assignments,
                backtracks = self.stats.backtracks,
                "search exhausted without a tiling"
            );
            return Ok(Some(SolveOutcome::Unsatisfiable));
        }
        Ok(None)
    }

    /// Run the search to completion or until cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if a step detects corrupt grid state
    pub fn solve<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
        cancel: &Cancellation,
    ) -> Result<SolveOutcome> {
        loop {
            if cancel.is_cancelled() {
                debug!(steps = self.stats.steps, "search cancelled");
                return Ok(SolveOutcome::Cancelled);
            }
            if let Some(outcome) = self.step(source)? {
                return Ok(outcome);
            }
        }
    }

    /// Current grid state
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current frontier and possibility sets
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Work counters so far
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Number of frames on the active search path
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Cell currently being resolved, if the search is in progress
    pub fn active_cell(&self) -> Option<Cell> {
        self.stack.last().map(|frame| frame.cell)
    }

    /// Verify the frontier against a from-scratch recomputation
    ///
    /// A cell must be on the frontier exactly when it is unfilled, has a
    /// filled neighbour and is not the cell currently being resolved, and
    /// its stored possibility set must equal a fresh evaluation.
    pub fn check_invariants(&self) -> bool {
        let active = self
            .stack
            .last()
            .map(|frame| frame.cell)
            .filter(|&cell| !self.grid.is_filled(cell));

        self.grid.cells().all(|cell| {
            let expected = !self.grid.is_filled(cell)
                && self.grid.has_filled_neighbour(cell)
                && Some(cell) != active;
            match self.frontier.get(cell) {
                Some(set) => expected && *set == self.evaluator.possibilities_at(&self.grid, cell),
                None => !expected,
            }
        })
    }

    fn solved(&self) -> Result<SolveOutcome> {
        Solution::from_grid(&self.grid)
            .map(SolveOutcome::Solved)
            .ok_or_else(|| computation_error("solution extraction", &"grid has unfilled cells"))
    }

    /// Push a frame for `cell`, taking its possibility set off the frontier
    fn enter(&mut self, cell: Cell) {
        let remaining = self
            .frontier
            .remove(cell)
            .unwrap_or_else(|| self.evaluator.possibilities_at(&self.grid, cell));
        self.stack.push(Frame { cell, remaining });
        self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
    }

    /// Recompute unfilled neighbours of a newly filled cell
    fn refresh_after_fill(&mut self, cell: Cell) {
        for (_, neighbour) in self.grid.neighbours(cell) {
            if self.grid.is_filled(neighbour) {
                self.frontier.remove(neighbour);
            } else {
                let possibilities = self.evaluator.possibilities_at(&self.grid, neighbour);
                self.frontier.insert(neighbour, possibilities);
            }
        }
    }

    /// Unfill `cell` and restore frontier membership around it
    fn rollback(&mut self, cell: Cell) {
        self.grid.unfill(cell);
        self.refresh_coverage(cell);

        for (_, neighbour) in self.grid.neighbours(cell) {
            if !self.grid.is_filled(neighbour) {
                self.refresh_coverage(neighbour);
            }
        }
    }

    /// Keep an unfilled cell on the frontier only while a neighbour constrains it
    fn refresh_coverage(&mut self, cell: Cell) {
        if self.grid.has_filled_neighbour(cell) {
            let possibilities = self.evaluator.possibilities_at(&self.grid, cell);
            self.frontier.insert(cell, possibilities);
        } else {
            self.frontier.remove(cell);
        }
    }
}
