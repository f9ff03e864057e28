use clap::ValueEnum;
use tracing::{info, warn};

use crate::algorithm::cancellation::Cancellation;
use crate::algorithm::deadlock::BlockDeletion;
use crate::algorithm::greedy::GreedyCollapse;
use crate::algorithm::outcome::{SolveOutcome, SolveStats};
use crate::algorithm::selection::RandomSource;
use crate::algorithm::solver::BacktrackingSolver;
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_BLOCK_RADIUS, DEFAULT_HEIGHT, DEFAULT_MAX_BLOCK_CLEARS,
    DEFAULT_WIDTH, DEFAULT_WILDCARD, MAX_BLOCK_RADIUS, MAX_GRID_DIMENSION,
    PROGRESS_UPDATE_INTERVAL,
};
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::{Cell, TileCatalog};

/// How cells are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Complete depth-first search with rollback
    #[default]
    Backtracking,
    /// Forward-only collapse that leaves gaps
    Greedy,
    /// Forward collapse that clears a block around each contradiction
    BlockDeletion,
}

impl Strategy {
    /// Whether a failure of this strategy proves no tiling exists
    pub const fn is_exhaustive(self) -> bool {
        matches!(self, Self::Backtracking)
    }

    /// Name used in logs and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backtracking => "backtracking",
            Self::Greedy => "greedy",
            Self::BlockDeletion => "block-deletion",
        }
    }
}

/// Parameters for one generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Grid width in cells (columns)
    pub width: usize,
    /// Grid height in cells (rows)
    pub height: usize,
    /// Socket symbol meaning "no constraint"
    pub wildcard: char,
    /// Assignment strategy
    pub strategy: Strategy,
    /// Fixed start cell, or `None` to draw one per attempt
    pub start: Option<Cell>,
    /// Initial block radius for block deletion
    pub block_radius: usize,
    /// Block clears allowed per attempt
    pub max_block_clears: usize,
    /// Attempts allowed for the heuristic strategies
    pub attempts: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wildcard: DEFAULT_WILDCARD,
            strategy: Strategy::default(),
            start: None,
            block_radius: DEFAULT_BLOCK_RADIUS,
            max_block_clears: DEFAULT_MAX_BLOCK_CLEARS,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl GenerationConfig {
    /// Check the configuration against a catalog before any solving
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog is empty
    /// - Width or height is outside `1..=MAX_GRID_DIMENSION`
    /// - Attempts is zero
    /// - The start cell lies outside the grid
    /// - The block radius is outside `1..=MAX_BLOCK_RADIUS`
    pub fn validate(&self, catalog: &TileCatalog) -> Result<()> {
        if catalog.is_empty() {
            return Err(TilingError::EmptyCatalog);
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("Must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.attempts,
                &"At least one attempt is required",
            ));
        }
        if let Some([row, col]) = self.start {
            if row >= self.height || col >= self.width {
                return Err(invalid_parameter(
                    "start",
                    &format!("{row},{col}"),
                    &format!("Must lie inside the {}x{} grid", self.height, self.width),
                ));
            }
        }
        if !(1..=MAX_BLOCK_RADIUS).contains(&self.block_radius) {
            return Err(invalid_parameter(
                "block_radius",
                &self.block_radius,
                &format!("Must be between 1 and {MAX_BLOCK_RADIUS}"),
            ));
        }
        Ok(())
    }
}

/// Result of a generation run with the attempt that produced it
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Outcome of the final attempt
    pub outcome: SolveOutcome,
    /// Attempts made, including the final one
    pub attempts: usize,
    /// Counters of the final attempt
    pub stats: SolveStats,
}

/// One attempt of whichever strategy is configured
enum Engine<'a> {
    Backtracking(BacktrackingSolver<'a>),
    Greedy(GreedyCollapse<'a>),
    BlockDeletion(BlockDeletion<'a>),
}

impl<'a> Engine<'a> {
    fn build(catalog: &'a TileCatalog, config: &GenerationConfig) -> Result<Self> {
        let GenerationConfig {
            width,
            height,
            wildcard,
            ..
        } = *config;
        Ok(match config.strategy {
            Strategy::Backtracking => {
                Self::Backtracking(BacktrackingSolver::new(catalog, width, height, wildcard)?)
            }
            Strategy::Greedy => {
                Self::Greedy(GreedyCollapse::new(catalog, width, height, wildcard)?)
            }
            Strategy::BlockDeletion => Self::BlockDeletion(BlockDeletion::new(
                catalog,
                width,
                height,
                wildcard,
                config.block_radius,
                config.max_block_clears,
            )?),
        })
    }

    fn start<R: RandomSource + ?Sized>(
        &mut self,
        start: Option<Cell>,
        source: &mut R,
    ) -> Result<()> {
        match (self, start) {
            (Self::Backtracking(solver), Some(cell)) => solver.start_at(cell),
            (Self::Backtracking(solver), None) => solver.start_random(source).map(drop),
            (Self::Greedy(greedy), Some(cell)) => greedy.start_at(cell),
            (Self::Greedy(greedy), None) => greedy.start_random(source).map(drop),
            (Self::BlockDeletion(blocks), Some(cell)) => blocks.start_at(cell),
            (Self::BlockDeletion(blocks), None) => blocks.start_random(source).map(drop),
        }
    }

    fn step<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Result<Option<SolveOutcome>> {
        match self {
            Self::Backtracking(solver) => solver.step(source),
            Self::Greedy(greedy) => greedy.step(source),
            Self::BlockDeletion(blocks) => blocks.step(source),
        }
    }

    const fn stats(&self) -> &SolveStats {
        match self {
            Self::Backtracking(solver) => solver.stats(),
            Self::Greedy(greedy) => greedy.stats(),
            Self::BlockDeletion(blocks) => blocks.stats(),
        }
    }
}

/// Runs the configured strategy with retries, cancellation and progress reporting
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    catalog: &'a TileCatalog,
    config: GenerationConfig,
}

impl<'a> Generator<'a> {
    /// Create a generator after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for the catalog
    pub fn new(catalog: &'a TileCatalog, config: GenerationConfig) -> Result<Self> {
        config.validate(catalog)?;
        Ok(Self { catalog, config })
    }

    /// Validated configuration
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run to a final outcome
    ///
    /// # Errors
    ///
    /// Returns an error if the solver detects corrupt state
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        source: &mut R,
        cancel: &Cancellation,
    ) -> Result<GenerationReport> {
        self.run_observed(source, cancel, |_, _| {})
    }

    /// Run to a final outcome, reporting counters along the way
    ///
    /// `observe` receives the attempt number and the current counters every
    /// `PROGRESS_UPDATE_INTERVAL` steps and once at the end of each attempt.
    /// Only incomplete results of the heuristic strategies are retried; an
    /// unsatisfiable backtracking search is final.
    ///
    /// # Errors
    ///
    /// Returns an error if the solver detects corrupt state
    pub fn run_observed<R, F>(
        &self,
        source: &mut R,
        cancel: &Cancellation,
        mut observe: F,
    ) -> Result<GenerationReport>
    where
        R: RandomSource + ?Sized,
        F: FnMut(usize, &SolveStats),
    {
        let strategy = self.config.strategy;
        let mut attempt = 1;

        loop {
            let mut engine = Engine::build(self.catalog, &self.config)?;
            engine.start(self.config.start, source)?;
            info!(
                attempt,
                strategy = strategy.name(),
                width = self.config.width,
                height = self.config.height,
                "starting attempt"
            );

            let outcome = loop {
                if cancel.is_cancelled() {
                    break SolveOutcome::Cancelled;
                }
                if let Some(outcome) = engine.step(source)? {
                    break outcome;
                }
                if engine.stats().steps % PROGRESS_UPDATE_INTERVAL == 0 {
                    observe(attempt, engine.stats());
                }
            };

            let stats = *engine.stats();
            observe(attempt, &stats);
            info!(
                attempt,
                outcome = outcome.label(),
                steps = stats.steps,
                backtracks = stats.backtracks,
                "attempt finished"
            );

            let retry = matches!(outcome, SolveOutcome::Incomplete(_))
                && !strategy.is_exhaustive()
                && attempt < self.config.attempts;
            if !retry {
                return Ok(GenerationReport {
                    outcome,
                    attempts: attempt,
                    stats,
                });
            }

            warn!(
                attempt,
                remaining = self.config.attempts - attempt,
                "attempt left unfilled cells, retrying"
            );
            attempt += 1;
        }
    }
}
