//! Command-line interface for generating tilings from presets, catalog files or samples

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::algorithm::cancellation::Cancellation;
use crate::algorithm::executor::{GenerationConfig, Generator, Strategy};
use crate::algorithm::outcome::SolveOutcome;
use crate::algorithm::selection::SeededSelector;
use crate::io::catalog::{Preset, load_catalog_file, load_sample_file};
use crate::io::configuration::{
    DEFAULT_ATTEMPTS, DEFAULT_BLOCK_RADIUS, DEFAULT_HEIGHT, DEFAULT_MAX_BLOCK_CLEARS, DEFAULT_SEED,
    DEFAULT_TILE_SIZE, DEFAULT_WIDTH, DEFAULT_WILDCARD, UNFILLED_GLYPH,
};
use crate::io::error::{Result, TilingError};
use crate::io::image::{build_palette, export_canvas_as_png};
use crate::io::progress::SolveProgress;
use crate::io::render::{render_grid, render_solution, write_canvas};
use crate::spatial::{Cell, TileCatalog};

#[derive(Parser, Debug)]
#[command(name = "sockettile")]
#[command(
    author,
    version,
    about = "Generate edge-matched tilings with backtracking wave function collapse"
)]
/// Command-line arguments for the tiling generator
pub struct Cli {
    /// Built-in tile set (default: corners)
    #[arg(long, value_enum, conflicts_with_all = ["catalog", "sample"])]
    pub preset: Option<Preset>,

    /// Catalog file with `size`, `tile` and `rotate` directives
    #[arg(long, value_name = "FILE", conflicts_with = "sample")]
    pub catalog: Option<PathBuf>,

    /// Text sample to cut every K×K window from
    #[arg(long, value_name = "FILE")]
    pub sample: Option<PathBuf>,

    /// Tile edge length for --sample
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Socket symbol meaning "no constraint"; must not appear on any tile edge
    #[arg(long, default_value_t = DEFAULT_WILDCARD)]
    pub wildcard: char,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Assignment strategy
    #[arg(long, value_enum, default_value_t = Strategy::Backtracking)]
    pub strategy: Strategy,

    /// Attempts allowed for the greedy and block-deletion strategies
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Initial radius cleared by block deletion
    #[arg(long, default_value_t = DEFAULT_BLOCK_RADIUS)]
    pub block_radius: usize,

    /// Block clears allowed per attempt
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCK_CLEARS)]
    pub max_block_clears: usize,

    /// Fixed start cell instead of a random one
    #[arg(long, value_name = "ROW,COL", value_parser = parse_cell)]
    pub start: Option<Cell>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Write the text canvas to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also export the canvas as a PNG image
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Suppress progress output and all logs below error
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a `ROW,COL` pair
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated integers
pub fn parse_cell(text: &str) -> std::result::Result<Cell, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got '{text}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid row '{row}': {e}"))?;
    let col = col
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{col}': {e}"))?;
    Ok([row, col])
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Maximum log level implied by `--quiet` and `-v`
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Load the tile catalog selected by the source flags
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or sample file cannot be read or parsed
    pub fn load_catalog(&self) -> Result<TileCatalog> {
        if let Some(path) = &self.catalog {
            return load_catalog_file(path);
        }
        if let Some(path) = &self.sample {
            return load_sample_file(path, self.tile_size);
        }
        self.preset.unwrap_or_default().catalog()
    }

    /// Generation parameters from the command line
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            width: self.width,
            height: self.height,
            wildcard: self.wildcard,
            strategy: self.strategy,
            start: self.start,
            block_radius: self.block_radius,
            max_block_clears: self.max_block_clears,
            attempts: self.attempts,
        }
    }

    /// Cancellation signal honouring `--timeout-ms`
    pub fn cancellation(&self) -> Cancellation {
        self.timeout_ms
            .map_or_else(Cancellation::new, |ms| {
                Cancellation::with_timeout(Duration::from_millis(ms))
            })
    }
}

/// Install the stderr log subscriber at the given level
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one generation from parsed arguments and writes its output
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the catalog, generate, and write the canvas
    ///
    /// Partial grids from the heuristic strategies are still written, with
    /// unfilled cells drawn as `?`, before the run is reported as failed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog cannot be loaded or the configuration is invalid
    /// - Output files cannot be written
    /// - The run ends without a complete tiling
    pub fn run(&self) -> Result<()> {
        let catalog = self.cli.load_catalog()?;
        let generator = Generator::new(&catalog, self.cli.generation_config())?;
        let mut selector = SeededSelector::new(self.cli.seed);
        let cancel = self.cli.cancellation();

        let progress = self
            .cli
            .should_show_progress()
            .then(|| SolveProgress::new(self.cli.width * self.cli.height));

        let report = generator.run_observed(&mut selector, &cancel, |attempt, stats| {
            if let Some(progress) = &progress {
                progress.update(attempt, stats);
            }
        })?;

        if let Some(progress) = &progress {
            progress.finish(&report.outcome);
        }

        match &report.outcome {
            SolveOutcome::Solved(solution) => {
                self.emit(&render_solution(solution, &catalog), &catalog)
            }
            SolveOutcome::Incomplete(grid) => {
                self.emit(&render_grid(grid, &catalog, UNFILLED_GLYPH), &catalog)?;
                Err(TilingError::NoSolution {
                    outcome: report.outcome.label(),
                    attempts: report.attempts,
                })
            }
            SolveOutcome::Unsatisfiable | SolveOutcome::Cancelled => Err(TilingError::NoSolution {
                outcome: report.outcome.label(),
                attempts: report.attempts,
            }),
        }
    }

    // Allow print for the canvas when no output file is given
    #[allow(clippy::print_stdout)]
    fn emit(&self, canvas: &[String], catalog: &TileCatalog) -> Result<()> {
        match &self.cli.output {
            Some(path) => write_canvas(canvas, path)?,
            None => {
                for line in canvas {
                    println!("{line}");
                }
            }
        }

        if let Some(path) = &self.cli.png {
            export_canvas_as_png(canvas, &build_palette(catalog), path)?;
        }
        Ok(())
    }
}
