//! Solver constants and runtime configuration defaults

/// Edge length of the built-in default tile set
pub const DEFAULT_TILE_SIZE: usize = 2;

/// Socket symbol meaning "no constraint from this side"
pub const DEFAULT_WILDCARD: char = '3';

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 16;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of generation attempts
pub const DEFAULT_ATTEMPTS: usize = 1;

/// Initial radius cleared around a contradiction in block-deletion mode
pub const DEFAULT_BLOCK_RADIUS: usize = 2;

// Prevents block deletion from clearing the entire grid on repeated failures
/// Maximum radius for block deletion
pub const MAX_BLOCK_RADIUS: usize = 6;

/// Number of block clears allowed before block-deletion mode gives up
pub const DEFAULT_MAX_BLOCK_CLEARS: usize = 1_000;

// Output settings
/// Glyph drawn for cells left unfilled by a best-effort strategy
pub const UNFILLED_GLYPH: char = '?';

// Progress bar display settings
/// Solver steps between progress bar refreshes
pub const PROGRESS_UPDATE_INTERVAL: usize = 64;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
