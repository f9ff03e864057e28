//! Backtracking wave function collapse over square tiles with edge sockets
//!
//! Tiles are K×K symbol blocks whose four edges are read clockwise. Two
//! tiles may sit side by side when the edge of one equals the reverse of the
//! facing edge of the other. The solver fills an N×M grid by depth-first
//! search with full rollback, always expanding the frontier cell with the
//! fewest remaining candidates.

#![forbid(unsafe_code)]

/// Solver, heuristic strategies and their shared building blocks
pub mod algorithm;
/// Catalog loading, rendering, command line and error handling
pub mod io;
/// Tiles, directions and the cell grid
pub mod spatial;

pub use io::error::{Result, TilingError};
