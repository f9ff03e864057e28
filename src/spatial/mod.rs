//! Spatial data structures for the tile grid
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and neighbour stepping
//! - Grid cell state management
//! - Tile data structures, rotation and sample extraction

/// Cardinal directions in clockwise socket order
pub mod direction;
/// Grid cell state management
pub mod grid;
/// Tile definitions, socket extraction and catalog construction
pub mod tiles;

pub use direction::Direction;
pub use grid::{Cell, Grid};
pub use tiles::{Tile, TileCatalog, TileId};
