use bitvec::prelude::*;
use std::fmt;

use crate::spatial::TileId;

/// Fixed-capacity bitset of admissible tile ids for one cell
///
/// Uses 0-based tile ids matching catalog positions. Iteration order is
/// ascending id, which makes the n-th member well defined for random draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibilitySet {
    bits: BitVec,
    capacity: usize,
}

impl PossibilitySet {
    /// Create a set with no tiles present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a set containing every tile of a catalog
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
            capacity,
        }
    }

    /// Insert a tile id; ids beyond the capacity are ignored
    pub fn insert(&mut self, tile: TileId) {
        if tile < self.capacity {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile id, returning whether it was present
    pub fn remove(&mut self, tile: TileId) -> bool {
        if tile < self.capacity {
            self.bits.replace(tile, false)
        } else {
            false
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of tile ids the set can hold
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The `index`-th member in ascending id order
    pub fn nth(&self, index: usize) -> Option<TileId> {
        self.bits.iter_ones().nth(index)
    }

    /// Members in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile ids as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PossibilitySet({} tiles: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
