//! Injected randomness for start cells and tile draws

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::bitset::PossibilitySet;
use crate::spatial::{Cell, TileId};

/// Source of uniform choices consumed by every strategy
///
/// Passing the source explicitly keeps runs reproducible: the same source in
/// the same state yields the same sequence of draws.
pub trait RandomSource {
    /// Uniform index in `0..len`; returns 0 when `len` is 0
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct SeededSelector {
    rng: StdRng,
}

impl SeededSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSelector {
    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Pick a cell uniformly from a `rows` x `cols` grid
pub fn random_cell<R: RandomSource + ?Sized>(source: &mut R, rows: usize, cols: usize) -> Cell {
    let row = source.choose_index(rows);
    let col = source.choose_index(cols);
    [row, col]
}

/// Remove and return a uniformly drawn member of `set`
///
/// Removing the drawn tile guarantees it is never retried at the same
/// decision point.
pub fn draw<R: RandomSource + ?Sized>(set: &mut PossibilitySet, source: &mut R) -> Option<TileId> {
    let count = set.count();
    if count == 0 {
        return None;
    }
    let tile = set.nth(source.choose_index(count).min(count - 1))?;
    set.remove(tile);
    Some(tile)
}
