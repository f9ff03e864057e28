//! Frontier of partially constrained cells and their possibility sets
//!
//! A cell belongs to the frontier while it is unfilled and touches at least
//! one filled cell. Membership and the cell's possibility set are stored
//! together so a set can never outlive its frontier entry.

use std::collections::BTreeMap;

use crate::algorithm::bitset::PossibilitySet;
use crate::spatial::Cell;

/// Frontier cells keyed in lexicographic `[row, col]` order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    members: BTreeMap<Cell, PossibilitySet>,
}

impl Frontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell or replace its possibility set
    pub fn insert(&mut self, cell: Cell, possibilities: PossibilitySet) {
        self.members.insert(cell, possibilities);
    }

    /// Remove a cell, returning its possibility set
    pub fn remove(&mut self, cell: Cell) -> Option<PossibilitySet> {
        self.members.remove(&cell)
    }

    /// Whether a cell is on the frontier
    pub fn contains(&self, cell: Cell) -> bool {
        self.members.contains_key(&cell)
    }

    /// Current possibility set of a frontier cell
    pub fn get(&self, cell: Cell) -> Option<&PossibilitySet> {
        self.members.get(&cell)
    }

    /// Number of frontier cells
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Frontier cells with their possibility sets in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &PossibilitySet)> {
        self.members.iter().map(|(&cell, set)| (cell, set))
    }

    /// Cell with the fewest remaining possibilities
    ///
    /// Ties go to the lexicographically smallest `[row, col]`, so results do
    /// not depend on insertion order.
    pub fn select_min(&self) -> Option<Cell> {
        self.members
            .iter()
            .min_by_key(|(_, set)| set.count())
            .map(|(&cell, _)| cell)
    }
}
