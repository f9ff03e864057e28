//! Edge constraints derived from filled neighbours
//!
//! A cell's requirement is the 4·K socket string its tile must present. Each
//! side is either the wildcard string (neighbour missing or unfilled) or the
//! reverse of the neighbour's socket facing back across the shared edge.

use crate::algorithm::bitset::PossibilitySet;
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::{Cell, Direction, Grid, Tile, TileCatalog};

/// Socket string a tile must match at one cell, in side order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    sockets: Vec<char>,
    tile_size: usize,
}

impl Requirement {
    /// All 4·K required symbols, top side first
    pub fn sockets(&self) -> &[char] {
        &self.sockets
    }

    /// Required symbols on one side
    pub fn side(&self, direction: Direction) -> &[char] {
        let start = direction.side() * self.tile_size;
        self.sockets
            .get(start..start + self.tile_size)
            .unwrap_or(&[])
    }
}

/// Whether `tile` and the tile on its `direction` side agree along their shared edge
pub fn edges_match(tile: &Tile, direction: Direction, neighbour: &Tile) -> bool {
    tile.socket(direction)
        .iter()
        .eq(neighbour.socket(direction.opposite()).iter().rev())
}

/// Pure constraint queries over a catalog and a grid
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    catalog: &'a TileCatalog,
    wildcard: char,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Create an evaluator for a catalog and wildcard sentinel
    pub const fn new(catalog: &'a TileCatalog, wildcard: char) -> Self {
        Self { catalog, wildcard }
    }

    /// Create an evaluator after checking the catalog can be solved against
    ///
    /// The wildcard must not occur in any socket, otherwise a neighbour's
    /// edge could be mistaken for "no constraint".
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or a socket contains the wildcard
    pub fn checked(catalog: &'a TileCatalog, wildcard: char) -> Result<Self> {
        if catalog.is_empty() {
            return Err(TilingError::EmptyCatalog);
        }
        if let Some(index) = catalog
            .tiles()
            .iter()
            .position(|tile| tile.sockets().contains(&wildcard))
        {
            return Err(invalid_parameter(
                "wildcard",
                &wildcard,
                &format!("Wildcard symbol appears on an edge of tile {index}"),
            ));
        }
        Ok(Self::new(catalog, wildcard))
    }

    /// The catalog tiles are drawn from
    pub const fn catalog(&self) -> &'a TileCatalog {
        self.catalog
    }

    /// Symbol that matches any socket symbol
    pub const fn wildcard(&self) -> char {
        self.wildcard
    }

    /// Edge signature required at `cell` by its filled neighbours
    pub fn required_sockets(&self, grid: &Grid, cell: Cell) -> Requirement {
        let size = self.catalog.tile_size();
        let mut sockets = Vec::with_capacity(4 * size);

        for direction in Direction::ALL {
            let facing = grid
                .neighbour(cell, direction)
                .and_then(|n| grid.get(n))
                .and_then(|id| self.catalog.get(id));

            match facing {
                Some(tile) => {
                    sockets.extend(tile.socket(direction.opposite()).iter().rev());
                }
                None => {
                    sockets.extend(std::iter::repeat_n(self.wildcard, size));
                }
            }
        }

        Requirement {
            sockets,
            tile_size: size,
        }
    }

    /// Whether every socket position is either wildcard or equal to the tile's symbol
    pub fn fits(&self, tile: &Tile, requirement: &Requirement) -> bool {
        Direction::ALL.into_iter().all(|direction| {
            let required = requirement.side(direction);
            let actual = tile.socket(direction);
            required.len() == actual.len()
                && required
                    .iter()
                    .zip(actual)
                    .all(|(&want, &have)| want == self.wildcard || want == have)
        })
    }

    /// Tiles consistent with the current filled neighbours of `cell`
    pub fn possibilities_at(&self, grid: &Grid, cell: Cell) -> PossibilitySet {
        let requirement = self.required_sockets(grid, cell);
        let mut possibilities = PossibilitySet::new(self.catalog.len());
        for (id, tile) in self.catalog.tiles().iter().enumerate() {
            if self.fits(tile, &requirement) {
                possibilities.insert(id);
            }
        }
        possibilities
    }

    /// Whether every pair of adjacent filled cells agrees on its shared edge
    pub fn is_consistent(&self, grid: &Grid) -> bool {
        grid.cells().all(|cell| {
            let Some(tile) = grid.get(cell).and_then(|id| self.catalog.get(id)) else {
                return true;
            };
            [Direction::Right, Direction::Down].into_iter().all(|direction| {
                grid.neighbour(cell, direction)
                    .and_then(|n| grid.get(n))
                    .and_then(|id| self.catalog.get(id))
                    .is_none_or(|neighbour| edges_match(tile, direction, neighbour))
            })
        })
    }
}
