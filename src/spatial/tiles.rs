//! Tile definitions, socket extraction and catalog construction
//!
//! A tile is an immutable K×K block of symbols. Its four sockets are read
//! clockwise around the border starting at the top-left corner, so two tiles
//! sharing an edge read that edge in opposite directions. Catalogs are built
//! from hand-written literals, rotation expansion, or a sliding window over
//! a larger text sample.

use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::direction::Direction;

/// Index of a tile inside its catalog
pub type TileId = usize;

/// An immutable square tile with its four derived edge sockets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    size: usize,
    pixels: Box<[char]>,
    sockets: Box<[char]>,
}

impl Tile {
    /// Build a tile from a row-major literal of exactly `size * size` symbols
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or the literal length is not `size * size`
    pub fn from_literal(literal: &str, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &size,
                &"Tile size must be positive",
            ));
        }

        let pixels: Box<[char]> = literal.chars().collect();
        let expected = size * size;
        if pixels.len() != expected {
            return Err(TilingError::MalformedTile {
                literal: literal.to_string(),
                expected,
                found: pixels.len(),
            });
        }

        Ok(Self::from_pixels(size, pixels))
    }

    fn from_pixels(size: usize, pixels: Box<[char]>) -> Self {
        let at = |row: usize, col: usize| pixels.get(row * size + col).copied().unwrap_or_default();
        let last = size - 1;

        let mut sockets = Vec::with_capacity(4 * size);
        sockets.extend((0..size).map(|i| at(0, i)));
        sockets.extend((0..size).map(|i| at(i, last)));
        sockets.extend((0..size).map(|i| at(last, last - i)));
        sockets.extend((0..size).map(|i| at(last - i, 0)));

        Self {
            size,
            pixels,
            sockets: sockets.into_boxed_slice(),
        }
    }

    /// Edge length K
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Symbol at a row and column inside the tile
    pub fn pixel(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.pixels.get(row * self.size + col).copied()
    }

    /// One display row of the tile
    pub fn row(&self, row: usize) -> Option<&[char]> {
        let start = row.checked_mul(self.size)?;
        self.pixels.get(start..start + self.size)
    }

    /// Socket on the given side, read clockwise
    pub fn socket(&self, side: Direction) -> &[char] {
        let start = side.side() * self.size;
        self.sockets.get(start..start + self.size).unwrap_or(&[])
    }

    /// All four sockets concatenated in side order (4·K symbols)
    pub fn sockets(&self) -> &[char] {
        &self.sockets
    }

    /// Row-major literal that rebuilds this tile
    pub fn literal(&self) -> String {
        self.pixels.iter().collect()
    }

    /// Copy of this tile rotated 90° clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut rotated = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                rotated.push(self.pixel(n - 1 - col, row).unwrap_or_default());
            }
        }
        Self::from_pixels(n, rotated.into_boxed_slice())
    }
}

/// Ordered, read-only set of tiles sharing one tile size
///
/// Tile ids are positions in insertion order. Duplicate tiles are kept, which
/// weights the uniform draw towards tiles that appear more often in a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCatalog {
    tile_size: usize,
    tiles: Vec<Tile>,
}

impl TileCatalog {
    /// Create an empty catalog for tiles of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if `tile_size` is zero
    pub fn new(tile_size: usize) -> Result<Self> {
        if tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &"Tile size must be positive",
            ));
        }
        Ok(Self {
            tile_size,
            tiles: Vec::new(),
        })
    }

    /// Build a catalog from hand-written literals
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size is zero or any literal is malformed
    pub fn from_literals<'a, I>(tile_size: usize, literals: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut catalog = Self::new(tile_size)?;
        for literal in literals {
            catalog.push_literal(literal)?;
        }
        Ok(catalog)
    }

    /// Build a catalog from every K×K window of a rectangular text sample
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is ragged or smaller than one tile
    pub fn from_sample<S: AsRef<str>>(tile_size: usize, sample: &[S]) -> Result<Self> {
        let mut catalog = Self::new(tile_size)?;
        catalog.extract_windows(sample)?;
        Ok(catalog)
    }

    /// Append a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the tile size differs from the catalog's
    pub fn push(&mut self, tile: Tile) -> Result<TileId> {
        if tile.size() != self.tile_size {
            return Err(TilingError::TileSizeMismatch {
                expected: self.tile_size,
                found: tile.size(),
            });
        }
        self.tiles.push(tile);
        Ok(self.tiles.len() - 1)
    }

    /// Parse and append a literal
    ///
    /// # Errors
    ///
    /// Returns an error if the literal is not exactly K×K symbols
    pub fn push_literal(&mut self, literal: &str) -> Result<TileId> {
        let tile = Tile::from_literal(literal, self.tile_size)?;
        self.push(tile)
    }

    /// Append a base tile followed by its successive clockwise rotations
    ///
    /// `count` tiles are appended in total: the base, then 90°, 180°, 270°.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is outside 1..=4 or the literal is malformed
    pub fn push_rotations(&mut self, literal: &str, count: usize) -> Result<()> {
        if !(1..=4).contains(&count) {
            return Err(invalid_parameter(
                "rotations",
                &count,
                &"Rotation count must be between 1 and 4",
            ));
        }

        let mut tile = Tile::from_literal(literal, self.tile_size)?;
        for _ in 0..count {
            let next = tile.rotated();
            self.push(tile)?;
            tile = next;
        }
        Ok(())
    }

    /// Append every K×K window of a rectangular sample, returning how many were added
    ///
    /// # Errors
    ///
    /// Returns an error if rows differ in length or no complete window fits
    pub fn extract_windows<S: AsRef<str>>(&mut self, sample: &[S]) -> Result<usize> {
        let rows: Vec<Vec<char>> = sample
            .iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(index) = rows.iter().position(|row| row.len() != width) {
            return Err(invalid_parameter(
                "sample",
                &format!("row {}", index + 1),
                &format!("Sample rows must all be {width} symbols wide"),
            ));
        }

        let k = self.tile_size;
        if rows.len() < k || width < k {
            return Err(invalid_parameter(
                "sample",
                &format!("{}x{width}", rows.len()),
                &format!("Sample must be at least {k}x{k} symbols"),
            ));
        }

        let mut added = 0;
        for top in 0..=rows.len() - k {
            for left in 0..=width - k {
                let mut pixels = Vec::with_capacity(k * k);
                for row in rows.iter().skip(top).take(k) {
                    pixels.extend(row.iter().skip(left).take(k));
                }
                self.push(Tile::from_pixels(k, pixels.into_boxed_slice()))?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Edge length shared by every tile
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tiles have been added
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// All tiles in id order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Distinct symbols in order of first appearance across all tiles
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols = Vec::new();
        for tile in &self.tiles {
            for row in 0..tile.size() {
                for &symbol in tile.row(row).unwrap_or(&[]) {
                    if !symbols.contains(&symbol) {
                        symbols.push(symbol);
                    }
                }
            }
        }
        symbols
    }
}
