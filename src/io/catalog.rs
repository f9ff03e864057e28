//! Built-in tile sets and catalog loading
//!
//! Catalog files are line based:
//!
//! ```text
//! # comment
//! size 3
//! tile " # ###   "
//! rotate 4 " # ##    "
//! ```
//!
//! `size` must come before any tile. Literals are read row-major between
//! double quotes, so spaces are significant.

use clap::ValueEnum;
use std::fs;
use std::path::Path;

use crate::io::error::{Result, TilingError};
use crate::spatial::TileCatalog;

const CORNER_TILES: [&str; 16] = [
    "    ", "#   ", " #  ", "  # ", "   #", "##  ", " ## ", "  ##", "#  #", "# # ", " # #", "### ",
    " ###", "# ##", "## #", "####",
];

const PIPE_TILES: [&str; 5] = [" # ###   ", " # ##  # ", " #  ## # ", "   ### # ", "         "];

// (rotations, literal)
const CIRCUIT_TILES: [(usize, &str); 13] = [
    (1, "                         "),
    (1, "#########################"),
    (4, "      ...  ...+ ...      "),
    (2, "          .....          "),
    (4, "#    #..  #...+#..  #    "),
    (4, "#                        "),
    (2, "          +++++          "),
    (2, "  .    .  ++.++  .    .  "),
    (4, "  .   ...  ...  ...   +  "),
    (4, "  +    +  +++++          "),
    (2, "  +     + +   + +     +  "),
    (4, "  +     +     +          "),
    (2, "      ... +...+ ...      "),
];

/// Hand-authored tile sets shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Sixteen 2x2 tiles covering every corner pattern
    #[default]
    Corners,
    /// Five 3x3 pipe tiles: four T-junctions and a blank
    Pipes,
    /// 5x5 circuit-board tiles expanded by rotation
    Circuit,
}

impl Preset {
    /// Edge length of the preset's tiles
    pub const fn tile_size(self) -> usize {
        match self {
            Self::Corners => 2,
            Self::Pipes => 3,
            Self::Circuit => 5,
        }
    }

    /// Build the preset's catalog
    ///
    /// # Errors
    ///
    /// Returns an error only if a built-in literal is malformed
    pub fn catalog(self) -> Result<TileCatalog> {
        match self {
            Self::Corners => TileCatalog::from_literals(self.tile_size(), CORNER_TILES),
            Self::Pipes => TileCatalog::from_literals(self.tile_size(), PIPE_TILES),
            Self::Circuit => {
                let mut catalog = TileCatalog::new(self.tile_size())?;
                for (rotations, literal) in CIRCUIT_TILES {
                    catalog.push_rotations(literal, rotations)?;
                }
                Ok(catalog)
            }
        }
    }
}

fn syntax_error(line: usize, reason: &impl ToString) -> TilingError {
    TilingError::CatalogSyntax {
        line,
        reason: reason.to_string(),
    }
}

fn quoted_literal(text: &str, line: usize) -> Result<&str> {
    text.trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| syntax_error(line, &"Tile literal must be enclosed in double quotes"))
}

/// Parse a catalog from the line-based text format
///
/// # Errors
///
/// Returns a `CatalogSyntax` error naming the offending line, or
/// `EmptyCatalog` if the text declares no tiles
pub fn parse_catalog(text: &str) -> Result<TileCatalog> {
    let mut catalog: Option<TileCatalog> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (keyword, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));

        match keyword {
            "size" => {
                if catalog.is_some() {
                    return Err(syntax_error(line, &"Tile size declared more than once"));
                }
                let size = rest
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| syntax_error(line, &format!("Invalid tile size: {e}")))?;
                catalog = Some(TileCatalog::new(size).map_err(|e| syntax_error(line, &e))?);
            }
            "tile" => {
                let target = catalog
                    .as_mut()
                    .ok_or_else(|| syntax_error(line, &"Tile size must be declared first"))?;
                target
                    .push_literal(quoted_literal(rest, line)?)
                    .map_err(|e| syntax_error(line, &e))?;
            }
            "rotate" => {
                let target = catalog
                    .as_mut()
                    .ok_or_else(|| syntax_error(line, &"Tile size must be declared first"))?;
                let (count, literal) = rest
                    .trim()
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| syntax_error(line, &"Expected a rotation count and a literal"))?;
                let count = count
                    .parse::<usize>()
                    .map_err(|e| syntax_error(line, &format!("Invalid rotation count: {e}")))?;
                target
                    .push_rotations(quoted_literal(literal, line)?, count)
                    .map_err(|e| syntax_error(line, &e))?;
            }
            other => {
                return Err(syntax_error(line, &format!("Unknown directive '{other}'")));
            }
        }
    }

    match catalog {
        Some(catalog) if !catalog.is_empty() => Ok(catalog),
        _ => Err(TilingError::EmptyCatalog),
    }
}

fn read_text(path: &Path, operation: &'static str) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TilingError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    })
}

/// Read and parse a catalog file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse
pub fn load_catalog_file(path: &Path) -> Result<TileCatalog> {
    parse_catalog(&read_text(path, "read catalog")?)
}

/// Build a catalog from every K×K window of a text sample file
///
/// Trailing blank lines are ignored; every other line is a sample row.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the sample is ragged or
/// too small
pub fn load_sample_file(path: &Path, tile_size: usize) -> Result<TileCatalog> {
    let text = read_text(path, "read sample")?;
    let mut rows: Vec<&str> = text.lines().collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    TileCatalog::from_sample(tile_size, &rows)
}
