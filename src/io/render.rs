//! Text canvas rendering of grids and solutions
//!
//! Each cell expands to its tile's K×K glyphs, giving a canvas of
//! `rows·K` lines of `cols·K` glyphs.

use std::fs;
use std::path::Path;

use crate::algorithm::outcome::Solution;
use crate::io::error::{Result, TilingError};
use crate::spatial::{Grid, TileCatalog, TileId};

fn render_cells<F>(
    rows: usize,
    cols: usize,
    catalog: &TileCatalog,
    unfilled: char,
    lookup: F,
) -> Vec<String>
where
    F: Fn(usize, usize) -> Option<TileId>,
{
    let k = catalog.tile_size();
    let mut canvas = Vec::with_capacity(rows * k);

    for row in 0..rows {
        for tile_row in 0..k {
            let mut line = String::with_capacity(cols * k);
            for col in 0..cols {
                match lookup(row, col)
                    .and_then(|id| catalog.get(id))
                    .and_then(|tile| tile.row(tile_row))
                {
                    Some(glyphs) => line.extend(glyphs),
                    None => line.extend(std::iter::repeat_n(unfilled, k)),
                }
            }
            canvas.push(line);
        }
    }
    canvas
}

/// Render a complete tiling
pub fn render_solution(solution: &Solution, catalog: &TileCatalog) -> Vec<String> {
    render_cells(solution.rows(), solution.cols(), catalog, ' ', |row, col| {
        solution.tile_at([row, col])
    })
}

/// Render a possibly partial grid, drawing unfilled cells with `unfilled`
pub fn render_grid(grid: &Grid, catalog: &TileCatalog, unfilled: char) -> Vec<String> {
    render_cells(grid.rows(), grid.cols(), catalog, unfilled, |row, col| {
        grid.get([row, col])
    })
}

/// Write canvas lines to a text file, one line per row
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written
pub fn write_canvas(canvas: &[String], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let mut text = canvas.join("\n");
    text.push('\n');
    fs::write(output_path, text).map_err(|e| TilingError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write canvas",
        source: e,
    })
}
