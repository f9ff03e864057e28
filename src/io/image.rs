//! PNG export of a rendered canvas, one pixel per glyph

use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::spatial::TileCatalog;

/// Colours handed out to symbols in order of first appearance
const PALETTE: [[u8; 4]; 8] = [
    [24, 24, 32, 255],
    [230, 230, 220, 255],
    [64, 160, 96, 255],
    [220, 170, 40, 255],
    [70, 110, 200, 255],
    [200, 70, 70, 255],
    [150, 90, 190, 255],
    [60, 190, 190, 255],
];

/// Assign a palette colour to every symbol used by the catalog
///
/// Symbols beyond the palette length reuse colours cyclically.
pub fn build_palette(catalog: &TileCatalog) -> Vec<(char, [u8; 4])> {
    catalog
        .symbols()
        .into_iter()
        .enumerate()
        .map(|(index, symbol)| {
            let colour = PALETTE
                .get(index % PALETTE.len())
                .copied()
                .unwrap_or([0, 0, 0, 255]);
            (symbol, colour)
        })
        .collect()
}

/// Export a canvas as a PNG image with transparent unknown glyphs
///
/// Glyphs missing from the palette, such as the unfilled marker, are
/// written as transparent pixels.
///
/// # Errors
///
/// Returns an error if:
/// - The canvas has no glyphs
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_canvas_as_png(
    canvas: &[String],
    palette: &[(char, [u8; 4])],
    output_path: &Path,
) -> Result<()> {
    let width = canvas.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let height = canvas.len();
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "canvas",
            &format!("{height}x{width}"),
            &"Canvas has no glyphs to export",
        ));
    }

    let mut img: RgbaImage = ImageBuffer::new(width as u32, height as u32);

    for (y, line) in canvas.iter().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            let rgba = palette
                .iter()
                .find(|(symbol, _)| *symbol == glyph)
                .map_or([0, 0, 0, 0], |&(_, colour)| colour);
            img.put_pixel(x as u32, y as u32, Rgba(rgba));
        }
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| TilingError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
