//! Pattern table sheet: both pattern tables ($0000-$1FFF, 512 tiles) laid
//! out as 32x16 tiles (256x128 pixels) in a fixed grey ramp, so tile data
//! can be inspected without any palette.

use crate::raster::RasterImage;
use crate::video::memory::VideoMemory;
use crate::video::palette::{Palette, Rgb};
use crate::video::tile::{self, TILE_BYTES, TILE_SIZE};

pub const SHEET_TILES_X: usize = 32;
pub const SHEET_TILES_Y: usize = 16;

pub const GREY_RAMP: Palette = [
    Rgb::new(0, 0, 0),
    Rgb::new(100, 100, 100),
    Rgb::new(200, 200, 200),
    Rgb::new(255, 255, 255),
];

pub fn render_pattern_tables(mem: &impl VideoMemory) -> RasterImage {
    render_pattern_tables_with(mem, &GREY_RAMP)
}

/// Same layout as `render_pattern_tables` with a caller-supplied palette.
pub fn render_pattern_tables_with(mem: &impl VideoMemory, palette: &Palette) -> RasterImage {
    let mut img = RasterImage::new(SHEET_TILES_X * TILE_SIZE, SHEET_TILES_Y * TILE_SIZE);
    for index in 0..SHEET_TILES_X * SHEET_TILES_Y {
        let col = index % SHEET_TILES_X;
        let row = index / SHEET_TILES_X;
        tile::blit_tile(
            &mut img,
            mem,
            index as u16 * TILE_BYTES,
            palette,
            col * TILE_SIZE,
            row * TILE_SIZE,
        );
    }
    img
}
