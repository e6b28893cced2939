#![doc = r#"
Nametable renderer

Responsibilities
- Decode one 32x30 nametable plus its attribute block into a 256x240 image.
- Compose the four nametables ($2000, $2400, $2800, $2C00) into a 512x480
  overview laid out as NT0 NT1 / NT2 NT3.

Attribute decoding
- The 64-byte attribute block sits at nametable base + $3C0.
- Tile (col, row) uses byte `(row >> 2) * 8 + (col >> 2)` of that block.
- The 2-bit palette selector sits at bit offset
  `((((row >> 1) & 1) << 1) | ((col >> 1) & 1)) * 2`.

Notes
- No scrolling or mirroring is applied: each nametable is read at its own
  base address from the snapshot.
"#]

use crate::raster::RasterImage;
use crate::video::memory::VideoMemory;
use crate::video::palette::PaletteTable;
use crate::video::tile::{self, TILE_BYTES, TILE_SIZE};

pub const NAMETABLE_BASE: u16 = 0x2000;
pub const ATTRIBUTE_OFFSET: u16 = 0x3C0;
pub const TILES_X: usize = 32;
pub const TILES_Y: usize = 30;
pub const SCREEN_WIDTH: usize = TILES_X * TILE_SIZE;
pub const SCREEN_HEIGHT: usize = TILES_Y * TILE_SIZE;

/// Base address of nametable `sel` (0..=3).
#[inline]
pub fn nametable_address(sel: u8) -> u16 {
    NAMETABLE_BASE | (((sel & 3) as u16) << 10)
}

/// Background palette selector (0..=3) for tile (`col`, `row`).
#[inline]
pub fn attribute_palette(mem: &impl VideoMemory, nametable: u16, col: usize, row: usize) -> u8 {
    let addr = nametable
        .wrapping_add(ATTRIBUTE_OFFSET)
        .wrapping_add(((row >> 2) * 8 + (col >> 2)) as u16);
    let shift = ((((row >> 1) & 1) << 1) | ((col >> 1) & 1)) * 2;
    (mem.ppu_read(addr) >> shift) & 0x03
}

/// Draw the nametable at `nametable` with its top-left corner at (`ox`, `oy`).
pub fn draw_nametable(
    img: &mut RasterImage,
    mem: &impl VideoMemory,
    palettes: &PaletteTable,
    nametable: u16,
    pattern_base: u16,
    ox: usize,
    oy: usize,
) {
    for row in 0..TILES_Y {
        for col in 0..TILES_X {
            let tile_id = mem.ppu_read(nametable.wrapping_add((row * TILES_X + col) as u16));
            let pal = attribute_palette(mem, nametable, col, row);
            let addr = pattern_base.wrapping_add(tile_id as u16 * TILE_BYTES);
            tile::blit_tile(
                img,
                mem,
                addr,
                &palettes.background[pal as usize],
                ox + col * TILE_SIZE,
                oy + row * TILE_SIZE,
            );
        }
    }
}

/// Render a single nametable to a 256x240 image.
pub fn render_nametable(
    mem: &impl VideoMemory,
    palettes: &PaletteTable,
    sel: u8,
    pattern_base: u16,
) -> RasterImage {
    let mut img = RasterImage::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_nametable(&mut img, mem, palettes, nametable_address(sel), pattern_base, 0, 0);
    img
}

/// Render all four nametables into one 512x480 image.
pub fn render_nametables(
    mem: &impl VideoMemory,
    palettes: &PaletteTable,
    pattern_base: u16,
) -> RasterImage {
    let mut img = RasterImage::new(SCREEN_WIDTH * 2, SCREEN_HEIGHT * 2);
    for sel in 0..4u8 {
        let ox = (sel as usize & 1) * SCREEN_WIDTH;
        let oy = (sel as usize >> 1) * SCREEN_HEIGHT;
        draw_nametable(&mut img, mem, palettes, nametable_address(sel), pattern_base, ox, oy);
    }
    img
}
