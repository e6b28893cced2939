/*!
sprite: object attribute decoding and the sprite sheet.

Each OAM entry is four bytes: Y, tile index, attributes, X.

Attribute bits:
- 0-1: sprite palette
- 5:   priority (behind background)
- 6:   horizontal flip
- 7:   vertical flip

Sprites are 8x8. Entries are drawn in ascending OAM order so later entries
overwrite earlier ones; colour index 0 is transparent. The priority bit is
decoded but not applied: the sheet has no background layer to sort against.
*/

use crate::raster::RasterImage;
use crate::video::memory::{ObjectMemory, VideoMemory};
use crate::video::palette::{Palette, PaletteTable, Rgb};
use crate::video::tile::{self, TILE_SIZE};

pub const SPRITE_COUNT: usize = 64;
pub const SHEET_SIZE: usize = 256;

const ATTR_PALETTE: u8 = 0x03;
const ATTR_PRIORITY: u8 = 0x20;
const ATTR_FLIP_H: u8 = 0x40;
const ATTR_FLIP_V: u8 = 0x80;

/// One decoded OAM entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectAttribute {
    pub y: u8,
    pub tile: u8,
    pub attributes: u8,
    pub x: u8,
}

impl ObjectAttribute {
    pub fn from_bytes([y, tile, attributes, x]: [u8; 4]) -> Self {
        Self {
            y,
            tile,
            attributes,
            x,
        }
    }

    #[inline]
    pub fn palette(&self) -> usize {
        (self.attributes & ATTR_PALETTE) as usize
    }

    #[inline]
    pub fn behind_background(&self) -> bool {
        self.attributes & ATTR_PRIORITY != 0
    }

    #[inline]
    pub fn flip_h(&self) -> bool {
        self.attributes & ATTR_FLIP_H != 0
    }

    #[inline]
    pub fn flip_v(&self) -> bool {
        self.attributes & ATTR_FLIP_V != 0
    }

    /// Pattern address of tile row `row` (0..8), vertical flip applied.
    #[inline]
    pub fn row_address(&self, pattern_base: u16, row: usize) -> u16 {
        let r = if self.flip_v() { row ^ 7 } else { row };
        pattern_base | ((self.tile as u16) << 4) | r as u16
    }

    /// Colour indices of row `row` in screen order (both flips applied).
    pub fn row_indices(&self, mem: &impl VideoMemory, pattern_base: u16, row: usize) -> [u8; TILE_SIZE] {
        let addr = self.row_address(pattern_base, row);
        let lo = mem.ppu_read(addr);
        let hi = mem.ppu_read(addr | 0x08);
        tile::row_indices(lo, hi, self.flip_h())
    }
}

impl ObjectMemory {
    /// All 64 entries in OAM order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectAttribute> + '_ {
        (0..SPRITE_COUNT).map(|i| ObjectAttribute::from_bytes(self.entry(i)))
    }
}

/// Draw one sprite; transparent and off-canvas pixels are skipped.
pub fn draw_sprite(
    img: &mut RasterImage,
    mem: &impl VideoMemory,
    object: &ObjectAttribute,
    palette: &Palette,
    pattern_base: u16,
) {
    for row in 0..TILE_SIZE {
        let y = object.y as i32 - 1 + row as i32;
        for (col, &ci) in object.row_indices(mem, pattern_base, row).iter().enumerate() {
            if ci == 0 {
                continue;
            }
            let x = object.x as i32 + col as i32;
            if x >= 0 && y >= 0 {
                img.set(x as usize, y as usize, palette[ci as usize]);
            }
        }
    }
}

/// Composite all sprites onto a 256x256 canvas filled with `backdrop`.
pub fn render_sprites(
    oam: &ObjectMemory,
    mem: &impl VideoMemory,
    palettes: &PaletteTable,
    pattern_base: u16,
    backdrop: Rgb,
) -> RasterImage {
    let mut img = RasterImage::new(SHEET_SIZE, SHEET_SIZE);
    img.fill(backdrop);
    for object in oam.objects() {
        draw_sprite(&mut img, mem, &object, &palettes.sprite[object.palette()], pattern_base);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{palette_table, write_tile};
    use crate::video::memory::VramSnapshot;

    fn arrow_tile() -> [[u8; 8]; 8] {
        let mut rows = [[0u8; 8]; 8];
        rows[0] = [1, 2, 3, 0, 0, 0, 0, 0];
        rows[7] = [0, 0, 0, 0, 0, 0, 0, 3];
        rows
    }

    #[test]
    fn attribute_bits() {
        let obj = ObjectAttribute::from_bytes([10, 4, 0b1110_0010, 20]);
        assert_eq!(obj.palette(), 2);
        assert!(obj.behind_background());
        assert!(obj.flip_h());
        assert!(obj.flip_v());
        assert_eq!(obj.row_address(0x1000, 0), 0x1047);
        assert_eq!(obj.row_address(0x1000, 7), 0x1040);
    }

    #[test]
    fn horizontal_flip_reverses_row() {
        let mut vram = VramSnapshot::new();
        write_tile(&mut vram, 0x0010, &arrow_tile());
        let plain = ObjectAttribute::from_bytes([0, 1, 0x00, 0]);
        let flipped = ObjectAttribute::from_bytes([0, 1, 0x40, 0]);

        let mut expected = plain.row_indices(&vram, 0, 0);
        assert_eq!(expected, [1, 2, 3, 0, 0, 0, 0, 0]);
        expected.reverse();
        assert_eq!(flipped.row_indices(&vram, 0, 0), expected);
    }

    #[test]
    fn vertical_flip_swaps_rows() {
        let mut vram = VramSnapshot::new();
        write_tile(&mut vram, 0x0010, &arrow_tile());
        let flipped = ObjectAttribute::from_bytes([0, 1, 0x80, 0]);
        assert_eq!(flipped.row_indices(&vram, 0, 0), [0, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(flipped.row_indices(&vram, 0, 7), [1, 2, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn sheet_positions_transparency_and_clipping() {
        let mut vram = VramSnapshot::new();
        write_tile(&mut vram, 0x0010, &arrow_tile());
        let palettes = palette_table();
        let mut oam = ObjectMemory::new();
        oam.set_entry(0, [11, 1, 0x01, 20]);
        // partly off the right edge
        oam.set_entry(1, [101, 1, 0x00, 254]);
        // remaining entries sit at Y=0 (first row clipped) with an empty tile 0

        let img = render_sprites(&oam, &vram, &palettes, 0x0000, Rgb::MAGENTA);
        assert_eq!(img.get(20, 10), Some(palettes.sprite[1][1]));
        assert_eq!(img.get(22, 10), Some(palettes.sprite[1][3]));
        assert_eq!(img.get(23, 10), Some(Rgb::MAGENTA));
        assert_eq!(img.get(27, 17), Some(palettes.sprite[1][3]));
        assert_eq!(img.get(254, 100), Some(palettes.sprite[0][1]));
        assert_eq!(img.get(255, 100), Some(palettes.sprite[0][2]));
    }

    #[test]
    fn later_entries_win() {
        let mut vram = VramSnapshot::new();
        write_tile(&mut vram, 0x0010, &[[1; 8]; 8]);
        let palettes = palette_table();
        let mut oam = ObjectMemory::new();
        oam.set_entry(0, [51, 1, 0x00, 50]);
        oam.set_entry(5, [51, 1, 0x03, 50]);
        let img = render_sprites(&oam, &vram, &palettes, 0x0000, Rgb::BLACK);
        assert_eq!(img.get(50, 50), Some(palettes.sprite[3][1]));
    }
}
