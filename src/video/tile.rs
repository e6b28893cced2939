/*!
tile: 2bpp planar tile decoding.

A tile is 16 bytes: eight low-plane rows followed by eight high-plane rows at
+8. Pixel `x` of a row takes bit `7 - x` of the low byte as index bit 0 and
the same bit of the high byte as index bit 1.
*/

use crate::raster::RasterImage;
use crate::video::memory::VideoMemory;
use crate::video::palette::{Palette, Rgb};

pub const TILE_SIZE: usize = 8;
pub const TILE_BYTES: u16 = 16;

/// Colour indices (0..=3) of one tile row, leftmost pixel first.
/// With `reversed` the row is read LSB-first (horizontal flip).
#[inline]
pub fn row_indices(mut lo: u8, mut hi: u8, reversed: bool) -> [u8; TILE_SIZE] {
    let mut out = [0u8; TILE_SIZE];
    for px in out.iter_mut() {
        if reversed {
            *px = (lo & 1) | ((hi & 1) << 1);
            lo >>= 1;
            hi >>= 1;
        } else {
            *px = (lo >> 7) | ((hi >> 6) & 2);
            lo <<= 1;
            hi <<= 1;
        }
    }
    out
}

/// Resolved colours of one tile row (index 0 is drawn with `palette[0]`).
#[inline]
pub fn decode_row(lo: u8, hi: u8, palette: &Palette) -> [Rgb; TILE_SIZE] {
    row_indices(lo, hi, false).map(|i| palette[i as usize])
}

/// Colour indices of the whole tile whose pattern starts at `addr`.
pub fn tile_indices(mem: &impl VideoMemory, addr: u16) -> [[u8; TILE_SIZE]; TILE_SIZE] {
    std::array::from_fn(|row| {
        let lo = mem.ppu_read(addr.wrapping_add(row as u16));
        let hi = mem.ppu_read(addr.wrapping_add(row as u16 + 8));
        row_indices(lo, hi, false)
    })
}

/// Draw an opaque tile with its top-left corner at (`x`, `y`). Pixels falling
/// outside the image are clipped.
pub fn blit_tile(
    img: &mut RasterImage,
    mem: &impl VideoMemory,
    addr: u16,
    palette: &Palette,
    x: usize,
    y: usize,
) {
    for (row, indices) in tile_indices(mem, addr).iter().enumerate() {
        for (col, &ci) in indices.iter().enumerate() {
            img.set(x + col, y + row, palette[ci as usize]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_palette, write_tile};
    use crate::video::memory::VramSnapshot;

    #[test]
    fn low_plane_only_gives_index_one() {
        let pal = test_palette();
        assert_eq!(decode_row(0xFF, 0x00, &pal), [pal[1]; 8]);
        assert_eq!(decode_row(0x00, 0xFF, &pal), [pal[2]; 8]);
        assert_eq!(decode_row(0xFF, 0xFF, &pal), [pal[3]; 8]);
        assert_eq!(decode_row(0x00, 0x00, &pal), [pal[0]; 8]);
    }

    #[test]
    fn bit_order_is_msb_first() {
        assert_eq!(row_indices(0b1000_0001, 0b1100_0000, false), [3, 2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(row_indices(0b1000_0001, 0b1100_0000, true), [1, 0, 0, 0, 0, 0, 2, 3]);
    }

    #[test]
    fn blit_draws_index_zero_and_clips() {
        let mut vram = VramSnapshot::new();
        let mut rows = [[0u8; 8]; 8];
        rows[0] = [1, 0, 0, 0, 0, 0, 0, 2];
        write_tile(&mut vram, 0x0010, &rows);

        let pal = test_palette();
        let mut img = RasterImage::new(12, 12);
        blit_tile(&mut img, &vram, 0x0010, &pal, 6, 6);

        assert_eq!(img.get(6, 6), Some(pal[1]));
        assert_eq!(img.get(7, 6), Some(pal[0]));
        assert_eq!(img.get(11, 11), Some(pal[0]));
        // clipped half stays white
        assert_eq!(img.get(5, 6), Some(Rgb::WHITE));
    }
}
