/*!
palette: system colour table and the background/sprite palette tables.

Palette RAM layout read by `PaletteTable::from_vram`:
- 0x3F00-0x3F0F : four background palettes of four entries
- 0x3F10-0x3F1F : four sprite palettes of four entries

Each entry is a system palette index; only the low 6 bits are meaningful.
No palette mirroring is applied here; a snapshot is read as captured.
*/

use crate::video::memory::VideoMemory;

pub const BG_PALETTE_BASE: u16 = 0x3F00;
pub const SPRITE_PALETTE_BASE: u16 = 0x3F10;

/// 24-bit colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Four resolved colours selected by a 2-bit pixel index.
pub type Palette = [Rgb; 4];

/// Canonical (approximate) NES master palette.
const NES_PALETTE: [Rgb; 64] = [
    Rgb::new(0x75, 0x75, 0x75),
    Rgb::new(0x27, 0x1B, 0x8F),
    Rgb::new(0x00, 0x00, 0xAB),
    Rgb::new(0x47, 0x00, 0x9F),
    Rgb::new(0x8F, 0x00, 0x77),
    Rgb::new(0xAB, 0x00, 0x13),
    Rgb::new(0xA7, 0x00, 0x00),
    Rgb::new(0x7F, 0x0B, 0x00),
    Rgb::new(0x43, 0x2F, 0x00),
    Rgb::new(0x00, 0x47, 0x00),
    Rgb::new(0x00, 0x51, 0x00),
    Rgb::new(0x00, 0x3F, 0x17),
    Rgb::new(0x1B, 0x3F, 0x5F),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xBC, 0xBC, 0xBC),
    Rgb::new(0x00, 0x73, 0xEF),
    Rgb::new(0x23, 0x3B, 0xEF),
    Rgb::new(0x83, 0x00, 0xF3),
    Rgb::new(0xBF, 0x00, 0xBF),
    Rgb::new(0xE7, 0x00, 0x5B),
    Rgb::new(0xDB, 0x2B, 0x00),
    Rgb::new(0xCB, 0x4F, 0x0F),
    Rgb::new(0x8B, 0x73, 0x00),
    Rgb::new(0x00, 0x97, 0x00),
    Rgb::new(0x00, 0xAB, 0x00),
    Rgb::new(0x00, 0x93, 0x3B),
    Rgb::new(0x00, 0x83, 0x8B),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0x3F, 0xBF, 0xFF),
    Rgb::new(0x5F, 0x97, 0xFF),
    Rgb::new(0xA7, 0x8B, 0xFD),
    Rgb::new(0xF7, 0x7B, 0xFF),
    Rgb::new(0xFF, 0x77, 0xB7),
    Rgb::new(0xFF, 0x77, 0x63),
    Rgb::new(0xFF, 0x9B, 0x3B),
    Rgb::new(0xF3, 0xBF, 0x3F),
    Rgb::new(0x83, 0xD3, 0x13),
    Rgb::new(0x4F, 0xDF, 0x4B),
    Rgb::new(0x58, 0xF8, 0x98),
    Rgb::new(0x00, 0xEB, 0xDB),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xAB, 0xE7, 0xFF),
    Rgb::new(0xC7, 0xD7, 0xFF),
    Rgb::new(0xD7, 0xCB, 0xFF),
    Rgb::new(0xFF, 0xC7, 0xFF),
    Rgb::new(0xFF, 0xC7, 0xDB),
    Rgb::new(0xFF, 0xBF, 0xB3),
    Rgb::new(0xFF, 0xDB, 0xAB),
    Rgb::new(0xFF, 0xE7, 0xA3),
    Rgb::new(0xE3, 0xFF, 0xA3),
    Rgb::new(0xAB, 0xF3, 0xBF),
    Rgb::new(0xB3, 0xFF, 0xCF),
    Rgb::new(0x9F, 0xFF, 0xF3),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0x00),
];

/// Fixed 64-entry table mapping a colour index to RGB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemPalette {
    colors: [Rgb; 64],
}

impl Default for SystemPalette {
    fn default() -> Self {
        Self {
            colors: NES_PALETTE,
        }
    }
}

impl SystemPalette {
    pub fn new(colors: [Rgb; 64]) -> Self {
        Self { colors }
    }

    /// Colour for a raw palette byte (upper two bits ignored).
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[(index & 0x3F) as usize]
    }
}

/// Resolved background and sprite palettes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaletteTable {
    pub background: [Palette; 4],
    pub sprite: [Palette; 4],
}

impl PaletteTable {
    pub fn from_vram(mem: &impl VideoMemory, system: &SystemPalette) -> Self {
        Self {
            background: read_palettes(mem, system, BG_PALETTE_BASE),
            sprite: read_palettes(mem, system, SPRITE_PALETTE_BASE),
        }
    }
}

fn read_palettes(mem: &impl VideoMemory, system: &SystemPalette, base: u16) -> [Palette; 4] {
    std::array::from_fn(|p| {
        std::array::from_fn(|c| system.color(mem.ppu_read(base + (p * 4 + c) as u16)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::memory::VramSnapshot;

    #[test]
    fn system_palette_masks_index() {
        let sys = SystemPalette::default();
        assert_eq!(sys.color(0x30), Rgb::WHITE);
        assert_eq!(sys.color(0xF0), Rgb::WHITE);
        assert_eq!(sys.color(0x0F), Rgb::BLACK);
    }

    #[test]
    fn table_reads_both_halves() {
        let mut vram = VramSnapshot::new();
        vram.write_slice(0x3F00, &[0x0F, 0x30, 0x01, 0x02]);
        vram.write_slice(0x3F0C, &[0x0F, 0x16, 0x27, 0x18]);
        vram.write_slice(0x3F14, &[0x0F, 0x30, 0x30, 0xF0]);
        let sys = SystemPalette::default();
        let table = PaletteTable::from_vram(&vram, &sys);

        assert_eq!(table.background[0][1], Rgb::WHITE);
        assert_eq!(table.background[0][2], sys.color(0x01));
        assert_eq!(table.background[3][1], sys.color(0x16));
        assert_eq!(table.sprite[1], [Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::WHITE]);
        // untouched sprite palette 3 resolves colour 0
        assert_eq!(table.sprite[3], [sys.color(0); 4]);
    }
}
