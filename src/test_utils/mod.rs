//! Shared test utilities for building trace events and video memory fixtures.
//!
//! These helpers de-duplicate fixture construction across the trace and video
//! tests. They support just what the test suite needs:
//! - hand-built `InstructionEvent`s with an explicit operand bundle (to model
//!   what an engine reports, including values `decode` would never produce)
//! - writing tiles into a `VramSnapshot` from 2-bit colour indices
//! - fixed palettes whose colours are all distinct

#![allow(dead_code)]

use crate::trace::{AddressingMode, InstructionEvent, Mnemonic, OperandBundle};
use crate::video::memory::VramSnapshot;
use crate::video::palette::{Palette, PaletteTable, Rgb};

/// Build an instruction event exactly as an engine would report it.
pub fn event(
    next_pc: u16,
    mnemonic: Mnemonic,
    mode: AddressingMode,
    bytes: &[u8],
    operands: OperandBundle,
) -> InstructionEvent {
    InstructionEvent {
        next_pc,
        mnemonic,
        mode,
        bytes: bytes.to_vec(),
        operands,
    }
}

/// Encode an 8x8 tile given as colour indices (0..=3) into its two bitplanes.
pub fn encode_tile(rows: &[[u8; 8]; 8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (r, row) in rows.iter().enumerate() {
        for (c, &ci) in row.iter().enumerate() {
            let bit = 7 - c;
            out[r] |= (ci & 1) << bit;
            out[r + 8] |= ((ci >> 1) & 1) << bit;
        }
    }
    out
}

/// Write an encoded tile into VRAM at `addr`.
pub fn write_tile(vram: &mut VramSnapshot, addr: u16, rows: &[[u8; 8]; 8]) {
    vram.write_slice(addr, &encode_tile(rows));
}

/// A 4-entry palette with distinct, easy to read colours.
pub fn test_palette() -> Palette {
    [
        Rgb::new(1, 1, 1),
        Rgb::new(10, 0, 0),
        Rgb::new(0, 20, 0),
        Rgb::new(0, 0, 30),
    ]
}

/// A palette table where every (half, palette, index) triple has a unique colour.
pub fn palette_table() -> PaletteTable {
    let make = |half: u8| -> [Palette; 4] {
        std::array::from_fn(|p| std::array::from_fn(|i| Rgb::new(half, p as u8 * 16 + 1, i as u8 * 40 + 1)))
    };
    PaletteTable {
        background: make(0),
        sprite: make(128),
    }
}

#[test]
fn encode_tile_places_planes() {
    let mut rows = [[0u8; 8]; 8];
    rows[0] = [1, 2, 3, 0, 0, 0, 0, 1];
    let bytes = encode_tile(&rows);
    assert_eq!(bytes[0], 0b1010_0001);
    assert_eq!(bytes[8], 0b0110_0000);
}
