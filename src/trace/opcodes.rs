/*!
opcodes.rs - 256-entry opcode decode table (official 6502 instruction set).

The table maps an opcode byte to its `(Mnemonic, AddressingMode)` pair. The
151 documented opcodes are populated; every other entry decodes as
`(Unknown, None)`, which the formatter renders as `UNK` with no operand.

The table is built at compile time by a `const fn` so lookups on the trace
hot path are a single indexed load.
*/

use crate::trace::instruction::{AddressingMode, Mnemonic};

type Entry = (Mnemonic, AddressingMode);

static TABLE: [Entry; 256] = build_table();

/// Mnemonic and addressing mode for an opcode byte.
#[inline]
pub fn lookup(opcode: u8) -> Entry {
    TABLE[opcode as usize]
}

const fn build_table() -> [Entry; 256] {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Entry; 256] = [(Unknown, AddressingMode::None); 256];
    t[0x00] = (Brk, Implied);
    t[0x01] = (Ora, IndexedIndirect);
    t[0x05] = (Ora, ZeroPage);
    t[0x06] = (Asl, ZeroPage);
    t[0x08] = (Php, Implied);
    t[0x09] = (Ora, Immediate);
    t[0x0A] = (Asl, Implied);
    t[0x0D] = (Ora, Absolute);
    t[0x0E] = (Asl, Absolute);
    t[0x10] = (Bpl, Relative);
    t[0x11] = (Ora, IndirectIndexed);
    t[0x15] = (Ora, ZeroPageX);
    t[0x16] = (Asl, ZeroPageX);
    t[0x18] = (Clc, Implied);
    t[0x19] = (Ora, AbsoluteY);
    t[0x1D] = (Ora, AbsoluteX);
    t[0x1E] = (Asl, AbsoluteX);
    t[0x20] = (Jsr, Absolute);
    t[0x21] = (And, IndexedIndirect);
    t[0x24] = (Bit, ZeroPage);
    t[0x25] = (And, ZeroPage);
    t[0x26] = (Rol, ZeroPage);
    t[0x28] = (Plp, Implied);
    t[0x29] = (And, Immediate);
    t[0x2A] = (Rol, Implied);
    t[0x2C] = (Bit, Absolute);
    t[0x2D] = (And, Absolute);
    t[0x2E] = (Rol, Absolute);
    t[0x30] = (Bmi, Relative);
    t[0x31] = (And, IndirectIndexed);
    t[0x35] = (And, ZeroPageX);
    t[0x36] = (Rol, ZeroPageX);
    t[0x38] = (Sec, Implied);
    t[0x39] = (And, AbsoluteY);
    t[0x3D] = (And, AbsoluteX);
    t[0x3E] = (Rol, AbsoluteX);
    t[0x40] = (Rti, Implied);
    t[0x41] = (Eor, IndexedIndirect);
    t[0x45] = (Eor, ZeroPage);
    t[0x46] = (Lsr, ZeroPage);
    t[0x48] = (Pha, Implied);
    t[0x49] = (Eor, Immediate);
    t[0x4A] = (Lsr, Implied);
    t[0x4C] = (Jmp, Absolute);
    t[0x4D] = (Eor, Absolute);
    t[0x4E] = (Lsr, Absolute);
    t[0x50] = (Bvc, Relative);
    t[0x51] = (Eor, IndirectIndexed);
    t[0x55] = (Eor, ZeroPageX);
    t[0x56] = (Lsr, ZeroPageX);
    t[0x58] = (Cli, Implied);
    t[0x59] = (Eor, AbsoluteY);
    t[0x5D] = (Eor, AbsoluteX);
    t[0x5E] = (Lsr, AbsoluteX);
    t[0x60] = (Rts, Implied);
    t[0x61] = (Adc, IndexedIndirect);
    t[0x65] = (Adc, ZeroPage);
    t[0x66] = (Ror, ZeroPage);
    t[0x68] = (Pla, Implied);
    t[0x69] = (Adc, Immediate);
    t[0x6A] = (Ror, Implied);
    t[0x6C] = (Jmp, Indirect);
    t[0x6D] = (Adc, Absolute);
    t[0x6E] = (Ror, Absolute);
    t[0x70] = (Bvs, Relative);
    t[0x71] = (Adc, IndirectIndexed);
    t[0x75] = (Adc, ZeroPageX);
    t[0x76] = (Ror, ZeroPageX);
    t[0x78] = (Sei, Implied);
    t[0x79] = (Adc, AbsoluteY);
    t[0x7D] = (Adc, AbsoluteX);
    t[0x7E] = (Ror, AbsoluteX);
    t[0x81] = (Sta, IndexedIndirect);
    t[0x84] = (Sty, ZeroPage);
    t[0x85] = (Sta, ZeroPage);
    t[0x86] = (Stx, ZeroPage);
    t[0x88] = (Dey, Implied);
    t[0x8A] = (Txa, Implied);
    t[0x8C] = (Sty, Absolute);
    t[0x8D] = (Sta, Absolute);
    t[0x8E] = (Stx, Absolute);
    t[0x90] = (Bcc, Relative);
    t[0x91] = (Sta, IndirectIndexed);
    t[0x94] = (Sty, ZeroPageX);
    t[0x95] = (Sta, ZeroPageX);
    t[0x96] = (Stx, ZeroPageY);
    t[0x98] = (Tya, Implied);
    t[0x99] = (Sta, AbsoluteY);
    t[0x9A] = (Txs, Implied);
    t[0x9D] = (Sta, AbsoluteX);
    t[0xA0] = (Ldy, Immediate);
    t[0xA1] = (Lda, IndexedIndirect);
    t[0xA2] = (Ldx, Immediate);
    t[0xA4] = (Ldy, ZeroPage);
    t[0xA5] = (Lda, ZeroPage);
    t[0xA6] = (Ldx, ZeroPage);
    t[0xA8] = (Tay, Implied);
    t[0xA9] = (Lda, Immediate);
    t[0xAA] = (Tax, Implied);
    t[0xAC] = (Ldy, Absolute);
    t[0xAD] = (Lda, Absolute);
    t[0xAE] = (Ldx, Absolute);
    t[0xB0] = (Bcs, Relative);
    t[0xB1] = (Lda, IndirectIndexed);
    t[0xB4] = (Ldy, ZeroPageX);
    t[0xB5] = (Lda, ZeroPageX);
    t[0xB6] = (Ldx, ZeroPageY);
    t[0xB8] = (Clv, Implied);
    t[0xB9] = (Lda, AbsoluteY);
    t[0xBA] = (Tsx, Implied);
    t[0xBC] = (Ldy, AbsoluteX);
    t[0xBD] = (Lda, AbsoluteX);
    t[0xBE] = (Ldx, AbsoluteY);
    t[0xC0] = (Cpy, Immediate);
    t[0xC1] = (Cmp, IndexedIndirect);
    t[0xC4] = (Cpy, ZeroPage);
    t[0xC5] = (Cmp, ZeroPage);
    t[0xC6] = (Dec, ZeroPage);
    t[0xC8] = (Iny, Implied);
    t[0xC9] = (Cmp, Immediate);
    t[0xCA] = (Dex, Implied);
    t[0xCC] = (Cpy, Absolute);
    t[0xCD] = (Cmp, Absolute);
    t[0xCE] = (Dec, Absolute);
    t[0xD0] = (Bne, Relative);
    t[0xD1] = (Cmp, IndirectIndexed);
    t[0xD5] = (Cmp, ZeroPageX);
    t[0xD6] = (Dec, ZeroPageX);
    t[0xD8] = (Cld, Implied);
    t[0xD9] = (Cmp, AbsoluteY);
    t[0xDD] = (Cmp, AbsoluteX);
    t[0xDE] = (Dec, AbsoluteX);
    t[0xE0] = (Cpx, Immediate);
    t[0xE1] = (Sbc, IndexedIndirect);
    t[0xE4] = (Cpx, ZeroPage);
    t[0xE5] = (Sbc, ZeroPage);
    t[0xE6] = (Inc, ZeroPage);
    t[0xE8] = (Inx, Implied);
    t[0xE9] = (Sbc, Immediate);
    t[0xEA] = (Nop, Implied);
    t[0xEC] = (Cpx, Absolute);
    t[0xED] = (Sbc, Absolute);
    t[0xEE] = (Inc, Absolute);
    t[0xF0] = (Beq, Relative);
    t[0xF1] = (Sbc, IndirectIndexed);
    t[0xF5] = (Sbc, ZeroPageX);
    t[0xF6] = (Inc, ZeroPageX);
    t[0xF8] = (Sed, Implied);
    t[0xF9] = (Sbc, AbsoluteY);
    t[0xFD] = (Sbc, AbsoluteX);
    t[0xFE] = (Inc, AbsoluteX);
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count() {
        let known = (0..=255u8)
            .filter(|&op| lookup(op).0 != Mnemonic::Unknown)
            .count();
        assert_eq!(known, 151);
    }

    #[test]
    fn spot_check_modes() {
        assert_eq!(lookup(0xA9), (Mnemonic::Lda, AddressingMode::Immediate));
        assert_eq!(lookup(0x6C), (Mnemonic::Jmp, AddressingMode::Indirect));
        assert_eq!(lookup(0xB6), (Mnemonic::Ldx, AddressingMode::ZeroPageY));
        assert_eq!(lookup(0x81), (Mnemonic::Sta, AddressingMode::IndexedIndirect));
        assert_eq!(lookup(0x91), (Mnemonic::Sta, AddressingMode::IndirectIndexed));
        assert_eq!(lookup(0x0A), (Mnemonic::Asl, AddressingMode::Implied));
        assert_eq!(lookup(0xFF), (Mnemonic::Unknown, AddressingMode::None));
    }
}
