/*!
instruction.rs - Decoded 6502 instruction model.

Overview
========
The emulation engine reports every retired instruction as an
`InstructionEvent`: the address of the *next* instruction, the mnemonic, the
addressing mode, the raw bytes and an operand bundle with three slots:

- slot 0 (`byte`):   operand byte for byte-width modes
- slot 1 (`word`):   operand word for word-width modes
- slot 2 (`branch`): (target, displacement) for relative branches

`Instruction::from_event` keeps only the slot that matters for the mode, so
once constructed the operand shape is fully determined by the mode tag.

Address Resolution
==================
The instruction address is never reported directly. It is recovered as
`next_pc - len(bytes)` with 16-bit wraparound, so an instruction whose last
byte sits at $FFFF (next_pc == $0000) resolves correctly.
*/

use crate::trace::opcodes;

/// 6502 mnemonics (official instruction set) plus the `Unknown` sentinel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    Unknown,
}

impl Mnemonic {
    /// Fixed 3-letter assembler name (`UNK` for unrecognized opcodes).
    pub fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Unknown => "UNK",
        }
    }
}

/// Addressing mode tag reported alongside each instruction.
///
/// `Implied` covers single-byte instructions (including the accumulator forms
/// of the shifts); `None` is what the engine reports for opcodes it does not
/// recognize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    /// `($hh,X)`
    IndexedIndirect,
    /// `($hh),Y`
    IndirectIndexed,
    Relative,
    None,
}

/// Width class of an addressing mode, i.e. which operand slot it reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandWidth {
    Byte,
    Word,
    Branch,
    Empty,
}

impl AddressingMode {
    pub fn operand_width(self) -> OperandWidth {
        use AddressingMode::*;
        match self {
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed => {
                OperandWidth::Byte
            }
            Absolute | AbsoluteX | AbsoluteY | Indirect => OperandWidth::Word,
            Relative => OperandWidth::Branch,
            Implied | None => OperandWidth::Empty,
        }
    }

    /// Encoded length in bytes (opcode included).
    pub fn instruction_len(self) -> usize {
        match self.operand_width() {
            OperandWidth::Byte | OperandWidth::Branch => 2,
            OperandWidth::Word => 3,
            OperandWidth::Empty => 1,
        }
    }
}

/// Mode-dependent operand of a decoded instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
    Branch { target: u16, displacement: i8 },
}

/// Three-slot operand bundle as delivered by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OperandBundle {
    pub byte: u8,
    pub word: u16,
    pub branch: (u16, i8),
}

/// Raw "instruction executed" event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionEvent {
    pub next_pc: u16,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub bytes: Vec<u8>,
    pub operands: OperandBundle,
}

impl InstructionEvent {
    /// Decode the instruction stored at `address` from raw memory bytes.
    ///
    /// This mirrors what the engine's decoder reports: the opcode table gives
    /// mnemonic and mode, the mode gives the length, and the operand bundle is
    /// filled from the bytes following the opcode. Missing trailing bytes read
    /// as zero. Relative targets are computed from the address after the
    /// operand, as the CPU does.
    pub fn decode(address: u16, memory: &[u8]) -> Self {
        let opcode = memory.first().copied().unwrap_or(0);
        let (mnemonic, mode) = opcodes::lookup(opcode);
        let len = mode.instruction_len();
        let bytes: Vec<u8> = (0..len)
            .map(|i| memory.get(i).copied().unwrap_or(0))
            .collect();
        let next_pc = address.wrapping_add(len as u16);

        let mut operands = OperandBundle::default();
        match mode.operand_width() {
            OperandWidth::Byte => operands.byte = bytes[1],
            OperandWidth::Word => operands.word = u16::from_le_bytes([bytes[1], bytes[2]]),
            OperandWidth::Branch => {
                let displacement = bytes[1] as i8;
                operands.branch = (next_pc.wrapping_add(displacement as u16), displacement);
            }
            OperandWidth::Empty => {}
        }

        Self {
            next_pc,
            mnemonic,
            mode,
            bytes,
            operands,
        }
    }
}

/// Decoded instruction stored in execution records and rendered by the formatter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub bytes: Vec<u8>,
    pub address: u16,
    pub operand: Operand,
}

impl Instruction {
    pub fn from_event(event: &InstructionEvent) -> Self {
        let operand = match event.mode.operand_width() {
            OperandWidth::Byte => Operand::Byte(event.operands.byte),
            OperandWidth::Word => Operand::Word(event.operands.word),
            OperandWidth::Branch => {
                let (target, displacement) = event.operands.branch;
                Operand::Branch {
                    target,
                    displacement,
                }
            }
            OperandWidth::Empty => Operand::None,
        };
        Self {
            mnemonic: event.mnemonic,
            mode: event.mode,
            bytes: event.bytes.clone(),
            address: resolve_address(event.next_pc, event.bytes.len()),
            operand,
        }
    }

    /// Number of bytes occupied by the instruction (at least 1 so table walks always advance).
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len().max(1)
    }
}

/// `(next_pc - len) mod 0x10000`.
#[inline]
pub fn resolve_address(next_pc: u16, len: usize) -> u16 {
    next_pc.wrapping_sub(len as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::event;

    #[test]
    fn operand_slot_follows_mode() {
        let bundle = OperandBundle {
            byte: 0x12,
            word: 0x3456,
            branch: (0x8010, -4),
        };

        let imm = event(0x8002, Mnemonic::Lda, AddressingMode::Immediate, &[0xA9, 0x12], bundle);
        assert_eq!(Instruction::from_event(&imm).operand, Operand::Byte(0x12));

        let abs = event(0x8003, Mnemonic::Sta, AddressingMode::AbsoluteX, &[0x9D, 0x56, 0x34], bundle);
        assert_eq!(Instruction::from_event(&abs).operand, Operand::Word(0x3456));

        let rel = event(0x8014, Mnemonic::Bne, AddressingMode::Relative, &[0xD0, 0xFC], bundle);
        assert_eq!(
            Instruction::from_event(&rel).operand,
            Operand::Branch {
                target: 0x8010,
                displacement: -4
            }
        );

        let imp = event(0x8001, Mnemonic::Inx, AddressingMode::Implied, &[0xE8], bundle);
        assert_eq!(Instruction::from_event(&imp).operand, Operand::None);
    }

    #[test]
    fn address_wraps_below_zero() {
        let ev = event(
            0x0000,
            Mnemonic::Jmp,
            AddressingMode::Absolute,
            &[0x4C, 0x00, 0x80],
            OperandBundle::default(),
        );
        assert_eq!(Instruction::from_event(&ev).address, 0xFFFD);
        assert_eq!(resolve_address(0x0001, 3), 0xFFFE);
    }

    #[test]
    fn decode_relative_branch_targets_after_operand() {
        // BNE -3 at $C000 -> next $C002, target $BFFF
        let ev = InstructionEvent::decode(0xC000, &[0xD0, 0xFD]);
        assert_eq!(ev.mnemonic, Mnemonic::Bne);
        assert_eq!(ev.mode, AddressingMode::Relative);
        assert_eq!(ev.next_pc, 0xC002);
        assert_eq!(ev.operands.branch, (0xBFFF, -3));
    }

    #[test]
    fn decode_pads_truncated_operands() {
        let ev = InstructionEvent::decode(0x8000, &[0xAD, 0x34]);
        assert_eq!(ev.bytes, vec![0xAD, 0x34, 0x00]);
        assert_eq!(ev.operands.word, 0x0034);
    }

    #[test]
    fn unknown_opcode_is_single_byte() {
        let ev = InstructionEvent::decode(0x8000, &[0x02, 0xFF]);
        assert_eq!(ev.mnemonic, Mnemonic::Unknown);
        assert_eq!(ev.mode, AddressingMode::None);
        assert_eq!(ev.bytes.len(), 1);
    }
}
