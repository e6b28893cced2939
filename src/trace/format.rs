/*!
format.rs - Fixed-width disassembly formatting for `Instruction`.

Line layout:

```text
8010    a9 10       LDA #$10
C004    d0 fd       BNE -3 ($c003)
0005    e8          INX
```

- 4-digit upper-case address, three spaces
- raw bytes as ` hh`, padded to three byte slots
- four spaces, the 3-letter mnemonic
- an operand suffix selected by addressing mode

An operand whose shape does not match the addressing mode (only possible for
hand-built `Instruction` values) renders as ` ???` instead of failing.
*/

use std::fmt;

use crate::trace::instruction::{AddressingMode, Instruction, Operand};

/// Placeholder emitted for a mode/operand pair with no formatting rule.
pub const OPERAND_PLACEHOLDER: &str = " ???";

const BYTE_SLOTS: usize = 3;

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}   ", self.address)?;
        for b in self.bytes.iter().take(BYTE_SLOTS) {
            write!(f, " {b:02x}")?;
        }
        for _ in self.bytes.len().min(BYTE_SLOTS)..BYTE_SLOTS {
            f.write_str("   ")?;
        }
        write!(f, "    {}", self.mnemonic.as_str())?;
        write_operand(f, self.mode, self.operand)
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, mode: AddressingMode, operand: Operand) -> fmt::Result {
    use AddressingMode as M;
    match (mode, operand) {
        (M::Implied | M::None, _) => Ok(()),
        (M::Immediate, Operand::Byte(v)) => write!(f, " #${v:02x}"),
        (M::ZeroPage, Operand::Byte(v)) => write!(f, " ${v:02x}"),
        (M::ZeroPageX, Operand::Byte(v)) => write!(f, " ${v:02x},X"),
        (M::ZeroPageY, Operand::Byte(v)) => write!(f, " ${v:02x},Y"),
        (M::IndexedIndirect, Operand::Byte(v)) => write!(f, " (${v:02x},X)"),
        (M::IndirectIndexed, Operand::Byte(v)) => write!(f, " (${v:02x}),Y"),
        (M::Absolute, Operand::Word(v)) => write!(f, " ${v:04x}"),
        (M::AbsoluteX, Operand::Word(v)) => write!(f, " ${v:04x},X"),
        (M::AbsoluteY, Operand::Word(v)) => write!(f, " ${v:04x},Y"),
        (M::Indirect, Operand::Word(v)) => write!(f, " (${v:04x})"),
        (
            M::Relative,
            Operand::Branch {
                target,
                displacement,
            },
        ) => write!(f, " {displacement} (${target:04x})"),
        _ => f.write_str(OPERAND_PLACEHOLDER),
    }
}
