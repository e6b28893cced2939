/*!
dump.rs - Execution profile report.

Report Layout
=============
ROM banks come first in ascending bank order, then RAM. Sections without any
record are omitted. Each section is introduced by a blank line and a title:

```text

## BANK 2 ##
[1] 2:0010 8010    a9 10       LDA #$10

## RAM ##
[2] 0:0005 0005    e8          INX
```

Inside a section the table is walked in offset order. A walk step over an
executed slot prints the entry and skips the instruction's remaining bytes;
any run of unexecuted slots between two entries collapses to one blank line.

Entry columns: `[count] bank:offset instruction`, where the counter is padded
to the decimal width of the largest counter in the session and the bank
number is zero-padded to the decimal width of the ROM bank total. RAM entries
always print bank `0` with width 1.
*/

use crate::trace::records::{ExecutionRecord, LocationTable};
use crate::trace::sink::TraceSink;

/// Number of decimal digits in `value` (at least 1).
pub(crate) fn decimal_width(value: u64) -> usize {
    let mut n = value;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

struct Section<'a> {
    title: String,
    bank: usize,
    bank_width: usize,
    slots: &'a [Option<ExecutionRecord>],
}

/// Write the whole report for `table` into `sink`.
pub fn write_report(table: &LocationTable, max_count: u64, sink: &mut impl TraceSink) {
    let count_width = decimal_width(max_count);
    let bank_width = decimal_width(table.rom_banks() as u64);

    let rom = (0..table.rom_banks()).map(|bank| Section {
        title: format!("BANK {bank}"),
        bank,
        bank_width,
        slots: table.rom_bank(bank),
    });
    let ram = std::iter::once(Section {
        title: "RAM".to_owned(),
        bank: 0,
        bank_width: 1,
        slots: table.ram(),
    });

    for section in rom.chain(ram) {
        if section.slots.iter().all(Option::is_none) {
            continue;
        }
        write_section(&section, count_width, sink);
    }
}

fn write_section(section: &Section<'_>, count_width: usize, sink: &mut impl TraceSink) {
    sink.line("");
    sink.line(&format!("## {} ##", section.title));

    let mut offset = 0usize;
    let mut printed_any = false;
    let mut gap = false;
    while offset < section.slots.len() {
        match &section.slots[offset] {
            None => {
                gap = printed_any;
                offset += 1;
            }
            Some(record) => {
                if gap {
                    sink.line("");
                }
                sink.line(&format!(
                    "[{:>cw$}] {:0bw$}:{:04X} {}",
                    record.count,
                    section.bank,
                    offset,
                    record.instruction,
                    cw = count_width,
                    bw = section.bank_width,
                ));
                printed_any = true;
                gap = false;
                offset += record.instruction.byte_len();
            }
        }
    }
}
