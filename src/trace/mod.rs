/*!
Execution tracing: per-location instruction profile, live disassembly and
memory access logging.

STRUCTURE:
- `instruction`: decoded instruction model and raw engine events
- `opcodes`: 256-entry opcode table (official 6502 set)
- `format`: fixed-width disassembly line (`Display for Instruction`)
- `banks`: bank snapshot and CPU address -> canonical location resolution
- `records`: RAM table + fixed ROM arena of execution records
- `dump`: profile report
- `sink`: where trace text goes

`Tracer` ties these together and implements `TraceHooks`, so an engine can
drive it directly from its run loop:

```
use nesscope::engine::{LinearPrg, RomInfo, TraceHooks};
use nesscope::trace::{InstructionEvent, Tracer};

let mut tracer = Tracer::with_sink(&RomInfo::new(2, 1, "NROM"), Vec::<String>::new());
tracer.on_instruction(&InstructionEvent::decode(0x8000, &[0xEA]), &LinearPrg);
assert_eq!(tracer.max_count(), 1);
```

NOTES:
- Hooks never fail. Unexpected input (bank ids outside the arena, sink
  errors) is reported through `log::warn!` and otherwise ignored. Each
  out-of-arena bank id is warned about once; later hits are only counted.
- The ROM arena is sized once from `RomInfo` (two 8 KiB bank ids per 16 KiB
  PRG bank) and never grows.
*/

pub mod banks;
pub mod dump;
pub mod format;
pub mod instruction;
pub mod opcodes;
pub mod records;
pub mod sink;


pub use banks::{BankSnapshot, Location};
pub use instruction::{
    AddressingMode, Instruction, InstructionEvent, Mnemonic, Operand, OperandBundle,
};
pub use records::{ExecutionRecord, LocationTable, Visit};
pub use sink::{LogSink, TraceSink, WriterSink};

use crate::access::{MemoryAccess, MemoryAccessFilter, RegionMask};
use crate::engine::{MapperState, RomInfo, TraceHooks};

/// Runtime switches for a trace session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceConfig {
    /// Stream every retired instruction to the sink as it executes.
    pub print_instructions: bool,
    /// Regions whose memory accesses are written to the sink.
    pub access_mask: RegionMask,
}

impl TraceConfig {
    pub fn enable_print_instructions(mut self, enabled: bool) -> Self {
        self.print_instructions = enabled;
        self
    }

    pub fn enable_print_memory_access(mut self, mask: RegionMask) -> Self {
        self.access_mask = mask;
        self
    }
}

/// Execution tracer context.
///
/// Owns the location table, the bank snapshot, the access filter and the
/// output sink for the lifetime of a trace session.
pub struct Tracer<S: TraceSink = LogSink> {
    table: LocationTable,
    banks: BankSnapshot,
    filter: MemoryAccessFilter,
    print_instructions: bool,
    max_count: u64,
    skipped: u64,
    rejected_banks: Vec<u16>,
    sink: S,
}

impl Tracer<LogSink> {
    /// Tracer writing to the `log` facade with printing disabled.
    pub fn new(rom: &RomInfo) -> Self {
        Self::with_config(rom, TraceConfig::default(), LogSink)
    }
}

impl<S: TraceSink> Tracer<S> {
    pub fn with_sink(rom: &RomInfo, sink: S) -> Self {
        Self::with_config(rom, TraceConfig::default(), sink)
    }

    pub fn with_config(rom: &RomInfo, config: TraceConfig, sink: S) -> Self {
        log::debug!(
            "tracer: {} PRG bank ids, mapper {}",
            rom.prg_windows_total(),
            rom.mapper
        );
        Self {
            table: LocationTable::new(rom.prg_windows_total()),
            banks: BankSnapshot::new(),
            filter: MemoryAccessFilter::new(config.access_mask),
            print_instructions: config.print_instructions,
            max_count: 0,
            skipped: 0,
            rejected_banks: Vec::new(),
            sink,
        }
    }

    #[inline]
    pub fn enable_print_instructions(&mut self, enabled: bool) {
        self.print_instructions = enabled;
    }

    #[inline]
    pub fn enable_print_memory_access(&mut self, mask: RegionMask) {
        self.filter.set_mask(mask);
    }

    #[inline]
    pub fn config(&self) -> TraceConfig {
        TraceConfig {
            print_instructions: self.print_instructions,
            access_mask: self.filter.mask(),
        }
    }

    #[inline]
    pub fn records(&self) -> &LocationTable {
        &self.table
    }

    /// Largest execution counter seen so far.
    #[inline]
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Instructions left out of the profile because their bank id fell
    /// outside the ROM arena.
    #[inline]
    pub fn skipped_instructions(&self) -> u64 {
        self.skipped
    }

    /// Out-of-arena bank ids seen so far, in first-seen order.
    #[inline]
    pub fn rejected_banks(&self) -> &[u16] {
        &self.rejected_banks
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Write the profile report to an arbitrary sink.
    pub fn dump_to(&self, out: &mut impl TraceSink) {
        dump::write_report(&self.table, self.max_count, out);
    }

    /// Write the profile report to the tracer's own sink.
    pub fn dump(&mut self) {
        dump::write_report(&self.table, self.max_count, &mut self.sink);
    }

    pub fn dump_to_string(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        self.dump_to(&mut lines);
        let mut text = lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Drop all records and the cached bank snapshot.
    pub fn reset(&mut self) {
        self.table.clear();
        self.banks.invalidate();
        self.max_count = 0;
        self.skipped = 0;
        self.rejected_banks.clear();
    }

    fn reject(&mut self, address: u16, location: Location) {
        self.skipped += 1;
        let Location::Rom { bank, .. } = location else {
            return;
        };
        if !self.rejected_banks.contains(&bank) {
            self.rejected_banks.push(bank);
            log::warn!(
                "instruction at {address:04X} maps to bank {bank}, outside the {} bank ROM arena; \
                 further hits on this bank are not reported",
                self.table.rom_banks()
            );
        }
    }
}

impl<S: TraceSink> TraceHooks for Tracer<S> {
    fn on_instruction(&mut self, event: &InstructionEvent, mapper: &dyn MapperState) {
        let address = instruction::resolve_address(event.next_pc, event.bytes.len());
        if let Some(location) = self.banks.resolve(address, mapper) {
            match self.table.visit(location, event) {
                Visit::Counted(count) => self.max_count = self.max_count.max(count),
                Visit::OutOfRange => self.reject(address, location),
            }
        }
        if self.print_instructions {
            let line = Instruction::from_event(event).to_string();
            self.sink.line(&line);
        }
    }

    #[inline]
    fn on_memory_access(&mut self, access: &MemoryAccess) {
        if let Some(line) = self.filter.filter(access) {
            self.sink.line(&line);
        }
    }

    fn on_mapper_changed(&mut self) {
        self.banks.invalidate();
    }
}

/// Linear-sweep disassembly of `bytes` loaded at `base`.
///
/// Every byte is treated as code; unknown opcodes decode as one-byte `UNK`
/// entries so the sweep always makes progress. Addresses wrap at $FFFF.
pub fn disassemble(base: u16, bytes: &[u8]) -> Vec<Instruction> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let address = base.wrapping_add(offset as u16);
        let event = InstructionEvent::decode(address, &bytes[offset..]);
        let instruction = Instruction::from_event(&event);
        offset += instruction.byte_len();
        out.push(instruction);
    }
    out
}
