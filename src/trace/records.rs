/*!
records.rs - Execution records and the location arena.

Storage Layout
==============
- RAM: fixed $2000-slot table indexed by CPU address.
- ROM: one flat arena of `banks * $2000` slots indexed by
  `bank * $2000 + offset`, where `banks` is the number of 8 KiB PRG bank ids
  (two per 16 KiB PRG bank). The arena is sized once from `RomInfo` and never
  grows during a trace session.

Each slot holds at most one `ExecutionRecord`. The first visit stores the
decoded instruction; later visits only bump the counter.
*/

use crate::trace::banks::{Location, PRG_WINDOW_SIZE, RAM_TRACKED_END};
use crate::trace::instruction::{Instruction, InstructionEvent};

/// A decoded instruction and how many times it executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub instruction: Instruction,
    pub count: u64,
}

/// Outcome of `LocationTable::visit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Counter value after this visit.
    Counted(u64),
    /// ROM bank id outside the arena; nothing recorded.
    OutOfRange,
}

#[derive(Clone, Debug)]
pub struct LocationTable {
    ram: Vec<Option<ExecutionRecord>>,
    rom: Vec<Option<ExecutionRecord>>,
    rom_banks: usize,
}

impl LocationTable {
    /// Create an empty table with room for `rom_banks` 8 KiB PRG bank ids.
    pub fn new(rom_banks: usize) -> Self {
        Self {
            ram: vec![None; RAM_TRACKED_END as usize],
            rom: vec![None; rom_banks * PRG_WINDOW_SIZE],
            rom_banks,
        }
    }

    /// Number of 8 KiB ROM bank ids covered by the arena.
    #[inline]
    pub fn rom_banks(&self) -> usize {
        self.rom_banks
    }

    fn slot_index(&self, location: Location) -> Option<(bool, usize)> {
        match location {
            Location::Ram(addr) => {
                let i = addr as usize;
                (i < self.ram.len()).then_some((false, i))
            }
            Location::Rom { bank, offset } => {
                let bank = bank as usize;
                let offset = offset as usize;
                (bank < self.rom_banks && offset < PRG_WINDOW_SIZE)
                    .then_some((true, bank * PRG_WINDOW_SIZE + offset))
            }
        }
    }

    /// Lookup-or-create. The event is decoded only on the first visit.
    pub fn visit(&mut self, location: Location, event: &InstructionEvent) -> Visit {
        let Some((is_rom, index)) = self.slot_index(location) else {
            return Visit::OutOfRange;
        };
        let slot = if is_rom {
            &mut self.rom[index]
        } else {
            &mut self.ram[index]
        };
        let record = slot.get_or_insert_with(|| ExecutionRecord {
            instruction: Instruction::from_event(event),
            count: 0,
        });
        record.count += 1;
        Visit::Counted(record.count)
    }

    pub fn get(&self, location: Location) -> Option<&ExecutionRecord> {
        let (is_rom, index) = self.slot_index(location)?;
        if is_rom {
            self.rom[index].as_ref()
        } else {
            self.ram[index].as_ref()
        }
    }

    /// RAM slots in address order.
    #[inline]
    pub fn ram(&self) -> &[Option<ExecutionRecord>] {
        &self.ram
    }

    /// Slots of one 8 KiB ROM bank in offset order (empty slice if out of range).
    pub fn rom_bank(&self, bank: usize) -> &[Option<ExecutionRecord>] {
        if bank >= self.rom_banks {
            return &[];
        }
        let start = bank * PRG_WINDOW_SIZE;
        &self.rom[start..start + PRG_WINDOW_SIZE]
    }

    /// Number of distinct locations holding a record.
    pub fn len(&self) -> usize {
        self.ram.iter().chain(self.rom.iter()).flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.ram.fill(None);
        self.rom.fill(None);
    }
}
