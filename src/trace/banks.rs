/*!
banks.rs - Bank-aware resolution of CPU addresses to canonical locations.

CPU address map as seen by the profiler:
- $0000-$1FFF: internal RAM (tracked by raw offset)
- $2000-$7FFF: I/O, expansion, SRAM (not tracked)
- $8000-$FFFF: four switchable 8 KiB PRG windows (tracked by bank + offset)

The same CPU address can execute code from different physical banks over
time, so ROM locations are keyed by the bank id found in the most recent
`BankSnapshot`, never by the CPU address alone.
*/

use crate::engine::{MapperState, PRG_WINDOWS};

pub const RAM_TRACKED_END: u16 = 0x2000;
pub const PRG_BASE: u16 = 0x8000;
pub const PRG_WINDOW_SIZE: usize = 0x2000;

/// Canonical identity of an executed instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Ram(u16),
    Rom { bank: u16, offset: u16 },
}

/// Cached bank identifiers for the four PRG windows.
///
/// Filled lazily on the first ROM-space instruction and dropped by
/// `invalidate`; the cache is not refreshed on every mapper write, so between
/// a bank switch and the next invalidation it may briefly be stale.
#[derive(Clone, Debug, Default)]
pub struct BankSnapshot {
    windows: Option<[u16; PRG_WINDOWS]>,
}

impl BankSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.windows = None;
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.windows.is_some()
    }

    /// Bank ids per window, fetching from `mapper` if not cached yet.
    #[inline]
    pub fn windows(&mut self, mapper: &dyn MapperState) -> [u16; PRG_WINDOWS] {
        *self.windows.get_or_insert_with(|| mapper.prg_windows())
    }

    /// Resolve an instruction address to its canonical location.
    /// Returns `None` for the untracked $2000-$7FFF range.
    pub fn resolve(&mut self, address: u16, mapper: &dyn MapperState) -> Option<Location> {
        if address < RAM_TRACKED_END {
            return Some(Location::Ram(address));
        }
        if address < PRG_BASE {
            return None;
        }
        let rel = (address - PRG_BASE) as usize;
        let window = rel / PRG_WINDOW_SIZE;
        let offset = (rel % PRG_WINDOW_SIZE) as u16;
        let bank = self.windows(mapper)[window];
        Some(Location::Rom { bank, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn ram_and_io_ranges() {
        let mut snap = BankSnapshot::new();
        let mapper = || [0u16, 1, 2, 3];
        assert_eq!(snap.resolve(0x0005, &mapper), Some(Location::Ram(0x0005)));
        assert_eq!(snap.resolve(0x1FFF, &mapper), Some(Location::Ram(0x1FFF)));
        assert_eq!(snap.resolve(0x2000, &mapper), None);
        assert_eq!(snap.resolve(0x7FFF, &mapper), None);
        assert!(!snap.is_loaded(), "RAM/IO lookups must not touch the mapper");
    }

    #[test]
    fn rom_windows_select_bank() {
        let mut snap = BankSnapshot::new();
        let mapper = || [6u16, 7, 14, 15];
        assert_eq!(
            snap.resolve(0x8010, &mapper),
            Some(Location::Rom { bank: 6, offset: 0x0010 })
        );
        assert_eq!(
            snap.resolve(0xBFFF, &mapper),
            Some(Location::Rom { bank: 7, offset: 0x1FFF })
        );
        assert_eq!(
            snap.resolve(0xC000, &mapper),
            Some(Location::Rom { bank: 14, offset: 0 })
        );
        assert_eq!(
            snap.resolve(0xFFFC, &mapper),
            Some(Location::Rom { bank: 15, offset: 0x1FFC })
        );
    }

    #[test]
    fn snapshot_is_fetched_once_until_invalidated() {
        let calls = Cell::new(0);
        let mapper = || {
            calls.set(calls.get() + 1);
            [0u16, 1, 2, 3]
        };
        let mut snap = BankSnapshot::new();
        snap.resolve(0x8000, &mapper);
        snap.resolve(0xE000, &mapper);
        assert_eq!(calls.get(), 1);

        snap.invalidate();
        snap.resolve(0x8000, &mapper);
        assert_eq!(calls.get(), 2);
    }
}
