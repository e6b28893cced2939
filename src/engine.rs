/*!
engine: interfaces to the external emulation engine.

The engine (CPU/PPU/APU/mapper simulation and ROM loading) lives outside this
crate. This module defines the narrow surface the tracer and the renderers
need from it:

- `MapperState`: current PRG bank behind each 8 KiB window $8000-$FFFF.
- `RomInfo`: cartridge metadata, used to size the ROM execution arena.
- `TraceHooks`: the callbacks the engine invokes from its run loop.

Hook Semantics:
- Hooks are plain synchronous calls made once per retired instruction / per
  memory access, from the engine's own thread of control.
- Hooks must not block and never fail; anything unexpected is absorbed by the
  implementor (see `crate::trace::Tracer`).
- `on_mapper_changed` is called whenever the mapper is reconfigured. It only
  invalidates cached bank state; the new state is fetched lazily.
*/

use std::fmt;

use crate::access::MemoryAccess;
use crate::trace::InstructionEvent;

/// Number of 8 KiB PRG windows covering $8000-$FFFF.
pub const PRG_WINDOWS: usize = 4;

/// Read-only query of the mapper's current PRG banking.
///
/// Bank identifiers are in 8 KiB units: a cartridge with `n` 16 KiB PRG banks
/// exposes identifiers `0..2n`.
pub trait MapperState {
    /// Bank identifier currently mapped into each window
    /// ($8000, $A000, $C000, $E000).
    fn prg_windows(&self) -> [u16; PRG_WINDOWS];
}

impl<F> MapperState for F
where
    F: Fn() -> [u16; PRG_WINDOWS],
{
    #[inline]
    fn prg_windows(&self) -> [u16; PRG_WINDOWS] {
        self()
    }
}

/// Fixed mapping for 32 KiB NROM-style boards (banks 0..=3 in order).
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearPrg;

impl MapperState for LinearPrg {
    fn prg_windows(&self) -> [u16; PRG_WINDOWS] {
        [0, 1, 2, 3]
    }
}

/// Video standard reported by the cartridge header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TvMode {
    #[default]
    Ntsc,
    Pal,
}

impl fmt::Display for TvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TvMode::Ntsc => "NTSC",
            TvMode::Pal => "PAL",
        })
    }
}

/// Cartridge metadata as reported by the engine's ROM loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RomInfo {
    /// PRG ROM size in 16 KiB units.
    pub prg_banks: usize,
    /// CHR ROM size in 8 KiB units.
    pub chr_banks: usize,
    pub mapper: String,
    pub tv_mode: TvMode,
    pub has_sram: bool,
}

impl RomInfo {
    pub fn new(prg_banks: usize, chr_banks: usize, mapper: impl Into<String>) -> Self {
        Self {
            prg_banks,
            chr_banks,
            mapper: mapper.into(),
            tv_mode: TvMode::Ntsc,
            has_sram: false,
        }
    }

    /// Number of 8 KiB PRG bank identifiers (two per 16 KiB bank).
    #[inline]
    pub fn prg_windows_total(&self) -> usize {
        self.prg_banks * 2
    }
}

impl fmt::Display for RomInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NPrg (16K): {}", self.prg_banks)?;
        writeln!(f, "NChr (8K): {}", self.chr_banks)?;
        writeln!(f, "Mapper: {}", self.mapper)?;
        writeln!(f, "TV Mode: {}", self.tv_mode)?;
        write!(f, "SRAM: {}", self.has_sram)
    }
}

/// Callbacks driven by the engine's execution loop.
pub trait TraceHooks {
    /// An instruction retired. `mapper` is queried only when the cached bank
    /// snapshot is missing.
    fn on_instruction(&mut self, event: &InstructionEvent, mapper: &dyn MapperState);

    /// A CPU memory read or write happened.
    fn on_memory_access(&mut self, access: &MemoryAccess);

    /// The mapper was reconfigured.
    fn on_mapper_changed(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_act_as_mapper_state() {
        let banks = || [4u16, 5, 14, 15];
        assert_eq!(banks.prg_windows(), [4, 5, 14, 15]);
        assert_eq!(LinearPrg.prg_windows(), [0, 1, 2, 3]);
    }

    #[test]
    fn rom_summary_lists_metadata() {
        let mut info = RomInfo::new(8, 16, "MMC1");
        info.tv_mode = TvMode::Pal;
        info.has_sram = true;
        let text = info.to_string();
        assert!(text.contains("NPrg (16K): 8"));
        assert!(text.contains("NChr (8K): 16"));
        assert!(text.contains("Mapper: MMC1"));
        assert!(text.contains("TV Mode: PAL"));
        assert!(text.ends_with("SRAM: true"));
        assert_eq!(info.prg_windows_total(), 16);
    }
}
