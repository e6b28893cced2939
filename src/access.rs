/*!
Memory access filter: decides which CPU memory accesses get logged.

CPU address map used for classification:
- $0000-$1FFF: RAM
- $2000-$3FFF: PPU registers (mirrored every 8 bytes)   -> ports
- $4000-$4017: APU / OAM DMA / controller registers      -> ports
- $4018-$7FFF: test mode, expansion, SRAM                -> never logged
- $8000-$FFFF: cartridge PRG                             -> ROM

The filter runs on every memory operation the engine performs, so the check
is a range match plus a mask test and formatting only happens for accesses
that pass.
*/

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Regions whose accesses should be logged.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RegionMask: u8 {
        const ROM = 0x01;
        const RAM = 0x02;
        const PORTS = 0x04;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    Rom,
    Ram,
    Ports,
}

impl MemoryRegion {
    /// Region of a CPU address; `None` for the unlogged $4018-$7FFF band.
    #[inline]
    pub fn classify(address: u16) -> Option<Self> {
        match address {
            0x0000..=0x1FFF => Some(MemoryRegion::Ram),
            0x2000..=0x4017 => Some(MemoryRegion::Ports),
            0x4018..=0x7FFF => None,
            0x8000..=0xFFFF => Some(MemoryRegion::Rom),
        }
    }

    #[inline]
    pub fn mask(self) -> RegionMask {
        match self {
            MemoryRegion::Rom => RegionMask::ROM,
            MemoryRegion::Ram => RegionMask::RAM,
            MemoryRegion::Ports => RegionMask::PORTS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// One CPU memory operation reported by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemoryAccess {
    pub kind: AccessKind,
    pub address: u16,
    pub data: u8,
}

impl MemoryAccess {
    pub fn read(address: u16, data: u8) -> Self {
        Self {
            kind: AccessKind::Read,
            address,
            data,
        }
    }

    pub fn write(address: u16, data: u8) -> Self {
        Self {
            kind: AccessKind::Write,
            address,
            data,
        }
    }
}

impl fmt::Display for MemoryAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AccessKind::Read => write!(f, "READ  MEM[${:04X}] -> ${:02X}", self.address, self.data),
            AccessKind::Write => write!(f, "WRITE MEM[${:04X}] <- ${:02X}", self.address, self.data),
        }
    }
}

/// Region-mask filter. Holds no state besides the mask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryAccessFilter {
    mask: RegionMask,
}

impl MemoryAccessFilter {
    pub fn new(mask: RegionMask) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn mask(&self) -> RegionMask {
        self.mask
    }

    #[inline]
    pub fn set_mask(&mut self, mask: RegionMask) {
        self.mask = mask;
    }

    #[inline]
    pub fn accepts(&self, address: u16) -> bool {
        match MemoryRegion::classify(address) {
            Some(region) => self.mask.contains(region.mask()),
            None => false,
        }
    }

    /// Formatted log line for `access`, or `None` if filtered out.
    #[inline]
    pub fn filter(&self, access: &MemoryAccess) -> Option<String> {
        self.accepts(access.address).then(|| access.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_and_ports_mask() {
        let filter = MemoryAccessFilter::new(RegionMask::RAM | RegionMask::PORTS);
        assert!(filter.accepts(0x0010));
        assert!(!filter.accepts(0x9000));
        assert!(!filter.accepts(0x4018));
        assert!(filter.accepts(0x2002));
        assert!(filter.accepts(0x4016));
        assert!(filter.accepts(0x4017));
    }

    #[test]
    fn excluded_band_never_logs() {
        let filter = MemoryAccessFilter::new(RegionMask::all());
        for addr in [0x4018u16, 0x5000, 0x6000, 0x7FFF] {
            assert!(!filter.accepts(addr), "{addr:04X} should be excluded");
        }
        assert!(filter.accepts(0x8000));
    }

    #[test]
    fn empty_mask_logs_nothing() {
        let filter = MemoryAccessFilter::default();
        assert_eq!(filter.filter(&MemoryAccess::read(0x0000, 1)), None);
    }

    #[test]
    fn formatted_lines() {
        let filter = MemoryAccessFilter::new(RegionMask::RAM | RegionMask::ROM);
        assert_eq!(
            filter.filter(&MemoryAccess::read(0x0010, 0x42)).as_deref(),
            Some("READ  MEM[$0010] -> $42")
        );
        assert_eq!(
            filter.filter(&MemoryAccess::write(0x8000, 0x80)).as_deref(),
            Some("WRITE MEM[$8000] <- $80")
        );
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(MemoryRegion::classify(0x1FFF), Some(MemoryRegion::Ram));
        assert_eq!(MemoryRegion::classify(0x2000), Some(MemoryRegion::Ports));
        assert_eq!(MemoryRegion::classify(0x3FFF), Some(MemoryRegion::Ports));
        assert_eq!(MemoryRegion::classify(0x4000), Some(MemoryRegion::Ports));
        assert_eq!(MemoryRegion::classify(0x7FFF), None);
        assert_eq!(MemoryRegion::classify(0xFFFF), Some(MemoryRegion::Rom));
    }
}
