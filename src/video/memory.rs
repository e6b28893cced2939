/*!
memory: read-only views of captured video memory.

The renderers only need byte reads over the 14-bit PPU address space, so they
accept any `VideoMemory` instead of a concrete snapshot type. An engine can
implement the trait on its live PPU bus; offline tools use `VramSnapshot`.

Address Space Expectations (mirroring left to the implementor):
- 0x0000-0x1FFF : pattern tables
- 0x2000-0x2FFF : nametables + attribute tables
- 0x3F00-0x3F1F : palette RAM

`VramSnapshot` is a flat 16 KiB copy with no mirroring applied; reads are
masked to 14 bits.
*/

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Size of the PPU address space.
pub const VRAM_SIZE: usize = 0x4000;
/// Size of object attribute memory.
pub const OAM_SIZE: usize = 256;

/// Minimal interface the video renderers depend on for memory fetches.
pub trait VideoMemory {
    /// Read a byte from the PPU-visible address space. Must accept any
    /// 14-bit address (0x0000-0x3FFF).
    fn ppu_read(&self, addr: u16) -> u8;
}

impl<T: VideoMemory + ?Sized> VideoMemory for &T {
    #[inline]
    fn ppu_read(&self, addr: u16) -> u8 {
        (**self).ppu_read(addr)
    }
}

/// Point-in-time copy of video memory.
#[derive(Clone)]
pub struct VramSnapshot {
    bytes: Box<[u8; VRAM_SIZE]>,
}

impl Default for VramSnapshot {
    fn default() -> Self {
        Self {
            bytes: Box::new([0; VRAM_SIZE]),
        }
    }
}

impl std::fmt::Debug for VramSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VramSnapshot").finish_non_exhaustive()
    }
}

impl VramSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from exactly `VRAM_SIZE` bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != VRAM_SIZE {
            return Err(Error::SnapshotSize {
                what: "VRAM",
                expected: VRAM_SIZE,
                actual: data.len(),
            });
        }
        let mut snap = Self::new();
        snap.bytes.copy_from_slice(data);
        Ok(snap)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        log::debug!("loaded VRAM snapshot from {}", path.as_ref().display());
        Self::from_bytes(&data)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr as usize) & (VRAM_SIZE - 1)] = value;
    }

    /// Copy `data` starting at `addr` (wrapping within the 14-bit space).
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) {
        for (i, &b) in data.iter().enumerate() {
            self.write(addr.wrapping_add(i as u16), b);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl VideoMemory for VramSnapshot {
    #[inline]
    fn ppu_read(&self, addr: u16) -> u8 {
        self.bytes[(addr as usize) & (VRAM_SIZE - 1)]
    }
}

/// Copy of the 256-byte object attribute memory (64 entries of 4 bytes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMemory {
    bytes: [u8; OAM_SIZE],
}

impl Default for ObjectMemory {
    fn default() -> Self {
        Self {
            bytes: [0; OAM_SIZE],
        }
    }
}

impl ObjectMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let bytes: [u8; OAM_SIZE] = data.try_into().map_err(|_| Error::SnapshotSize {
            what: "OAM",
            expected: OAM_SIZE,
            actual: data.len(),
        })?;
        Ok(Self { bytes })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Overwrite entry `index` (0..64) with `[y, tile, attributes, x]`.
    pub fn set_entry(&mut self, index: usize, entry: [u8; 4]) {
        let base = (index % 64) * 4;
        self.bytes[base..base + 4].copy_from_slice(&entry);
    }

    #[inline]
    pub fn entry(&self, index: usize) -> [u8; 4] {
        let base = (index % 64) * 4;
        [
            self.bytes[base],
            self.bytes[base + 1],
            self.bytes[base + 2],
            self.bytes[base + 3],
        ]
    }

    pub fn as_bytes(&self) -> &[u8; OAM_SIZE] {
        &self.bytes
    }
}
