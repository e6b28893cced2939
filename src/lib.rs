#![doc = r#"
nesscope library crate.

Runtime instrumentation and visualization for a running NES emulation: an
execution profiler/disassembler fed by engine callbacks, and decoders that
turn captured video memory into images.

Modules:
- access: memory access filter (region mask, READ/WRITE log lines)
- engine: interfaces expected from the emulation engine (mapper banking, ROM metadata, trace hooks)
- error: crate error type
- raster: RGB image buffer with PPM (and optional PNG) output
- trace: instruction model, disassembly formatter, bank-aware execution profiler
- video: tile, palette, nametable, sprite and pattern-table decoding

Features:
- screenshot: PNG output through the `image` crate

In tests, shared fixture builders are available under `crate::test_utils`.
"#]

pub mod access;
pub mod engine;
pub mod error;
pub mod raster;
pub mod trace;
pub mod video;

// Re-export commonly used types at the crate root for convenience.
pub use access::{MemoryAccess, MemoryAccessFilter, RegionMask};
pub use engine::{MapperState, RomInfo, TraceHooks};
pub use error::{Error, Result};
pub use raster::RasterImage;
pub use trace::{Instruction, InstructionEvent, TraceConfig, Tracer};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
