/*!
Video memory decoding (snapshot based, not tied to the trace event stream).

STRUCTURE:
- `memory`: `VideoMemory` read trait, `VramSnapshot`, `ObjectMemory`
- `palette`: system palette and background/sprite palette tables
- `tile`: 2bpp planar tile decoding
- `nametable`: attribute-driven background rendering
- `sprite`: OAM decoding and the sprite sheet
- `pattern`: pattern-table overview sheet

All renderers return a `RasterImage` owned by the caller.
*/

pub mod memory;
pub mod nametable;
pub mod palette;
pub mod pattern;
pub mod sprite;
pub mod tile;

pub use memory::{ObjectMemory, VideoMemory, VramSnapshot};
pub use palette::{Palette, PaletteTable, Rgb, SystemPalette};
pub use sprite::ObjectAttribute;
