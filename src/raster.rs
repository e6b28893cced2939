/*!
raster: owned RGB pixel buffer and its serializers.

- `write_ppm` / `save_ppm`: plain-text PPM (`P3`): three header lines
  (`P3`, `width height`, `255`) then one `R G B` line per pixel, row-major.
- `save_png` / `to_rgb_image`: available with the `screenshot` feature.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::video::palette::Rgb;

/// Row-major RGB image, white when created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RasterImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::WHITE; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Set one pixel; coordinates outside the image are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Mutable view of row `y` (empty if out of range).
    pub fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        if y >= self.height {
            return &mut [];
        }
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    pub fn write_ppm(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for p in &self.pixels {
            writeln!(out, "{} {} {}", p.r, p.g, p.b)?;
        }
        Ok(())
    }

    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;
        log::info!("wrote {}x{} PPM to {}", self.width, self.height, path.display());
        Ok(())
    }

    #[cfg(feature = "screenshot")]
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            image::Rgb(self.pixels[y as usize * self.width + x as usize].to_array())
        })
    }

    #[cfg(feature = "screenshot")]
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!("wrote {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}
