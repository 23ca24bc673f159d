//! Format-code table for PICA200 textures.
//!
//! Container formats only store a 4-bit format code per texture. Everything else the
//! pipeline needs to know about a format (bit depth, whether pixels are stored
//! individually or as compressed blocks) comes from a [`FormatRegistry`].
//!
//! The registry is pre-populated with the hardware formats via [`FormatRegistry::pica`]
//! and can be extended with [`FormatRegistry::register`] without touching the pipeline.

pub mod constants;

use alloc::collections::BTreeMap;
use constants::*;
use tracing::debug;

/// Width and height of a single texture level, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of mip level `level`, derived by halving `level` times.
    ///
    /// Levels that shrink below a pixel produce a zero dimension; nothing is clamped.
    #[inline]
    pub fn mip_level(self, level: u8) -> Self {
        Self {
            width: self.width.checked_shr(level as u32).unwrap_or(0),
            height: self.height.checked_shr(level as u32).unwrap_or(0),
        }
    }

    #[inline]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How pixels of a format are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Each pixel is stored on its own, tiled by the [`TileSwizzle`](crate::TileSwizzle).
    Uncompressed,
    /// Pixels are stored as 4x4 ETC1 blocks.
    Etc1Block,
}

/// Describes one texture format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    pub name: &'static str,
    pub bits_per_pixel: u32,
    pub layout: PixelLayout,
}

impl FormatDescriptor {
    pub const fn new(name: &'static str, bits_per_pixel: u32, layout: PixelLayout) -> Self {
        Self {
            name,
            bits_per_pixel,
            layout,
        }
    }

    /// Byte length of a level with the given dimensions: `width * height * bpp / 8`.
    ///
    /// The division truncates; levels smaller than a byte report zero.
    #[inline]
    pub const fn payload_length(&self, dimensions: Dimensions) -> usize {
        dimensions.pixel_count() * self.bits_per_pixel as usize / 8
    }

    /// Bytes per pixel, if the format stores each pixel in a whole number of bytes.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> Option<usize> {
        if self.bits_per_pixel % 8 == 0 {
            Some(self.bits_per_pixel as usize / 8)
        } else {
            None
        }
    }
}

/// Lookup table from format code to [`FormatDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRegistry {
    formats: BTreeMap<u8, FormatDescriptor>,
}

impl FormatRegistry {
    /// An empty registry. Every lookup fails until formats are registered.
    pub fn empty() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    /// The registry of formats supported by the PICA200 texture units.
    pub fn pica() -> Self {
        use PixelLayout::*;

        let mut registry = Self::empty();
        registry.register(FORMAT_RGBA8, FormatDescriptor::new("RGBA8", 32, Uncompressed));
        registry.register(FORMAT_RGB8, FormatDescriptor::new("RGB8", 24, Uncompressed));
        registry.register(FORMAT_RGBA5551, FormatDescriptor::new("RGBA5551", 16, Uncompressed));
        registry.register(FORMAT_RGB565, FormatDescriptor::new("RGB565", 16, Uncompressed));
        registry.register(FORMAT_RGBA4, FormatDescriptor::new("RGBA4", 16, Uncompressed));
        registry.register(FORMAT_LA8, FormatDescriptor::new("LA8", 16, Uncompressed));
        registry.register(FORMAT_HILO8, FormatDescriptor::new("HILO8", 16, Uncompressed));
        registry.register(FORMAT_L8, FormatDescriptor::new("L8", 8, Uncompressed));
        registry.register(FORMAT_A8, FormatDescriptor::new("A8", 8, Uncompressed));
        registry.register(FORMAT_LA4, FormatDescriptor::new("LA4", 8, Uncompressed));
        registry.register(FORMAT_L4, FormatDescriptor::new("L4", 4, Uncompressed));
        registry.register(FORMAT_A4, FormatDescriptor::new("A4", 4, Uncompressed));
        registry.register(FORMAT_ETC1, FormatDescriptor::new("ETC1", 4, Etc1Block));
        registry.register(FORMAT_ETC1A4, FormatDescriptor::new("ETC1A4", 8, Etc1Block));
        registry
    }

    /// Adds a format, replacing (and returning) any previous entry for the same code.
    pub fn register(
        &mut self,
        format_code: u8,
        descriptor: FormatDescriptor,
    ) -> Option<FormatDescriptor> {
        let previous = self.formats.insert(format_code, descriptor);
        if let Some(previous) = &previous {
            debug!(
                format_code,
                replaced = previous.name,
                name = descriptor.name,
                "Replaced texture format"
            );
        }

        previous
    }

    #[inline]
    pub fn get(&self, format_code: u8) -> Option<&FormatDescriptor> {
        self.formats.get(&format_code)
    }

    #[inline]
    pub fn bits_per_pixel(&self, format_code: u8) -> Option<u32> {
        self.get(format_code).map(|format| format.bits_per_pixel)
    }

    #[inline]
    pub fn contains(&self, format_code: u8) -> bool {
        self.formats.contains_key(&format_code)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::pica()
    }
}
