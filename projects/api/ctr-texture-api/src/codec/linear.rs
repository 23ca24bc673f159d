use super::{check_dimensions, check_payload_length, lookup_format, PixelBuffer, PixelCodec};
use crate::error::{CodecError, CodecResult};
use crate::format::{Dimensions, FormatDescriptor, FormatRegistry, PixelLayout};
use crate::swizzle::TileSwizzle;
use alloc::vec;
use alloc::vec::Vec;

/// A texture level with its pixels in row-major order, top row first.
///
/// Each pixel keeps the byte layout of its hardware format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearPixels {
    pub dimensions: Dimensions,
    pub format_code: u8,
    pub bytes_per_pixel: usize,
    pub data: Vec<u8>,
}

impl LinearPixels {
    /// Bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }

        let start = (y as usize * self.dimensions.width as usize + x as usize) * self.bytes_per_pixel;
        self.data.get(start..start + self.bytes_per_pixel)
    }

    /// Mutable bytes of the pixel at `(x, y)`.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }

        let start = (y as usize * self.dimensions.width as usize + x as usize) * self.bytes_per_pixel;
        self.data.get_mut(start..start + self.bytes_per_pixel)
    }
}

impl PixelBuffer for LinearPixels {
    #[inline]
    fn width(&self) -> u32 {
        self.dimensions.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.dimensions.height
    }
}

/// Codec that untiles pixels into row-major order.
///
/// Supports formats whose pixels occupy a whole number of bytes and are stored
/// individually. 4-bit and ETC1 formats fail with [`CodecError::UnsupportedLayout`].
///
/// Stored pixels that fall outside the level (levels whose size is not a multiple of
/// the tile size) are dropped on decode and written as zero on encode.
#[derive(Debug, Clone, Default)]
pub struct LinearCodec {
    registry: FormatRegistry,
}

impl LinearCodec {
    pub fn new(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    fn bytes_per_pixel(&self, format_code: u8) -> CodecResult<(&FormatDescriptor, usize)> {
        let format = lookup_format(&self.registry, format_code)?;
        match (format.layout, format.bytes_per_pixel()) {
            (PixelLayout::Uncompressed, Some(bytes_per_pixel)) if bytes_per_pixel > 0 => {
                Ok((format, bytes_per_pixel))
            }
            _ => Err(CodecError::UnsupportedLayout {
                format_code,
                name: format.name,
            }),
        }
    }
}

impl PixelCodec for LinearCodec {
    type Pixels = LinearPixels;

    #[inline]
    fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    fn decode(
        &self,
        bytes: &[u8],
        dimensions: Dimensions,
        format_code: u8,
        swizzle: &TileSwizzle,
    ) -> CodecResult<LinearPixels> {
        let (format, bytes_per_pixel) = self.bytes_per_pixel(format_code)?;
        let length = check_payload_length(format, dimensions, bytes.len())?;

        let mut data = vec![0u8; length];
        for (index, stored) in bytes.chunks_exact(bytes_per_pixel).enumerate() {
            let (x, y) = swizzle.position(index as u32);
            if x >= dimensions.width || y >= dimensions.height {
                continue;
            }

            let start = (y as usize * dimensions.width as usize + x as usize) * bytes_per_pixel;
            data[start..start + bytes_per_pixel].copy_from_slice(stored);
        }

        Ok(LinearPixels {
            dimensions,
            format_code,
            bytes_per_pixel,
            data,
        })
    }

    fn encode(
        &self,
        pixels: &LinearPixels,
        dimensions: Dimensions,
        format_code: u8,
        swizzle: &TileSwizzle,
    ) -> CodecResult<Vec<u8>> {
        let (format, bytes_per_pixel) = self.bytes_per_pixel(format_code)?;
        check_dimensions(pixels, dimensions)?;
        let length = check_payload_length(format, dimensions, pixels.data.len())?;

        let mut output = vec![0u8; length];
        for (index, stored) in output.chunks_exact_mut(bytes_per_pixel).enumerate() {
            let (x, y) = swizzle.position(index as u32);
            if let Some(pixel) = pixels.pixel(x, y) {
                stored.copy_from_slice(pixel);
            }
        }

        Ok(output)
    }
}
