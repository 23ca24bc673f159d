use super::{check_dimensions, check_payload_length, lookup_format, PixelBuffer, PixelCodec};
use crate::error::CodecResult;
use crate::format::{Dimensions, FormatRegistry};
use crate::swizzle::TileSwizzle;
use alloc::vec::Vec;

/// A texture level kept in its stored form: tiled, in the hardware pixel format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPixels {
    pub dimensions: Dimensions,
    pub format_code: u8,
    pub bytes: Vec<u8>,
}

impl PixelBuffer for RawPixels {
    #[inline]
    fn width(&self) -> u32 {
        self.dimensions.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.dimensions.height
    }
}

/// Codec that hands out payload bytes verbatim.
///
/// Works for every format in its registry, including block-compressed ones, and
/// round-trips losslessly. Useful for dumping and patching payloads with external tools.
#[derive(Debug, Clone, Default)]
pub struct RawCodec {
    registry: FormatRegistry,
}

impl RawCodec {
    pub fn new(registry: FormatRegistry) -> Self {
        Self { registry }
    }
}

impl PixelCodec for RawCodec {
    type Pixels = RawPixels;

    #[inline]
    fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    fn decode(
        &self,
        bytes: &[u8],
        dimensions: Dimensions,
        format_code: u8,
        _swizzle: &TileSwizzle,
    ) -> CodecResult<RawPixels> {
        let format = lookup_format(&self.registry, format_code)?;
        check_payload_length(format, dimensions, bytes.len())?;

        Ok(RawPixels {
            dimensions,
            format_code,
            bytes: bytes.to_vec(),
        })
    }

    fn encode(
        &self,
        pixels: &RawPixels,
        dimensions: Dimensions,
        format_code: u8,
        _swizzle: &TileSwizzle,
    ) -> CodecResult<Vec<u8>> {
        let format = lookup_format(&self.registry, format_code)?;
        check_dimensions(pixels, dimensions)?;
        check_payload_length(format, dimensions, pixels.bytes.len())?;

        Ok(pixels.bytes.clone())
    }
}
