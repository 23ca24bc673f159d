//! Pixel codec capability.
//!
//! Container crates locate texture payloads; a [`PixelCodec`] turns those payloads into
//! pixel buffers (and back). The container never looks inside a pixel buffer beyond its
//! dimensions, so any image representation can be plugged in.

mod linear;
mod raw;

pub use linear::*;
pub use raw::*;

use crate::error::CodecResult;
use crate::format::{Dimensions, FormatDescriptor, FormatRegistry};
use crate::swizzle::TileSwizzle;
use alloc::vec::Vec;

/// A decoded texture level.
pub trait PixelBuffer {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    #[inline]
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }
}

/// Converts texture payloads to pixel buffers and back.
///
/// Implementations are table driven: the [`FormatRegistry`] returned by
/// [`PixelCodec::registry`] decides which format codes exist and how many bits each
/// pixel takes. The pipeline uses that bit depth to size every payload it reads or
/// writes, so `encode` must produce exactly the number of bytes `decode` consumed.
pub trait PixelCodec: Send + Sync {
    /// Decoded representation of a single texture level.
    type Pixels: PixelBuffer + Send + Sync;

    /// Formats known to this codec.
    fn registry(&self) -> &FormatRegistry;

    /// Bit depth of a format code, or `None` if the code is not in the registry.
    #[inline]
    fn bits_per_pixel(&self, format_code: u8) -> Option<u32> {
        self.registry().bits_per_pixel(format_code)
    }

    /// Storage order used for a level of the given dimensions.
    #[inline]
    fn swizzle(&self, dimensions: Dimensions) -> TileSwizzle {
        TileSwizzle::new(dimensions)
    }

    /// Decodes one level's payload.
    fn decode(
        &self,
        bytes: &[u8],
        dimensions: Dimensions,
        format_code: u8,
        swizzle: &TileSwizzle,
    ) -> CodecResult<Self::Pixels>;

    /// Encodes one level back into its payload.
    fn encode(
        &self,
        pixels: &Self::Pixels,
        dimensions: Dimensions,
        format_code: u8,
        swizzle: &TileSwizzle,
    ) -> CodecResult<Vec<u8>>;
}

/// Looks up a format, mapping a miss to [`CodecError::UnknownFormatCode`].
///
/// [`CodecError::UnknownFormatCode`]: crate::CodecError::UnknownFormatCode
#[inline]
pub(crate) fn lookup_format(
    registry: &FormatRegistry,
    format_code: u8,
) -> CodecResult<&FormatDescriptor> {
    registry
        .get(format_code)
        .ok_or(crate::CodecError::UnknownFormatCode(format_code))
}

/// Checks a payload against the length implied by its format and dimensions.
#[inline]
pub(crate) fn check_payload_length(
    format: &FormatDescriptor,
    dimensions: Dimensions,
    actual: usize,
) -> CodecResult<usize> {
    let expected = format.payload_length(dimensions);
    if expected != actual {
        return Err(crate::CodecError::PayloadLengthMismatch { expected, actual });
    }

    Ok(expected)
}

/// Checks a pixel buffer against the dimensions it is being encoded as.
#[inline]
pub(crate) fn check_dimensions<P: PixelBuffer>(
    pixels: &P,
    dimensions: Dimensions,
) -> CodecResult<()> {
    if pixels.dimensions() != dimensions {
        return Err(crate::CodecError::DimensionMismatch {
            expected_width: dimensions.width,
            expected_height: dimensions.height,
            actual_width: pixels.width(),
            actual_height: pixels.height(),
        });
    }

    Ok(())
}
