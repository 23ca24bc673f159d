use super::layout::{LevelSlot, PayloadLayout};
use crate::error::{BchResult, MalformedContainerError};
use alloc::vec::Vec;
use ctr_texture_api::{Dimensions, PixelBuffer, PixelCodec};
use tracing::debug;

#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

/// A decoded texture level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage<P> {
    pub pixels: P,
    pub format_code: u8,
    /// Index of the command segment the level came from.
    pub entry: usize,
    pub level: u8,
}

impl<P: PixelBuffer> TextureImage<P> {
    /// Current size of the pixel buffer.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.pixels.dimensions()
    }
}

/// Size and format a texture level had when it was extracted.
///
/// Replacement images must match these, since payloads cannot move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureEntry {
    pub width: u32,
    pub height: u32,
    pub format_code: u8,
}

impl TextureEntry {
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

impl From<&LevelSlot> for TextureEntry {
    fn from(slot: &LevelSlot) -> Self {
        Self {
            width: slot.dimensions.width,
            height: slot.dimensions.height,
            format_code: slot.format_code,
        }
    }
}

/// Original size records of every slot, in image order.
pub fn original_entries(layout: &PayloadLayout) -> Vec<TextureEntry> {
    layout.slots.iter().map(TextureEntry::from).collect()
}

/// Decodes every level slot of `layout` from `data`.
///
/// Images come out in slot order (entry-major, level-minor). With the `multithreaded`
/// feature the levels are decoded on the rayon thread pool.
///
/// # Errors
///
/// The first slot that lies outside `data` or fails to decode aborts extraction.
pub fn extract_images<C: PixelCodec>(
    data: &[u8],
    layout: &PayloadLayout,
    codec: &C,
) -> BchResult<Vec<TextureImage<C::Pixels>>> {
    #[cfg(feature = "multithreaded")]
    let images = layout
        .slots
        .par_iter()
        .map(|slot| decode_slot(data, slot, codec))
        .collect::<BchResult<Vec<_>>>()?;

    #[cfg(not(feature = "multithreaded"))]
    let images = layout
        .slots
        .iter()
        .map(|slot| decode_slot(data, slot, codec))
        .collect::<BchResult<Vec<_>>>()?;

    debug!(images = images.len(), "Extracted texture levels");
    Ok(images)
}

fn decode_slot<C: PixelCodec>(
    data: &[u8],
    slot: &LevelSlot,
    codec: &C,
) -> BchResult<TextureImage<C::Pixels>> {
    let bytes = data
        .get(slot.range())
        .ok_or(MalformedContainerError::PayloadOutOfBounds {
            entry: slot.entry,
            level: slot.level,
            offset: slot.offset,
            length: slot.length,
            file_size: data.len(),
        })?;

    let swizzle = codec.swizzle(slot.dimensions);
    let pixels = codec.decode(bytes, slot.dimensions, slot.format_code, &swizzle)?;

    Ok(TextureImage {
        pixels,
        format_code: slot.format_code,
        entry: slot.entry,
        level: slot.level,
    })
}
