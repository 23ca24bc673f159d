use super::extract::{TextureEntry, TextureImage};
use super::layout::{LevelSlot, PayloadLayout};
use crate::error::{BchError, BchResult, MalformedContainerError};
use alloc::vec::Vec;
use ctr_texture_api::{PixelBuffer, PixelCodec};
use tracing::debug;

#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

/// Checks that every image still has the size it was extracted with.
///
/// # Errors
///
/// - [`BchError::ImageCountMismatch`] if images were added or removed.
/// - [`BchError::SizeMismatch`] naming the first image whose size changed.
pub fn validate_images<P: PixelBuffer>(
    images: &[TextureImage<P>],
    originals: &[TextureEntry],
) -> BchResult<()> {
    if images.len() != originals.len() {
        return Err(BchError::ImageCountMismatch {
            expected: originals.len(),
            actual: images.len(),
        });
    }

    for (index, (image, original)) in images.iter().zip(originals).enumerate() {
        let actual = image.dimensions();
        if actual != original.dimensions() {
            return Err(BchError::SizeMismatch {
                index,
                expected_width: original.width,
                expected_height: original.height,
                actual_width: actual.width,
                actual_height: actual.height,
            });
        }
    }

    Ok(())
}

/// Validates and encodes every image into the payload of its slot.
///
/// Nothing is written; the result holds one payload per slot, in slot order, each
/// exactly as long as the slot. With the `multithreaded` feature the levels are encoded
/// on the rayon thread pool.
///
/// # Errors
///
/// - Anything [`validate_images`] reports.
/// - [`BchError::EncodedLengthMismatch`] if the codec produced a payload of a different
///   length than the one it replaces.
pub fn encode_images<C: PixelCodec>(
    layout: &PayloadLayout,
    originals: &[TextureEntry],
    images: &[TextureImage<C::Pixels>],
    codec: &C,
) -> BchResult<Vec<Vec<u8>>> {
    validate_images(images, originals)?;
    if layout.slots.len() != images.len() {
        return Err(BchError::ImageCountMismatch {
            expected: layout.slots.len(),
            actual: images.len(),
        });
    }

    #[cfg(feature = "multithreaded")]
    let payloads = layout
        .slots
        .par_iter()
        .zip(images.par_iter())
        .enumerate()
        .map(|(index, (slot, image))| encode_slot(index, slot, image, codec))
        .collect::<BchResult<Vec<_>>>()?;

    #[cfg(not(feature = "multithreaded"))]
    let payloads = layout
        .slots
        .iter()
        .zip(images)
        .enumerate()
        .map(|(index, (slot, image))| encode_slot(index, slot, image, codec))
        .collect::<BchResult<Vec<_>>>()?;

    Ok(payloads)
}

fn encode_slot<C: PixelCodec>(
    index: usize,
    slot: &LevelSlot,
    image: &TextureImage<C::Pixels>,
    codec: &C,
) -> BchResult<Vec<u8>> {
    let swizzle = codec.swizzle(slot.dimensions);
    let payload = codec.encode(&image.pixels, slot.dimensions, slot.format_code, &swizzle)?;
    if payload.len() != slot.length {
        return Err(BchError::EncodedLengthMismatch {
            index,
            expected: slot.length,
            actual: payload.len(),
        });
    }

    Ok(payload)
}

/// Overwrites each slot of `output` with its encoded payload.
///
/// `payloads` must come from [`encode_images`] for the same layout.
pub fn write_payloads(
    output: &mut [u8],
    layout: &PayloadLayout,
    payloads: &[Vec<u8>],
) -> BchResult<()> {
    let file_size = output.len();
    for (slot, payload) in layout.slots.iter().zip(payloads) {
        let target = output
            .get_mut(slot.range())
            .ok_or(MalformedContainerError::PayloadOutOfBounds {
                entry: slot.entry,
                level: slot.level,
                offset: slot.offset,
                length: slot.length,
                file_size,
            })?;
        target.copy_from_slice(payload);
    }

    debug!(levels = payloads.len(), "Wrote texture payloads");
    Ok(())
}

/// Re-encodes every image and patches it into a copy of `original`.
///
/// Validation and encoding finish before the copy is made, so a failure never yields
/// a partially patched container. Bytes outside the slots are kept as they are.
pub fn reinsert_images<C: PixelCodec>(
    original: &[u8],
    layout: &PayloadLayout,
    originals: &[TextureEntry],
    images: &[TextureImage<C::Pixels>],
    codec: &C,
) -> BchResult<Vec<u8>> {
    let payloads = encode_images(layout, originals, images, codec)?;
    let mut output = original.to_vec();
    write_payloads(&mut output, layout, &payloads)?;
    Ok(output)
}
