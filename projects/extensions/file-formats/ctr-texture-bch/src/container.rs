//! In-memory BCH container with its extracted texture levels.

use crate::bch::{parse_header, BchHeader};
use crate::error::{BchError, BchResult, MalformedContainerError};
use crate::pica::{decode_texture_units, TextureUnitConfig};
use crate::pipeline::*;
use alloc::vec::Vec;
use ctr_texture_api::PixelCodec;
use tracing::debug;

/// A parsed BCH file together with every texture level it embeds.
///
/// Images can be edited in place or swapped out between loading and saving, as long as
/// each keeps the size it was extracted with. Everything else in the file is written
/// back untouched.
pub struct BchContainer<C: PixelCodec> {
    data: Vec<u8>,
    header: BchHeader,
    texture_units: Vec<TextureUnitConfig>,
    layout: PayloadLayout,
    entries: Vec<TextureEntry>,
    images: Vec<TextureImage<C::Pixels>>,
    codec: C,
}

impl<C: PixelCodec> BchContainer<C> {
    /// Parses a container and extracts all of its texture levels with `codec`.
    ///
    /// # Errors
    ///
    /// - [`BchError::MalformedContainer`] if the header, command stream or a payload
    ///   location is invalid.
    /// - [`BchError::UnsupportedFormatCode`] if a texture uses a format missing from the
    ///   codec's registry.
    /// - [`BchError::Codec`] if the codec fails to decode a level.
    pub fn from_bytes(data: &[u8], codec: C) -> BchResult<Self> {
        Self::from_vec(data.to_vec(), codec)
    }

    /// Same as [`BchContainer::from_bytes`], taking ownership of the buffer.
    pub fn from_vec(data: Vec<u8>, codec: C) -> BchResult<Self> {
        let header = parse_header(&data)?;
        if !header.has_texture_data() {
            debug!("BCH file has no texture data");
            return Ok(Self {
                data,
                header,
                texture_units: Vec::new(),
                layout: PayloadLayout::default(),
                entries: Vec::new(),
                images: Vec::new(),
                codec,
            });
        }

        let texture_units = decode_texture_units(&data, header.gpu_commands_range())?;
        let layout = plan_level_slots(&header, &texture_units, codec.registry(), data.len())?;
        let images = extract_images(&data, &layout, &codec)?;
        let entries = original_entries(&layout);

        Ok(Self {
            data,
            header,
            texture_units,
            layout,
            entries,
            images,
            codec,
        })
    }

    #[inline]
    pub fn header(&self) -> &BchHeader {
        &self.header
    }

    /// Decoded texture unit 0 configuration of every command segment, including
    /// segments that do not describe a texture.
    #[inline]
    pub fn texture_units(&self) -> &[TextureUnitConfig] {
        &self.texture_units
    }

    /// Where every level lives in the file.
    #[inline]
    pub fn layout(&self) -> &PayloadLayout {
        &self.layout
    }

    /// Size and format of every level at load time, in image order.
    #[inline]
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Extracted levels, entry-major and level-minor.
    #[inline]
    pub fn images(&self) -> &[TextureImage<C::Pixels>] {
        &self.images
    }

    #[inline]
    pub fn images_mut(&mut self) -> &mut [TextureImage<C::Pixels>] {
        &mut self.images
    }

    /// Replaces the pixels of one image, returning the previous ones.
    ///
    /// Sizes are checked when the container is written, not here.
    pub fn replace_image(&mut self, index: usize, pixels: C::Pixels) -> BchResult<C::Pixels> {
        let count = self.images.len();
        let image = self
            .images
            .get_mut(index)
            .ok_or(BchError::ImageIndexOutOfRange { index, count })?;
        Ok(core::mem::replace(&mut image.pixels, pixels))
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The file as it was loaded.
    #[inline]
    pub fn original_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_images(self) -> Vec<TextureImage<C::Pixels>> {
        self.images
    }

    /// Encodes all images and validates them against their original sizes.
    ///
    /// Returns one payload per level, ready for [`write_payloads`].
    pub(crate) fn encode_payloads(&self) -> BchResult<Vec<Vec<u8>>> {
        encode_images(&self.layout, &self.entries, &self.images, &self.codec)
    }

    /// Writes the container, with all images re-encoded, into a new buffer.
    ///
    /// The output has the length of the original file and differs from it only inside
    /// the texture payloads.
    ///
    /// # Errors
    ///
    /// - [`BchError::SizeMismatch`] if an image no longer has its original size.
    /// - [`BchError::EncodedLengthMismatch`] or [`BchError::Codec`] if encoding fails.
    pub fn to_bytes(&self) -> BchResult<Vec<u8>> {
        reinsert_images(
            &self.data,
            &self.layout,
            &self.entries,
            &self.images,
            &self.codec,
        )
    }

    /// Writes the container into `output`, which must be exactly as long as the
    /// original file.
    ///
    /// `output` is left untouched if validation or encoding fails.
    pub fn write_to(&self, output: &mut [u8]) -> BchResult<()> {
        let payloads = self.encode_payloads()?;
        if output.len() != self.data.len() {
            return Err(MalformedContainerError::RegionOutOfBounds {
                region: "Output",
                offset: 0,
                length: self.data.len(),
                file_size: output.len(),
            }
            .into());
        }

        output.copy_from_slice(&self.data);
        write_payloads(output, &self.layout, &payloads)
    }
}

impl<C: PixelCodec> core::fmt::Debug for BchContainer<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BchContainer")
            .field("header", &self.header)
            .field("texture_units", &self.texture_units)
            .field("images", &self.images.len())
            .finish_non_exhaustive()
    }
}
