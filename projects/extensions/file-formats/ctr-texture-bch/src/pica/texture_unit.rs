use super::{command_header::CommandHeader, constants::*, scanner::*};
use crate::error::{BchResult, MalformedContainerError};
use alloc::vec::Vec;
use core::ops::Range;
use ctr_texture_api::Dimensions;
use tracing::{debug, trace};

/// Texture unit 0 configuration left behind by one command segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureUnitConfig {
    /// Width of the top level, in pixels.
    pub width: u16,
    /// Height of the top level, in pixels.
    pub height: u16,
    /// Offset of the first level, relative to the header's data offset.
    pub base_address: u32,
    pub format_code: u8,
    /// Index of the smallest level. Levels `0..=lod_count` are stored.
    pub lod_count: u8,
}

impl TextureUnitConfig {
    /// Segments that never set a size do not describe a texture.
    #[inline]
    pub fn is_texture(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width as u32, self.height as u32)
    }

    /// Number of stored levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.lod_count as usize + 1
    }
}

/// Register file of texture unit 0, built up by replaying command packets.
///
/// Only the registers needed to locate a texture are tracked; writes to any other
/// register are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureUnitState {
    dim: u32,
    lod: u32,
    addr1: u32,
    kind: u32,
}

impl TextureUnitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays a whole segment on a fresh register file.
    ///
    /// # Errors
    ///
    /// [`MalformedContainerError::TruncatedCommandPacket`] if a packet runs past the end
    /// of `words`.
    pub fn replay(words: &[u32]) -> BchResult<TextureUnitConfig> {
        let mut state = Self::new();
        state.execute(words)?;
        Ok(state.config())
    }

    /// Executes every packet in `words` against this register file.
    pub fn execute(&mut self, words: &[u32]) -> BchResult<()> {
        let mut word = 0usize;
        while word < words.len() {
            let available = words.len() - word;
            if available < 2 {
                return Err(truncated(word, 2, available));
            }

            let header = CommandHeader(words[word + 1]);
            let required = header.packet_words();
            if available < required {
                return Err(truncated(word, required, available));
            }

            let mask = header.value_mask();
            let register = header.register();
            self.write(register, words[word], mask);

            let extra = &words[word + 2..word + 2 + header.extra_parameters() as usize];
            for (index, &value) in extra.iter().enumerate() {
                let target = if header.is_consecutive() {
                    register.wrapping_add(index as u16 + 1)
                } else {
                    register
                };
                self.write(target, value, mask);
            }

            word += required;
        }

        Ok(())
    }

    /// Writes the bytes of `value` selected by `mask` into a register.
    #[inline]
    pub fn write(&mut self, register: u16, value: u32, mask: u32) {
        let slot = match register {
            GPUREG_TEXUNIT0_DIM => &mut self.dim,
            GPUREG_TEXUNIT0_LOD => &mut self.lod,
            GPUREG_TEXUNIT0_ADDR1 => &mut self.addr1,
            GPUREG_TEXUNIT0_TYPE => &mut self.kind,
            _ => return,
        };
        *slot = (*slot & !mask) | (value & mask);
    }

    /// Decodes the current register values.
    pub fn config(&self) -> TextureUnitConfig {
        TextureUnitConfig {
            width: ((self.dim >> TEXUNIT_DIM_WIDTH_SHIFT) & TEXUNIT_DIM_WIDTH_MASK) as u16,
            height: (self.dim & TEXUNIT_DIM_HEIGHT_MASK) as u16,
            base_address: self.addr1,
            format_code: (self.kind & TEXUNIT_TYPE_FORMAT_MASK) as u8,
            lod_count: ((self.lod >> TEXUNIT_LOD_MAX_SHIFT) & TEXUNIT_LOD_MAX_MASK) as u8,
        }
    }
}

#[inline]
fn truncated(word: usize, required: usize, available: usize) -> crate::error::BchError {
    MalformedContainerError::TruncatedCommandPacket {
        word,
        required,
        available,
    }
    .into()
}

/// Reads the little endian command words of a segment. A trailing partial word is dropped.
pub fn command_words(segment: &[u8]) -> Vec<u32> {
    segment
        .chunks_exact(4)
        .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .collect()
}

/// Scans the command region `commands` of `data` and decodes the texture unit
/// configuration of every segment.
///
/// Each segment is replayed on its own register file. Entries that set no size are
/// kept, so indices line up with the segments.
///
/// The last unit of the region may be cut right after its register id field. Its
/// remaining bytes are read from whatever follows in `data`, so only a file that ends
/// mid-packet is reported as truncated.
///
/// # Errors
///
/// - [`MalformedContainerError::RegionOutOfBounds`] if `commands` lies outside `data`.
/// - Anything [`scan_command_segments`] or [`TextureUnitState::replay`] reports.
pub fn decode_texture_units(
    data: &[u8],
    commands: Range<usize>,
) -> BchResult<Vec<TextureUnitConfig>> {
    let stream = data
        .get(commands.clone())
        .ok_or(MalformedContainerError::RegionOutOfBounds {
            region: "GPU commands",
            offset: commands.start,
            length: commands.len(),
            file_size: data.len(),
        })?;
    let segments = scan_command_segments(stream)?;
    let mut configs = Vec::with_capacity(segments.len());

    for (entry, range) in segment_ranges(&segments).into_iter().enumerate() {
        let start = commands.start + range.start;
        let end = (commands.start + range.end).min(data.len());
        let words = command_words(&data[start..end]);
        let config = TextureUnitState::replay(&words)?;

        trace!(
            entry,
            width = config.width,
            height = config.height,
            base_address = config.base_address,
            format_code = config.format_code,
            lod_count = config.lod_count,
            "Decoded texture unit 0"
        );
        configs.push(config);
    }

    debug!(entries = configs.len(), "Decoded command segments");
    Ok(configs)
}
