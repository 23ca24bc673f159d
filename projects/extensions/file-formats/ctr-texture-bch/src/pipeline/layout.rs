use crate::bch::BchHeader;
use crate::error::{BchError, BchResult, MalformedContainerError};
use crate::pica::TextureUnitConfig;
use alloc::vec::Vec;
use core::ops::Range;
use ctr_texture_api::{Dimensions, FormatRegistry};
use tracing::{debug, trace, warn};

/// Texture payloads of consecutive entries are separated by padding to this boundary.
pub const PAYLOAD_ALIGNMENT: usize = 128;

/// Rounds a payload cursor up to the next [`PAYLOAD_ALIGNMENT`] boundary.
#[inline]
pub const fn align_payload_cursor(cursor: usize) -> usize {
    (cursor + (PAYLOAD_ALIGNMENT - 1)) & !(PAYLOAD_ALIGNMENT - 1)
}

/// Where one texture level is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSlot {
    /// Index of the command segment the level belongs to.
    pub entry: usize,
    pub level: u8,
    /// Absolute file offset.
    pub offset: usize,
    pub length: usize,
    pub dimensions: Dimensions,
    pub format_code: u8,
}

impl LevelSlot {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Payload span of one texture entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryLayout {
    /// Index of the command segment.
    pub entry: usize,
    /// Offset of the first level (`data_offset + base_address`).
    pub start: usize,
    /// End of the last level.
    pub end: usize,
    /// `end` rounded up to [`PAYLOAD_ALIGNMENT`].
    pub padded_end: usize,
    /// Indices of this entry's levels in [`PayloadLayout::slots`].
    pub slots: Range<usize>,
}

/// Every level slot of a container, in entry-major, level-minor order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PayloadLayout {
    pub slots: Vec<LevelSlot>,
    pub entries: Vec<EntryLayout>,
}

impl PayloadLayout {
    /// Number of texture levels (and therefore images).
    #[inline]
    pub fn image_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Computes the location of every texture level.
///
/// Entries without a size are skipped. For each remaining entry the cursor starts at
/// `data_offset + base_address` and moves past each level in turn; once the entry is
/// done it is rounded up to the next 128-byte boundary.
///
/// Level length is `width * height * bits_per_pixel / 8` with the level dimensions
/// halved per level, so very small levels may take zero bytes.
///
/// # Errors
///
/// - [`BchError::UnsupportedFormatCode`] if an entry's format is not in `registry`.
/// - [`MalformedContainerError::PayloadOutOfBounds`] if a level would extend past
///   `file_size`.
pub fn plan_level_slots(
    header: &BchHeader,
    configs: &[TextureUnitConfig],
    registry: &FormatRegistry,
    file_size: usize,
) -> BchResult<PayloadLayout> {
    let mut layout = PayloadLayout::default();
    let mut previous_padded_end: Option<usize> = None;

    for (entry, config) in configs.iter().enumerate() {
        if !config.is_texture() {
            warn!(
                entry,
                width = config.width,
                height = config.height,
                "Skipping command segment without a texture size"
            );
            continue;
        }

        let format = registry
            .get(config.format_code)
            .ok_or(BchError::UnsupportedFormatCode(config.format_code))?;

        let start = (header.data_offset as usize)
            .checked_add(config.base_address as usize)
            .ok_or(MalformedContainerError::PayloadOutOfBounds {
                entry,
                level: 0,
                offset: usize::MAX,
                length: 0,
                file_size,
            })?;

        if let Some(expected) = previous_padded_end.filter(|&expected| expected != start) {
            trace!(entry, start, expected, "Entry does not follow the previous entry's padding");
        }

        let first_slot = layout.slots.len();
        let mut cursor = start;
        for level in 0..=config.lod_count {
            let dimensions = config.dimensions().mip_level(level);
            let length = format.payload_length(dimensions);
            let slot = LevelSlot {
                entry,
                level,
                offset: cursor,
                length,
                dimensions,
                format_code: config.format_code,
            };

            match cursor.checked_add(length) {
                Some(end) if end <= file_size => {}
                _ => {
                    return Err(MalformedContainerError::PayloadOutOfBounds {
                        entry,
                        level,
                        offset: cursor,
                        length,
                        file_size,
                    }
                    .into())
                }
            }

            trace!(
                entry,
                level,
                offset = slot.offset,
                length = slot.length,
                width = dimensions.width,
                height = dimensions.height,
                "Planned level slot"
            );
            layout.slots.push(slot);
            cursor += length;
        }

        let padded_end = align_payload_cursor(cursor);
        layout.entries.push(EntryLayout {
            entry,
            start,
            end: cursor,
            padded_end,
            slots: first_slot..layout.slots.len(),
        });
        previous_padded_end = Some(padded_end);
    }

    debug!(
        entries = layout.entries.len(),
        levels = layout.slots.len(),
        "Planned texture payload layout"
    );

    Ok(layout)
}
