use super::{constants::*, likely_bch};
use crate::error::{BchResult, MalformedContainerError};
use endian_writer::{EndianReader, LittleEndianReader};
use tracing::debug;

/// The BCH file header.
///
/// Offsets are absolute file offsets; sizes are in bytes. Fields that only exist in
/// some header revisions are `None` for the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BchHeader {
    pub backward_compatibility: u8,
    pub forward_compatibility: u8,
    pub version: u16,

    pub main_header_offset: u32,
    pub string_table_offset: u32,
    pub gpu_commands_offset: u32,
    /// Base offset of the pixel payload region.
    pub data_offset: u32,
    pub data_extended_offset: Option<u32>,
    pub relocation_table_offset: u32,

    pub main_header_size: u32,
    pub string_table_size: u32,
    pub gpu_commands_size: u32,
    /// Size of the pixel payload region. Zero means the file embeds no textures.
    pub data_size: u32,
    pub data_extended_size: Option<u32>,
    pub relocation_table_size: u32,
    pub uninitialized_data_size: u32,
    pub uninitialized_description_size: u32,

    pub flags: Option<u16>,
    pub address_count: Option<u16>,
}

impl BchHeader {
    /// Size of this header revision in bytes.
    #[inline]
    pub fn header_size(&self) -> usize {
        header_size_for_revision(self.backward_compatibility)
    }

    /// Whether the container embeds any texture data.
    #[inline]
    pub fn has_texture_data(&self) -> bool {
        self.data_size != 0
    }

    /// Byte range of the GPU command stream.
    #[inline]
    pub fn gpu_commands_range(&self) -> core::ops::Range<usize> {
        let start = self.gpu_commands_offset as usize;
        start..start + self.gpu_commands_size as usize
    }
}

/// Parses the header of a BCH container.
///
/// # Errors
///
/// [`MalformedContainerError`] if the buffer is not a BCH file, is shorter than its
/// header revision, or if the command stream or (when present) the pixel data region
/// lies outside the buffer.
pub fn parse_header(data: &[u8]) -> BchResult<BchHeader> {
    if data.len() < BCH_MIN_HEADER_SIZE {
        return Err(MalformedContainerError::HeaderTooShort {
            required: BCH_MIN_HEADER_SIZE,
            actual: data.len(),
        }
        .into());
    }

    if !likely_bch(data) {
        let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        return Err(MalformedContainerError::InvalidMagic(magic).into());
    }

    let backward_compatibility = data[BCH_REVISION_OFFSET];
    let header_size = header_size_for_revision(backward_compatibility);
    if data.len() < header_size {
        return Err(MalformedContainerError::HeaderTooShort {
            required: header_size,
            actual: data.len(),
        }
        .into());
    }

    // SAFETY: We checked data.len() >= header_size, and every read below stays below
    // header_size for this revision.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let mut offset = BCH_REVISION_OFFSET;
    let mut next_u32 = || {
        let value = unsafe { reader.read_u32_at(offset as isize) };
        offset += 4;
        value
    };

    let revision = next_u32();
    let has_extended_data = backward_compatibility > BCH_EXTENDED_DATA_REVISION;
    let has_flags = backward_compatibility > BCH_FLAGS_REVISION;

    let main_header_offset = next_u32();
    let string_table_offset = next_u32();
    let gpu_commands_offset = next_u32();
    let data_offset = next_u32();
    let data_extended_offset = has_extended_data.then(&mut next_u32);
    let relocation_table_offset = next_u32();

    let main_header_size = next_u32();
    let string_table_size = next_u32();
    let gpu_commands_size = next_u32();
    let data_size = next_u32();
    let data_extended_size = has_extended_data.then(&mut next_u32);
    let relocation_table_size = next_u32();
    let uninitialized_data_size = next_u32();
    let uninitialized_description_size = next_u32();

    // flags (u16) + address count (u16)
    let flags_field = has_flags.then(&mut next_u32);

    let header = BchHeader {
        backward_compatibility,
        forward_compatibility: (revision >> 8) as u8,
        version: (revision >> 16) as u16,
        main_header_offset,
        string_table_offset,
        gpu_commands_offset,
        data_offset,
        data_extended_offset,
        relocation_table_offset,
        main_header_size,
        string_table_size,
        gpu_commands_size,
        data_size,
        data_extended_size,
        relocation_table_size,
        uninitialized_data_size,
        uninitialized_description_size,
        flags: flags_field.map(|field| field as u16),
        address_count: flags_field.map(|field| (field >> 16) as u16),
    };

    check_region(
        "GPU commands",
        header.gpu_commands_offset,
        header.gpu_commands_size,
        data.len(),
    )?;
    if header.has_texture_data() {
        check_region("Data", header.data_offset, header.data_size, data.len())?;
    }

    debug!(
        revision = header.backward_compatibility,
        version = header.version,
        gpu_commands_offset = header.gpu_commands_offset,
        gpu_commands_size = header.gpu_commands_size,
        data_offset = header.data_offset,
        data_size = header.data_size,
        "Parsed BCH header"
    );

    Ok(header)
}

fn check_region(
    region: &'static str,
    offset: u32,
    length: u32,
    file_size: usize,
) -> Result<(), MalformedContainerError> {
    let offset = offset as usize;
    let length = length as usize;
    match offset.checked_add(length) {
        Some(end) if end <= file_size => Ok(()),
        _ => Err(MalformedContainerError::RegionOutOfBounds {
            region,
            offset,
            length,
            file_size,
        }),
    }
}
