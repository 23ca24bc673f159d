//! Common test imports and utilities for BCH extension tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// Re-export commonly used alloc types for tests
pub use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

// External crates commonly used in tests
pub use rstest::rstest;

// Codec API items most tests touch
pub use ctr_texture_api::format::constants::*;
pub use ctr_texture_api::{
    CodecError, CodecResult, Dimensions, FormatDescriptor, FormatRegistry, LinearCodec,
    LinearPixels, PixelBuffer, PixelCodec, PixelLayout, RawCodec, RawPixels, TileSwizzle,
};

use crate::bch::constants::*;
use crate::pica::constants::*;
use crate::pica::CommandHeader;
use crate::pipeline::align_payload_cursor;
use endian_writer::{EndianWriter, LittleEndianWriter};

/// Deterministic test payload that does not repeat every 256 bytes.
pub fn patterned_bytes(length: usize) -> Vec<u8> {
    (0..length)
        .map(|index| (index * 13 + index / 253) as u8)
        .collect()
}

/// Serializes (parameter, header) command units.
pub fn command_bytes(units: &[[u32; 2]]) -> Vec<u8> {
    units
        .iter()
        .flatten()
        .flat_map(|word| word.to_le_bytes())
        .collect()
}

/// Header fields after the revision word, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    MainHeaderOffset,
    StringTableOffset,
    GpuCommandsOffset,
    DataOffset,
    DataExtendedOffset,
    RelocationTableOffset,
    MainHeaderSize,
    StringTableSize,
    GpuCommandsSize,
    DataSize,
    DataExtendedSize,
    RelocationTableSize,
    UninitializedDataSize,
    UninitializedDescriptionSize,
    Flags,
}

/// Fields present in the header of a revision, in file order.
pub fn header_fields(revision: u8) -> Vec<HeaderField> {
    use HeaderField::*;

    let extended = revision > BCH_EXTENDED_DATA_REVISION;
    let mut fields = vec![MainHeaderOffset, StringTableOffset, GpuCommandsOffset, DataOffset];
    if extended {
        fields.push(DataExtendedOffset);
    }
    fields.extend([
        RelocationTableOffset,
        MainHeaderSize,
        StringTableSize,
        GpuCommandsSize,
        DataSize,
    ]);
    if extended {
        fields.push(DataExtendedSize);
    }
    fields.extend([RelocationTableSize, UninitializedDataSize, UninitializedDescriptionSize]);
    if revision > BCH_FLAGS_REVISION {
        fields.push(Flags);
    }
    fields
}

/// File offset of a header field.
///
/// # Panics
///
/// If the field does not exist in that revision.
pub fn header_field_offset(revision: u8, field: HeaderField) -> usize {
    let index = header_fields(revision)
        .iter()
        .position(|&candidate| candidate == field)
        .expect("field not present in this header revision");
    BCH_SECTIONS_OFFSET + index * 4
}

/// One texture entry of a generated BCH file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSpec {
    pub width: u16,
    pub height: u16,
    pub format_code: u8,
    pub lod_count: u8,
    /// Offset relative to the data region; defaults to right after the previous entry.
    pub base_address: Option<u32>,
    /// Write DIM..ADDR1 with a single consecutive-write packet.
    pub consecutive: bool,
}

impl TextureSpec {
    pub fn new(width: u16, height: u16, format_code: u8, lod_count: u8) -> Self {
        Self {
            width,
            height,
            format_code,
            lod_count,
            base_address: None,
            consecutive: false,
        }
    }

    pub fn at(mut self, base_address: u32) -> Self {
        self.base_address = Some(base_address);
        self
    }

    pub fn consecutive(mut self) -> Self {
        self.consecutive = true;
        self
    }

    /// Total payload bytes of all levels.
    pub fn payload_length(&self) -> usize {
        let format = FormatRegistry::pica()
            .get(self.format_code)
            .copied()
            .expect("test textures use PICA formats");
        let top = Dimensions::new(self.width as u32, self.height as u32);
        (0..=self.lod_count)
            .map(|level| format.payload_length(top.mip_level(level)))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Texture(TextureSpec),
    /// Sets an address but no size.
    Untextured,
}

/// Builds synthetic BCH files.
///
/// Layout: header, command region, then the data region aligned to 128 bytes. Texture
/// payloads are packed in entry order with 128-byte padding and filled with
/// [`patterned_bytes`].
#[derive(Debug, Clone)]
pub struct BchBuilder {
    revision: u8,
    segments: Vec<Segment>,
    unterminated_tail: bool,
    trailing_bytes: usize,
}

/// A generated BCH file and where its regions ended up.
#[derive(Debug, Clone)]
pub struct BchFile {
    pub bytes: Vec<u8>,
    pub gpu_commands_offset: usize,
    pub gpu_commands_size: usize,
    pub data_offset: usize,
    pub data_size: usize,
    /// Absolute offset of every texture level, in image order.
    pub level_offsets: Vec<usize>,
    /// Absolute offset of the first level of every texture entry.
    pub entry_offsets: Vec<usize>,
}

impl Default for BchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BchBuilder {
    pub fn new() -> Self {
        Self {
            revision: 0x05,
            segments: Vec::new(),
            unterminated_tail: false,
            trailing_bytes: 16,
        }
    }

    pub fn revision(mut self, revision: u8) -> Self {
        self.revision = revision;
        self
    }

    pub fn texture(mut self, texture: TextureSpec) -> Self {
        self.segments.push(Segment::Texture(texture));
        self
    }

    /// Adds a terminated segment that never sets a texture size.
    pub fn untextured_segment(mut self) -> Self {
        self.segments.push(Segment::Untextured);
        self
    }

    /// Appends commands after the last terminator.
    pub fn unterminated_tail(mut self) -> Self {
        self.unterminated_tail = true;
        self
    }

    pub fn trailing_bytes(mut self, count: usize) -> Self {
        self.trailing_bytes = count;
        self
    }

    pub fn build(self) -> BchFile {
        let header_size = header_size_for_revision(self.revision);

        // Place payloads first so the commands know their addresses.
        let mut cursor = 0usize;
        let mut addresses = Vec::new();
        let mut level_offsets_relative = Vec::new();
        for segment in &self.segments {
            let Segment::Texture(texture) = segment else {
                addresses.push(0);
                continue;
            };

            let start = texture.base_address.map_or(cursor, |address| address as usize);
            addresses.push(start as u32);

            let format = FormatRegistry::pica()
                .get(texture.format_code)
                .copied()
                .expect("test textures use PICA formats");
            let top = Dimensions::new(texture.width as u32, texture.height as u32);
            let mut level_cursor = start;
            for level in 0..=texture.lod_count {
                level_offsets_relative.push(level_cursor);
                level_cursor += format.payload_length(top.mip_level(level));
            }
            cursor = cursor.max(align_payload_cursor(level_cursor));
        }
        let data_size = cursor;

        let mut commands = Vec::new();
        for (segment, &address) in self.segments.iter().zip(&addresses) {
            commands.extend(segment_commands(segment, address));
        }
        if self.unterminated_tail {
            commands.extend(command_bytes(&[
                [0, CommandHeader::single(GPUREG_TEXUNIT0_DIM).raw()],
                [0, CommandHeader::single(GPUREG_TEXUNIT0_TYPE).raw()],
            ]));
        }

        let gpu_commands_offset = header_size;
        let gpu_commands_size = commands.len();
        let data_offset = align_payload_cursor(gpu_commands_offset + gpu_commands_size);
        let total = data_offset + data_size + self.trailing_bytes;

        let mut bytes = patterned_bytes(total);
        bytes[..data_offset].fill(0);
        bytes[gpu_commands_offset..gpu_commands_offset + gpu_commands_size]
            .copy_from_slice(&commands);

        let revision_word = self.revision as u32;
        let relocation_offset = data_offset + data_size;
        let mut writer = unsafe { LittleEndianWriter::new(bytes.as_mut_ptr()) };
        unsafe {
            writer.write_u32_at(BCH_MAGIC, BCH_MAGIC_OFFSET as isize);
            writer.write_u32_at(revision_word, BCH_REVISION_OFFSET as isize);
        }
        for (index, field) in header_fields(self.revision).into_iter().enumerate() {
            let value = match field {
                HeaderField::MainHeaderOffset
                | HeaderField::StringTableOffset
                | HeaderField::DataExtendedOffset => gpu_commands_offset,
                HeaderField::GpuCommandsOffset => gpu_commands_offset,
                HeaderField::DataOffset => data_offset,
                HeaderField::RelocationTableOffset => relocation_offset,
                HeaderField::GpuCommandsSize => gpu_commands_size,
                HeaderField::DataSize => data_size,
                _ => 0,
            };
            let offset = BCH_SECTIONS_OFFSET + index * 4;
            unsafe { writer.write_u32_at(value as u32, offset as isize) };
        }

        BchFile {
            level_offsets: level_offsets_relative
                .iter()
                .map(|offset| data_offset + offset)
                .collect(),
            entry_offsets: self
                .segments
                .iter()
                .zip(&addresses)
                .filter(|(segment, _)| matches!(segment, Segment::Texture(_)))
                .map(|(_, &address)| data_offset + address as usize)
                .collect(),
            bytes,
            gpu_commands_offset,
            gpu_commands_size,
            data_offset,
            data_size,
        }
    }
}

fn segment_commands(segment: &Segment, address: u32) -> Vec<u8> {
    let single = |register: u16, value: u32| [value, CommandHeader::single(register).raw()];

    let mut units = vec![single(0x0080, 0x0000_1234)];
    match segment {
        Segment::Texture(texture) => {
            let dim = ((texture.width as u32) << TEXUNIT_DIM_WIDTH_SHIFT) | texture.height as u32;
            let lod = (texture.lod_count as u32) << TEXUNIT_LOD_MAX_SHIFT;
            if texture.consecutive {
                // DIM, PARAM, LOD, ADDR1 + padding
                let header = CommandHeader::new(GPUREG_TEXUNIT0_DIM, 0xF, 3, true);
                units.extend([[dim, header.raw()], [0, lod], [address, 0]]);
            } else {
                units.extend([
                    single(GPUREG_TEXUNIT0_DIM, dim),
                    single(GPUREG_TEXUNIT0_LOD, lod),
                    single(GPUREG_TEXUNIT0_ADDR1, address),
                ]);
            }
            units.push(single(GPUREG_TEXUNIT0_TYPE, texture.format_code as u32));
        }
        Segment::Untextured => units.push(single(GPUREG_TEXUNIT0_ADDR1, address)),
    }
    units.push(single(SEGMENT_TERMINATOR, 0));

    command_bytes(&units)
}
