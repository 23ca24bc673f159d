//! Synthetic BCH files for integration tests.
#![allow(dead_code)]

use ctr_texture_api::{Dimensions, FormatRegistry};
use ctr_texture_bch::pica::constants::*;
use ctr_texture_bch::pica::CommandHeader;
use ctr_texture_bch::pipeline::align_payload_cursor;

/// Header size of revision 5 files.
pub const HEADER_SIZE: usize = 0x38;
const GPU_COMMANDS_OFFSET_FIELD: usize = 0x10;
const DATA_OFFSET_FIELD: usize = 0x14;
const GPU_COMMANDS_SIZE_FIELD: usize = 0x24;
const DATA_SIZE_FIELD: usize = 0x28;

/// Texture entry of a [`Fixture`].
#[derive(Debug, Clone, Copy)]
pub struct Texture {
    pub width: u16,
    pub height: u16,
    pub format_code: u8,
    pub lod_count: u8,
}

/// A revision 5 BCH file: header, commands, then texture payloads.
#[derive(Debug, Default)]
pub struct Fixture {
    textures: Vec<Texture>,
    /// Extra padding inserted before each entry, on top of the 128-byte alignment.
    gap: usize,
}

pub struct FixtureFile {
    pub bytes: Vec<u8>,
    pub data_offset: usize,
    /// Absolute offset of the first level of each entry.
    pub entry_offsets: Vec<usize>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(mut self, width: u16, height: u16, format_code: u8, lod_count: u8) -> Self {
        self.textures.push(Texture {
            width,
            height,
            format_code,
            lod_count,
        });
        self
    }

    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn build(self) -> FixtureFile {
        let registry = FormatRegistry::pica();

        let mut addresses = Vec::new();
        let mut cursor = 0usize;
        for texture in &self.textures {
            cursor = align_payload_cursor(cursor + self.gap);
            addresses.push(cursor);
            let format = registry.get(texture.format_code).expect("PICA format");
            let top = Dimensions::new(texture.width as u32, texture.height as u32);
            for level in 0..=texture.lod_count {
                cursor += format.payload_length(top.mip_level(level));
            }
            cursor = align_payload_cursor(cursor);
        }
        let data_size = cursor;

        let mut commands = Vec::new();
        for (texture, &address) in self.textures.iter().zip(&addresses) {
            let dim = ((texture.width as u32) << 16) | texture.height as u32;
            let lod = (texture.lod_count as u32) << 16;
            for (register, value) in [
                (GPUREG_TEXUNIT0_DIM, dim),
                (GPUREG_TEXUNIT0_LOD, lod),
                (GPUREG_TEXUNIT0_ADDR1, address as u32),
                (GPUREG_TEXUNIT0_TYPE, texture.format_code as u32),
                (SEGMENT_TERMINATOR, 0),
            ] {
                commands.extend(value.to_le_bytes());
                commands.extend(CommandHeader::single(register).raw().to_le_bytes());
            }
        }

        let data_offset = align_payload_cursor(HEADER_SIZE + commands.len());
        let mut bytes: Vec<u8> = (0..data_offset + data_size + 32)
            .map(|index| (index * 31 + index / 241) as u8)
            .collect();
        bytes[..data_offset].fill(0);
        bytes[..4].copy_from_slice(b"BCH\0");
        bytes[4] = 0x05;
        bytes[HEADER_SIZE..HEADER_SIZE + commands.len()].copy_from_slice(&commands);

        for (field, value) in [
            (GPU_COMMANDS_OFFSET_FIELD, HEADER_SIZE),
            (DATA_OFFSET_FIELD, data_offset),
            (GPU_COMMANDS_SIZE_FIELD, commands.len()),
            (DATA_SIZE_FIELD, data_size),
        ] {
            bytes[field..field + 4].copy_from_slice(&(value as u32).to_le_bytes());
        }

        FixtureFile {
            bytes,
            data_offset,
            entry_offsets: addresses.iter().map(|address| data_offset + address).collect(),
        }
    }
}
