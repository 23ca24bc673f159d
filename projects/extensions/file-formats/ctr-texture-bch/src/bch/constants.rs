//! BCH header constants and definitions
#![allow(dead_code)]

/// Magic header for BCH files, 'BCH\0'
pub(crate) const BCH_MAGIC: u32 = u32::from_le_bytes(*b"BCH\0");

// Header field offsets shared by every revision.
pub(crate) const BCH_MAGIC_OFFSET: usize = 0x00;
/// backward compatibility (u8), forward compatibility (u8), version (u16)
pub(crate) const BCH_REVISION_OFFSET: usize = 0x04;
/// First of the section offset fields.
pub(crate) const BCH_SECTIONS_OFFSET: usize = 0x08;

/// Revisions (backward compatibility byte) above this carry an extended data section.
pub(crate) const BCH_EXTENDED_DATA_REVISION: u8 = 0x20;
/// Revisions (backward compatibility byte) above this carry the flags/address count field.
pub(crate) const BCH_FLAGS_REVISION: u8 = 0x07;

/// Header size of the oldest revision: magic, revision, 5 offsets, 7 lengths.
pub(crate) const BCH_BASE_HEADER_SIZE: usize = 0x38;
/// Size of the flags (u16) + address count (u16) field.
pub(crate) const BCH_FLAGS_FIELD_SIZE: usize = 4;
/// Extended data adds one offset and one length.
pub(crate) const BCH_EXTENDED_DATA_FIELDS_SIZE: usize = 8;

/// Smallest buffer that can hold any BCH header.
pub(crate) const BCH_MIN_HEADER_SIZE: usize = BCH_BASE_HEADER_SIZE;

/// Header size for a given backward compatibility revision.
#[inline]
pub(crate) const fn header_size_for_revision(backward_compatibility: u8) -> usize {
    let mut size = BCH_BASE_HEADER_SIZE;
    if backward_compatibility > BCH_EXTENDED_DATA_REVISION {
        size += BCH_EXTENDED_DATA_FIELDS_SIZE;
    }
    if backward_compatibility > BCH_FLAGS_REVISION {
        size += BCH_FLAGS_FIELD_SIZE;
    }
    size
}
