use super::constants::*;

/// Determines if the given data likely represents a BCH container.
/// This is done by checking the 'MAGIC' header, 'BCH\0' at offset 0 and minimum size.
/// For validation of the whole header, use [`parse_header`].
///
/// [`parse_header`]: crate::bch::parse_header::parse_header
#[inline(always)]
pub fn likely_bch(data: &[u8]) -> bool {
    data.len() >= BCH_MIN_HEADER_SIZE
        && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == BCH_MAGIC
}
