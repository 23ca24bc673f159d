use super::constants::*;
use crate::error::{BchResult, MalformedContainerError};
use alloc::vec::Vec;
use tracing::debug;

/// Splits a BCH command stream into per-texture segments.
///
/// The stream is walked in 8-byte units. Every unit adds [`COMMAND_UNIT_WORDS`] to the
/// current segment; a unit whose register id field equals [`SEGMENT_TERMINATOR`] closes
/// the segment. Scanning stops once two or fewer bytes remain.
///
/// # Returns
///
/// The word count of every closed segment, in stream order. Words after the last
/// terminator do not form a segment and are dropped.
///
/// # Errors
///
/// [`MalformedContainerError::TruncatedCommandUnit`] if the stream ends before the
/// register id field of a unit.
pub fn scan_command_segments(commands: &[u8]) -> BchResult<Vec<u32>> {
    let mut segments = Vec::new();
    let mut current_words = 0u32;
    let mut position = 0usize;

    while commands.len().saturating_sub(position) > 2 {
        let field = position + COMMAND_UNIT_REGISTER_OFFSET;
        let register = commands
            .get(field..field + 2)
            .ok_or(MalformedContainerError::TruncatedCommandUnit { offset: position })?;

        current_words += COMMAND_UNIT_WORDS;
        if u16::from_le_bytes([register[0], register[1]]) == SEGMENT_TERMINATOR {
            segments.push(current_words);
            current_words = 0;
        }

        position += COMMAND_UNIT_SIZE;
    }

    debug!(
        segments = segments.len(),
        trailing_words = current_words,
        "Scanned command stream"
    );

    Ok(segments)
}

/// Byte ranges of the segments within the command stream, from their word counts.
pub fn segment_ranges(word_counts: &[u32]) -> Vec<core::ops::Range<usize>> {
    let mut start = 0usize;
    word_counts
        .iter()
        .map(|&words| {
            let end = start + words as usize * 4;
            let range = start..end;
            start = end;
            range
        })
        .collect()
}
