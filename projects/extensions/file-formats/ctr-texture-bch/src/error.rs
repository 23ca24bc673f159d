//! Error types for BCH container operations.

use ctr_texture_api::CodecError;
use thiserror::Error;

/// Result type for BCH container operations
pub type BchResult<T> = Result<T, BchError>;

/// Ways in which a container can fail to describe a valid layout.
///
/// All of these are fatal: the container cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedContainerError {
    /// Buffer is shorter than the header it claims to have
    #[error("Header too short: required at least {required} bytes, got {actual} bytes")]
    HeaderTooShort { required: usize, actual: usize },

    /// The file does not start with `BCH\0`
    #[error("Invalid magic {0:#010x}, expected 'BCH\\0'")]
    InvalidMagic(u32),

    /// A region named by the header lies (partly) outside the file
    #[error("{region} region {offset:#x}..+{length:#x} exceeds file size {file_size:#x}")]
    RegionOutOfBounds {
        region: &'static str,
        offset: usize,
        length: usize,
        file_size: usize,
    },

    /// The command stream ends in the middle of an 8-byte command unit
    #[error("Command unit at {offset:#x} is truncated")]
    TruncatedCommandUnit { offset: usize },

    /// A command packet claims more words than its segment holds
    #[error("Command packet at word {word} needs {required} words, segment has {available}")]
    TruncatedCommandPacket {
        word: usize,
        required: usize,
        available: usize,
    },

    /// A texture level payload lies (partly) outside the file
    #[error("Payload of entry {entry} level {level} at {offset:#x}..+{length:#x} exceeds file size {file_size:#x}")]
    PayloadOutOfBounds {
        entry: usize,
        level: u8,
        offset: usize,
        length: usize,
        file_size: usize,
    },
}

/// Errors that can occur while extracting or reinserting textures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BchError {
    /// The header, command stream or payload bounds are invalid
    #[error("Malformed container: {0}")]
    MalformedContainer(#[from] MalformedContainerError),

    /// A texture uses a format code missing from the codec's format table
    #[error("Unsupported texture format code: {0:#04x}")]
    UnsupportedFormatCode(u8),

    /// A replacement image does not have the size of the image it replaces
    #[error("Image {index} is {actual_width}x{actual_height}, but must stay {expected_width}x{expected_height}")]
    SizeMismatch {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// The number of images no longer matches the number of texture levels
    #[error("Expected {expected} images, got {actual}")]
    ImageCountMismatch { expected: usize, actual: usize },

    /// The codec produced a payload that would not fit the original byte span
    #[error("Encoded image {index} is {actual} bytes, original payload is {expected} bytes")]
    EncodedLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// An image index past the end of the image list
    #[error("Image index {index} out of range (container has {count} images)")]
    ImageIndexOutOfRange { index: usize, count: usize },

    /// The pixel codec failed
    #[error("Pixel codec error: {0}")]
    Codec(#[from] CodecError),
}
