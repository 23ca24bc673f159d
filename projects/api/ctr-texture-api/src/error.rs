//! Error types for pixel codec operations.

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting texture payloads to and from pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The format code has no entry in the codec's [`FormatRegistry`].
    ///
    /// [`FormatRegistry`]: crate::FormatRegistry
    #[error("Unknown texture format code: {0:#04x}")]
    UnknownFormatCode(u8),

    /// The format is known, but this codec cannot represent its storage layout.
    #[error("{name} ({format_code:#04x}) is not supported by this codec")]
    UnsupportedLayout { format_code: u8, name: &'static str },

    /// The payload handed to `decode` does not match the length implied by the dimensions.
    #[error("Payload length mismatch: expected {expected} bytes, got {actual} bytes")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    /// The pixel buffer handed to `encode` does not match the requested dimensions.
    #[error("Pixel buffer is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}
