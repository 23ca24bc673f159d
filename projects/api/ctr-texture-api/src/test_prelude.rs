//! Common test imports and utilities for the texture API tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// Re-export commonly used alloc types for tests
pub use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

// External crates commonly used in tests
pub use rstest::rstest;

// Crate items most tests touch
pub use crate::codec::{PixelBuffer, PixelCodec};
pub use crate::error::CodecError;
pub use crate::format::{Dimensions, FormatRegistry};

/// Deterministic, non-repeating-per-tile test payload.
pub fn patterned_bytes(length: usize) -> Vec<u8> {
    (0..length).map(|index| (index * 7 + index / 251) as u8).collect()
}
