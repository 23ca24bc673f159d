#![doc = include_str!("../README.md")]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// Core modules
pub mod bch;
pub mod container;
pub mod error;
pub mod pica;
pub mod pipeline;

#[cfg(feature = "file-io")]
pub mod file_io;

// Re-export key APIs
pub use bch::{likely_bch, parse_header, BchHeader};
pub use container::BchContainer;
pub use error::*;
pub use pica::{scan_command_segments, TextureUnitConfig, TextureUnitState};
pub use pipeline::{TextureEntry, TextureImage};

#[cfg(feature = "file-io")]
pub use file_io::{FileOperationError, FileOperationResult};

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_prelude;
