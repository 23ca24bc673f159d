#![doc = include_str!("../README.md")]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// Core modules
pub mod codec;
pub mod error;
pub mod format;
pub mod swizzle;

// Re-export key APIs
pub use codec::*; // codec capability + reference codecs
pub use error::*; // error types
pub use format::*; // format table
pub use swizzle::*;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_prelude;
