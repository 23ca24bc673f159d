//! File I/O for BCH containers.
//!
//! Files are memory-mapped with `lightweight-mmap` both when loading and when saving.

mod error;
pub use error::*;

// `BchContainer::open` and `BchContainer::save` live in there.
#[cfg(feature = "lightweight-mmap")]
mod lightweight_mmap_impl;

#[cfg(not(feature = "lightweight-mmap"))]
compile_error!("The 'lightweight-mmap' feature must be enabled for file I/O operations.");
