//! # Texture Pipeline
//!
//! Moves texture levels between a BCH file and pixel buffers.
//!
//! All payload offsets are computed up front by [`plan_level_slots`]; extraction and
//! reinsertion only ever touch the resulting [`LevelSlot`]s, which is what allows the
//! levels to be decoded and encoded independently of each other.

/// Payload offsets and 128-byte entry alignment.
pub mod layout;

/// Container bytes to images.
pub mod extract;

/// Images back to container bytes.
pub mod reinsert;

pub use extract::*;
pub use layout::*;
pub use reinsert::*;
