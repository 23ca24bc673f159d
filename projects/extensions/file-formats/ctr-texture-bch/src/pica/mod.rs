//! # PICA200 Command Streams
//!
//! BCH files describe their textures with the GPU commands that would bind them to
//! texture unit 0. This module splits the command region into per-texture segments and
//! replays each segment to recover the texture's size, format, level count and address.

/// Command stream constants.
pub mod constants;

/// Command packet header.
pub mod command_header;

/// Splits the command stream into segments.
pub mod scanner;

/// Replays segments into texture unit 0 configurations.
pub mod texture_unit;

pub use command_header::*;
pub use scanner::*;
pub use texture_unit::*;
