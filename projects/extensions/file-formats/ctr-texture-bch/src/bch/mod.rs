/// Shared constants between modules.
pub mod constants;

/// Determine if a file is a BCH container.
pub mod likely_bch;

/// Parse the BCH file header.
pub mod parse_header;

pub use likely_bch::*;
pub use parse_header::*;
