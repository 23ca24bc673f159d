//! PICA200 command stream constants.
#![allow(dead_code)]

/// Size of one command unit (parameter word + header word) in bytes.
pub const COMMAND_UNIT_SIZE: usize = 8;

/// Words contributed by one command unit.
pub const COMMAND_UNIT_WORDS: u32 = 2;

/// Offset of the register id (the compared field) within a command unit.
pub const COMMAND_UNIT_REGISTER_OFFSET: usize = 4;

/// Register id closing the texture unit configuration of one BCH texture entry.
pub const SEGMENT_TERMINATOR: u16 = 0x023D;

// Texture unit 0 registers.
pub const GPUREG_TEXUNIT0_BORDER_COLOR: u16 = 0x0081;
pub const GPUREG_TEXUNIT0_DIM: u16 = 0x0082;
pub const GPUREG_TEXUNIT0_PARAM: u16 = 0x0083;
pub const GPUREG_TEXUNIT0_LOD: u16 = 0x0084;
pub const GPUREG_TEXUNIT0_ADDR1: u16 = 0x0085;
pub const GPUREG_TEXUNIT0_TYPE: u16 = 0x008E;

/// `TEXUNIT0_DIM`: height in bits 0-10, width in bits 16-26.
pub const TEXUNIT_DIM_HEIGHT_MASK: u32 = 0x7FF;
pub const TEXUNIT_DIM_WIDTH_SHIFT: u32 = 16;
pub const TEXUNIT_DIM_WIDTH_MASK: u32 = 0x7FF;

/// `TEXUNIT0_LOD`: maximum level of detail in bits 16-19.
pub const TEXUNIT_LOD_MAX_SHIFT: u32 = 16;
pub const TEXUNIT_LOD_MAX_MASK: u32 = 0xF;

/// `TEXUNIT0_TYPE`: format code in bits 0-3.
pub const TEXUNIT_TYPE_FORMAT_MASK: u32 = 0xF;
