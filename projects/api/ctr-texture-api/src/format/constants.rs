//! PICA200 texture format codes, as written to the `TEXUNITn_TYPE` registers.
#![allow(dead_code)]

pub const FORMAT_RGBA8: u8 = 0x0;
pub const FORMAT_RGB8: u8 = 0x1;
pub const FORMAT_RGBA5551: u8 = 0x2;
pub const FORMAT_RGB565: u8 = 0x3;
pub const FORMAT_RGBA4: u8 = 0x4;
pub const FORMAT_LA8: u8 = 0x5;
pub const FORMAT_HILO8: u8 = 0x6;
pub const FORMAT_L8: u8 = 0x7;
pub const FORMAT_A8: u8 = 0x8;
pub const FORMAT_LA4: u8 = 0x9;
pub const FORMAT_L4: u8 = 0xA;
pub const FORMAT_A4: u8 = 0xB;
pub const FORMAT_ETC1: u8 = 0xC;
pub const FORMAT_ETC1A4: u8 = 0xD;
