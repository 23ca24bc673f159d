//! # PICA200 Command Packets
//!
//! A command packet writes one or more GPU registers. It is made of 32-bit little endian
//! words:
//!
//! ```text
//! [parameter 0] [header] [parameter 1] .. [parameter N] [padding?]
//! ```
//!
//! - `parameter 0` is written to the register named by the header.
//! - `parameter 1..=N` (N = extra parameter count) are written to the same register,
//!   or to successive registers when the consecutive-write flag is set.
//! - Packets are 8-byte aligned: a padding word follows when `1 + N` is even.
//!
//! Each write only updates the bytes selected by the header's byte-enable mask.
use bitfield::bitfield;

/// Longest run of extra parameters a header can describe.
pub const MAX_EXTRA_PARAMETERS: u32 = 0x7FF;

bitfield! {
    /// Header word of a command packet.
    ///
    /// - Bits 0-15: Register id
    /// - Bits 16-19: Byte-enable mask
    /// - Bits 20-30: Extra parameter count
    /// - Bit 31: Consecutive-write flag
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CommandHeader(u32);
    impl Debug;
    u32;

    /// Register written by the first parameter (16 bits)
    pub register_raw, set_register_raw: 15, 0;
    /// One bit per byte of the register value (4 bits)
    pub byte_mask, set_byte_mask: 19, 16;
    /// Number of parameters following the header (11 bits)
    pub extra_parameters, set_extra_parameters: 30, 20;
    /// Consecutive-write flag (1 bit)
    pub consecutive_raw, set_consecutive_raw: 31, 31;
}

impl CommandHeader {
    /// Creates a header for a packet writing `register`.
    pub fn new(register: u16, byte_mask: u32, extra_parameters: u32, consecutive: bool) -> Self {
        let mut header = Self(0);
        header.set_register_raw(register as u32);
        header.set_byte_mask(byte_mask);
        header.set_extra_parameters(extra_parameters);
        header.set_consecutive_raw(consecutive as u32);
        header
    }

    /// Header for a single full-width register write.
    #[inline]
    pub fn single(register: u16) -> Self {
        Self::new(register, 0xF, 0, false)
    }

    #[inline]
    pub fn register(&self) -> u16 {
        self.register_raw() as u16
    }

    #[inline]
    pub fn is_consecutive(&self) -> bool {
        self.consecutive_raw() != 0
    }

    /// The byte-enable mask expanded to a 32-bit value mask.
    #[inline]
    pub fn value_mask(&self) -> u32 {
        let byte_mask = self.byte_mask();
        (0..4)
            .filter(|byte| byte_mask & (1 << byte) != 0)
            .fold(0u32, |mask, byte| mask | (0xFF << (byte * 8)))
    }

    /// Words taken by the whole packet, header and padding included.
    #[inline]
    pub fn packet_words(&self) -> usize {
        let extra = self.extra_parameters() as usize;
        let padding = extra % 2;
        2 + extra + padding
    }

    #[inline]
    pub fn raw(&self) -> u32 {
        self.0
    }
}
