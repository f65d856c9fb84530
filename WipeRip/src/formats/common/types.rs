//! Small value types shared by the object and track decoders

use serde::Serialize;

/// An 8-bit-per-channel color unpacked from a 32-bit record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a color field: red in the top byte, then green and blue.
    /// The low byte is unused.
    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
        }
    }
}

/// One 8-bit texture coordinate pair as stored in a polygon record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Texel {
    pub u: u8,
    pub v: u8,
}
