//! TIM image support
//!
//! Images come out of `.CMP` containers as little-endian TIM files: a file
//! header, an optional 15-bit palette, a pixel-geometry header and packed
//! pixel words in 4, 8 or 16 bits per pixel.

pub mod reader;

pub use reader::{decode_image, decode_images, unpack_color};

use serde::Serialize;

/// Size of the fixed file header in bytes.
pub const FILE_HEADER_SIZE: usize = 20;

/// Pixel encodings found in the format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PixelFormat {
    /// One 15-bit color word per pixel.
    TrueColor16Bpp,
    /// Two palette indices per word, low byte first.
    Paletted8Bpp,
    /// Four palette indices per word, low nibble first.
    Paletted4Bpp,
}

impl PixelFormat {
    #[must_use]
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0x02 => Some(Self::TrueColor16Bpp),
            0x08 => Some(Self::Paletted4Bpp),
            0x09 => Some(Self::Paletted8Bpp),
            _ => None,
        }
    }

    /// Pixels packed into one 16-bit word.
    #[must_use]
    pub fn pixels_per_word(self) -> u32 {
        match self {
            Self::TrueColor16Bpp => 1,
            Self::Paletted8Bpp => 2,
            Self::Paletted4Bpp => 4,
        }
    }

    #[must_use]
    pub fn is_paletted(self) -> bool {
        !matches!(self, Self::TrueColor16Bpp)
    }
}

/// The fixed header at the start of every image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFileHeader {
    pub magic: u32,
    pub format: PixelFormat,
    pub header_length: u32,
    pub palette_x: u16,
    pub palette_y: u16,
    pub palette_colors: u16,
    pub palette_count: u16,
}

/// Placement and size of the pixel block. `width` is in 16-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelHeader {
    pub skip_x: u16,
    pub skip_y: u16,
    pub width: u16,
    pub height: u16,
}

/// A decoded RGBA image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, RGBA, row-major.
    pub pixels: Vec<u8>,
}

impl Image {
    /// Create a fully transparent image.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) as usize) * 4;
        let px = self.pixels.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
