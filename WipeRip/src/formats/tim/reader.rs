//! TIM decoding into RGBA

use byteorder::LittleEndian;
use tracing::{debug, trace, warn};

use super::{Image, ImageFileHeader, PixelFormat, PixelHeader};
use crate::error::{Error, Result};
use crate::formats::common::RecordCursor;

type LeCursor<'a> = RecordCursor<'a, LittleEndian>;

/// Words in the console's video memory (1024x512). No image is larger.
const MAX_IMAGE_WORDS: usize = 1024 * 512;

/// Expand a 15-bit color word to RGBA.
///
/// Red sits in bits 0-4, green in 5-9, blue in 10-14. Only the all-zero word
/// is transparent.
#[must_use]
pub fn unpack_color(word: u16) -> [u8; 4] {
    [
        ((word & 0x1f) << 3) as u8,
        (((word >> 5) & 0x1f) << 3) as u8,
        (((word >> 10) & 0x1f) << 3) as u8,
        if word == 0 { 0 } else { 0xff },
    ]
}

/// Decode one image buffer.
///
/// # Errors
///
/// Returns [`Error::UnsupportedPixelFormat`] for an unknown format tag and
/// [`Error::TruncatedStream`] when the headers or palette are cut short.
/// Returns [`Error::ImageTooLarge`] for dimensions no real image has.
/// Missing pixel data is not an error: the remaining pixels stay transparent.
pub fn decode_image(data: &[u8]) -> Result<Image> {
    // Image data is word-aligned; an odd length means a stray trailing byte.
    let data = if data.len() % 2 == 1 {
        trace!("Dropping stray trailing byte from {} byte image", data.len());
        &data[..data.len() - 1]
    } else {
        data
    };

    let mut cursor = LeCursor::new(data);
    let header = read_file_header(&mut cursor)?;

    let palette = if header.format.is_paletted() {
        read_palette(&mut cursor, header.palette_colors)?
    } else {
        Vec::new()
    };

    cursor.skip(4, "image data size")?;
    let dim = read_pixel_header(&mut cursor)?;
    if usize::from(dim.width) * usize::from(dim.height) > MAX_IMAGE_WORDS {
        return Err(Error::ImageTooLarge {
            width: dim.width,
            height: dim.height,
        });
    }

    let per_word = header.format.pixels_per_word();
    let width = u32::from(dim.width) * per_word;
    let height = u32::from(dim.height);
    let entries = usize::from(dim.width) * usize::from(dim.height);

    debug!(
        "Decoding {:?} image {}x{} ({} palette colors)",
        header.format,
        width,
        height,
        palette.len()
    );

    let mut image = Image::blank(width, height);
    let lookup = |index: u16| palette.get(usize::from(index)).copied().unwrap_or(0);

    for i in 0..entries {
        if cursor.remaining() < 2 {
            warn!(
                "Image data ends after {} of {} words; remaining pixels left transparent",
                i, entries
            );
            break;
        }
        let word = cursor.read_u16()?;
        let colors = match header.format {
            PixelFormat::TrueColor16Bpp => [word, 0, 0, 0],
            PixelFormat::Paletted8Bpp => [lookup(word & 0xff), lookup(word >> 8), 0, 0],
            PixelFormat::Paletted4Bpp => [
                lookup(word & 0xf),
                lookup((word >> 4) & 0xf),
                lookup((word >> 8) & 0xf),
                lookup(word >> 12),
            ],
        };
        let base = i * per_word as usize * 4;
        for (n, &color) in colors[..per_word as usize].iter().enumerate() {
            let offset = base + n * 4;
            image.pixels[offset..offset + 4].copy_from_slice(&unpack_color(color));
        }
    }

    Ok(image)
}

/// Decode every buffer of a container, keeping indices aligned.
///
/// A buffer that fails to decode is replaced by an empty image so texture
/// ids still line up with their buffers.
#[must_use]
pub fn decode_images(buffers: &[Vec<u8>]) -> Vec<Image> {
    buffers
        .iter()
        .enumerate()
        .map(|(index, buffer)| {
            decode_image(buffer).unwrap_or_else(|e| {
                warn!("Image {} could not be decoded: {}", index, e);
                Image::default()
            })
        })
        .collect()
}

fn read_file_header(cursor: &mut LeCursor<'_>) -> Result<ImageFileHeader> {
    cursor.require(super::FILE_HEADER_SIZE, "image file header")?;
    let magic = cursor.read_u32()?;
    let tag = cursor.read_u32()?;
    let format = PixelFormat::from_tag(tag).ok_or(Error::UnsupportedPixelFormat(tag))?;
    Ok(ImageFileHeader {
        magic,
        format,
        header_length: cursor.read_u32()?,
        palette_x: cursor.read_u16()?,
        palette_y: cursor.read_u16()?,
        palette_colors: cursor.read_u16()?,
        palette_count: cursor.read_u16()?,
    })
}

fn read_palette(cursor: &mut LeCursor<'_>, colors: u16) -> Result<Vec<u16>> {
    cursor.require(usize::from(colors) * 2, "image palette")?;
    (0..colors).map(|_| cursor.read_u16()).collect()
}

fn read_pixel_header(cursor: &mut LeCursor<'_>) -> Result<PixelHeader> {
    cursor.require(8, "image pixel header")?;
    Ok(PixelHeader {
        skip_x: cursor.read_u16()?,
        skip_y: cursor.read_u16()?,
        width: cursor.read_u16()?,
        height: cursor.read_u16()?,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a TIM buffer from its parts.
    pub(crate) fn tim(tag: u32, palette: &[u16], width_words: u16, height: u16, words: &[u16]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0x10u32.to_le_bytes());
        data.extend_from_slice(&tag.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&(palette.len() as u16).to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        for c in palette {
            data.extend_from_slice(&c.to_le_bytes());
        }
        data.extend_from_slice(&0u32.to_le_bytes());
        for v in [0u16, 0, width_words, height] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        for w in words {
            data.extend_from_slice(&w.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_unpack_color() {
        assert_eq!(unpack_color(0), [0, 0, 0, 0]);
        assert_eq!(unpack_color(0x001f), [248, 0, 0, 255]);
        assert_eq!(unpack_color(0x03e0), [0, 248, 0, 255]);
        assert_eq!(unpack_color(0x7c00), [0, 0, 248, 255]);
        // The top bit does not make a black word transparent
        assert_eq!(unpack_color(0x8000), [0, 0, 0, 255]);
    }

    #[test]
    fn test_true_color() {
        let data = tim(0x02, &[], 2, 1, &[0x001f, 0x7c00]);
        let image = decode_image(&data).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.pixel(0, 0), Some([248, 0, 0, 255]));
        assert_eq!(image.pixel(1, 0), Some([0, 0, 248, 255]));
    }

    #[test]
    fn test_true_color_ignores_declared_palette() {
        // The palette geometry is declared but a true-color image has no
        // palette block, so the data size field follows the header directly.
        let mut data = tim(0x02, &[], 1, 1, &[0x03e0]);
        data[16..18].copy_from_slice(&4u16.to_le_bytes());
        let image = decode_image(&data).unwrap();
        assert_eq!(image.pixel(0, 0), Some([0, 248, 0, 255]));
    }

    #[test]
    fn test_8bpp_low_byte_first() {
        let palette = [0x0000, 0x001f, 0x03e0];
        let data = tim(0x09, &palette, 1, 1, &[0x0201]);
        let image = decode_image(&data).unwrap();
        assert_eq!(image.width, 2);
        assert_eq!(image.pixel(0, 0), Some([248, 0, 0, 255]));
        assert_eq!(image.pixel(1, 0), Some([0, 248, 0, 255]));
    }

    #[test]
    fn test_4bpp_odd_width_units() {
        let palette = [0x0000, 0x001f, 0x03e0, 0x7c00];
        let data = tim(0x08, &palette, 3, 1, &[0x3210, 0x0000, 0x0001]);
        let image = decode_image(&data).unwrap();
        assert_eq!(image.width, 12);
        assert_eq!(image.pixels.len(), 12 * 4);
        assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(1, 0), Some([248, 0, 0, 255]));
        assert_eq!(image.pixel(2, 0), Some([0, 248, 0, 255]));
        assert_eq!(image.pixel(3, 0), Some([0, 0, 248, 255]));
        assert_eq!(image.pixel(8, 0), Some([248, 0, 0, 255]));
    }

    #[test]
    fn test_empty_palette_is_transparent() {
        let data = tim(0x08, &[], 1, 1, &[0x1111]);
        let image = decode_image(&data).unwrap();
        assert_eq!(image.width, 4);
        assert!(image.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_stray_trailing_byte_is_dropped() {
        let mut data = tim(0x02, &[], 1, 1, &[0x001f]);
        data.push(0xAB);
        let image = decode_image(&data).unwrap();
        assert_eq!(image.pixel(0, 0), Some([248, 0, 0, 255]));
    }

    #[test]
    fn test_short_pixel_data_leaves_transparent() {
        let data = tim(0x02, &[], 2, 2, &[0x001f]);
        let image = decode_image(&data).unwrap();
        assert_eq!(image.pixels.len(), 16);
        assert_eq!(image.pixel(0, 0), Some([248, 0, 0, 255]));
        assert_eq!(image.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_unknown_format() {
        let data = tim(0x03, &[], 1, 1, &[0]);
        assert!(matches!(
            decode_image(&data),
            Err(Error::UnsupportedPixelFormat(0x03))
        ));
    }

    #[test]
    fn test_decode_images_keeps_alignment() {
        let good = tim(0x02, &[], 1, 1, &[0x001f]);
        let images = decode_images(&[vec![0u8; 4], good]);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].width, 0);
        assert_eq!(images[1].width, 1);
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let data = tim(0x08, &[0x7fff], 0xFFFF, 0xFFFF, &[0x1111]);
        assert!(matches!(
            decode_image(&data),
            Err(Error::ImageTooLarge { width: 0xFFFF, height: 0xFFFF })
        ));

        // A full-VRAM image is still accepted.
        let data = tim(0x02, &[], 1024, 512, &[]);
        let image = decode_image(&data).unwrap();
        assert_eq!((image.width, image.height), (1024, 512));
    }
}
