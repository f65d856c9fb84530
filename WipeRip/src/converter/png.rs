//! PNG output for decoded images

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, RgbaImage};

use crate::error::{Error, Result};
use crate::formats::tim::Image;
use crate::formats::track::{TILE_EDGE, TILES_PER_EDGE};

/// Encode an image as PNG bytes.
///
/// # Errors
/// Returns an error if the pixel buffer does not match the image size or
/// encoding fails.
pub fn image_to_png_bytes(image: &Image) -> Result<Vec<u8>> {
    let img: RgbaImage = ImageBuffer::from_raw(image.width, image.height, image.pixels.clone())
        .ok_or(Error::ImageBufferFailed)?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
    img.write_with_encoder(encoder)
        .map_err(|e| Error::PngEncodeFailed {
            message: e.to_string(),
        })?;

    Ok(png_data)
}

/// Write an image to a PNG file
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn write_png<P: AsRef<Path>>(image: &Image, path: P) -> Result<()> {
    let png_data = image_to_png_bytes(image)?;
    let mut output = BufWriter::new(File::create(path.as_ref())?);
    output.write_all(&png_data)?;
    output.flush()?;
    Ok(())
}

/// A 1x1 opaque white image, the texture of untextured faces.
#[must_use]
pub fn white_pixel() -> Image {
    Image {
        width: 1,
        height: 1,
        pixels: vec![0xFF; 4],
    }
}

/// Lay out a composite of concatenated 32x32 tiles as a real raster.
///
/// Chunk `k` of the composite goes to tile column `k % 4`, row `k / 4`.
/// Images that are not composite-sized are returned unchanged.
#[must_use]
pub fn tiles_to_raster(composite: &Image) -> Image {
    let edge = TILE_EDGE * TILES_PER_EDGE;
    let tile_bytes = (TILE_EDGE * TILE_EDGE * 4) as usize;
    if composite.width != edge
        || composite.height != edge
        || composite.pixels.len() != tile_bytes * (TILES_PER_EDGE * TILES_PER_EDGE) as usize
    {
        return composite.clone();
    }

    let row_bytes = (TILE_EDGE * 4) as usize;
    let stride = (edge * 4) as usize;
    let mut pixels = vec![0; composite.pixels.len()];

    for (k, tile) in composite.pixels.chunks_exact(tile_bytes).enumerate() {
        let column = k % TILES_PER_EDGE as usize;
        let row = k / TILES_PER_EDGE as usize;
        for (y, line) in tile.chunks_exact(row_bytes).enumerate() {
            let start = (row * TILE_EDGE as usize + y) * stride + column * row_bytes;
            pixels[start..start + row_bytes].copy_from_slice(line);
        }
    }

    Image {
        width: edge,
        height: edge,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_png_signature() {
        let bytes = image_to_png_bytes(&white_pixel()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_mismatched_buffer() {
        let image = Image {
            width: 4,
            height: 4,
            pixels: vec![0; 3],
        };
        assert!(matches!(image_to_png_bytes(&image), Err(Error::ImageBufferFailed)));
    }

    #[test]
    fn test_tiles_to_raster() {
        let tile_bytes = (TILE_EDGE * TILE_EDGE * 4) as usize;
        let pixels = (0..16u8).flat_map(|k| vec![k; tile_bytes]).collect();
        let composite = Image {
            width: 128,
            height: 128,
            pixels,
        };
        let raster = tiles_to_raster(&composite);

        assert_eq!(raster.pixel(0, 0), Some([0; 4]));
        assert_eq!(raster.pixel(32, 0), Some([1; 4]));
        assert_eq!(raster.pixel(127, 31), Some([3; 4]));
        assert_eq!(raster.pixel(0, 32), Some([4; 4]));
        assert_eq!(raster.pixel(100, 127), Some([15; 4]));
    }

    #[test]
    fn test_non_composite_unchanged() {
        let image = Image::blank(16, 8);
        assert_eq!(tiles_to_raster(&image), image);
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        write_png(&white_pixel(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}
