//! Composite track textures from library tiles

use tracing::debug;

use super::TextureIndexEntry;
use crate::error::{Error, Result};
use crate::formats::tim::Image;

/// Edge length of one library tile in pixels.
pub const TILE_EDGE: u32 = 32;

/// Tiles along each edge of a composite.
pub const TILES_PER_EDGE: u32 = 4;

/// Build the composite for one texture index entry.
///
/// The sixteen nearest tiles are concatenated whole, column by column:
/// `for x in 0..4 { for y in 0..4 { nearest[y * 4 + x] } }`. The result is a
/// 128x128 image whose buffer is a run of tile buffers rather than a raster;
/// [`crate::converter::png::tiles_to_raster`] lays it out for viewing.
///
/// # Errors
///
/// Returns [`Error::MissingTile`] for a reference outside `library` and
/// [`Error::InvalidTile`] for a library image that is not 32x32.
pub fn compose_tiles(entry: &TextureIndexEntry, library: &[Image]) -> Result<Image> {
    let edge = TILE_EDGE * TILES_PER_EDGE;
    let mut pixels = Vec::with_capacity((edge * edge * 4) as usize);

    for x in 0..TILES_PER_EDGE as usize {
        for y in 0..TILES_PER_EDGE as usize {
            let reference = entry.nearest[y * TILES_PER_EDGE as usize + x];
            let (index, image) = usize::try_from(reference)
                .ok()
                .and_then(|i| library.get(i).map(|image| (i, image)))
                .ok_or(Error::MissingTile {
                    image: i32::from(reference),
                    available: library.len(),
                })?;
            if image.width != TILE_EDGE || image.height != TILE_EDGE {
                return Err(Error::InvalidTile {
                    image: index,
                    width: image.width,
                    height: image.height,
                    expected: TILE_EDGE,
                });
            }
            pixels.extend_from_slice(&image.pixels);
        }
    }

    Ok(Image {
        width: edge,
        height: edge,
        pixels,
    })
}

/// Build one composite per texture index entry.
pub fn compose_track_images(entries: &[TextureIndexEntry], library: &[Image]) -> Result<Vec<Image>> {
    debug!(
        "Composing {} track textures from {} library images",
        entries.len(),
        library.len()
    );
    entries.iter().map(|entry| compose_tiles(entry, library)).collect()
}
