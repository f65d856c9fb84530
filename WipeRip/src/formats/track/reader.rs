//! Fixed-record track file decoding

use std::path::{Path, PathBuf};

use glam::IVec3;
use tracing::{debug, info, warn};

use super::{
    FACE_RECORD_SIZE, FaceFlags, Game, SECTION_RECORD_SIZE, SectionFlags,
    TEXTURE_ATTRIBUTE_RECORD_SIZE, TEXTURE_INDEX_RECORD_SIZE, TextureAttribute,
    TextureIndexEntry, Track, TrackFace, TrackSection, TrackVertex, VERTEX_RECORD_SIZE,
    compose_track_images,
};
use crate::error::Result;
use crate::formats::common::{RecordCursor, Rgb};
use crate::formats::tim::Image;
use crate::utils::require_file;

/// Locations of the files that make up one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFiles {
    pub texture_index: PathBuf,
    pub vertices: PathBuf,
    pub faces: PathBuf,
    pub sections: PathBuf,
    pub texture_attributes: Option<PathBuf>,
}

impl TrackFiles {
    /// Locate the standard file names in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`](crate::Error::MissingInput) for the
    /// first file that cannot be found.
    pub fn in_dir<P: AsRef<Path>>(dir: P, game: Game) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            texture_index: require_file(dir, "LIBRARY.TTF")?,
            vertices: require_file(dir, "TRACK.TRV")?,
            faces: require_file(dir, "TRACK.TRF")?,
            sections: require_file(dir, "TRACK.TRS")?,
            texture_attributes: if game.has_texture_attributes() {
                Some(require_file(dir, "TRACK.TEX")?)
            } else {
                None
            },
        })
    }
}

/// Read every track file and compose its textures from `library`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or a texture index entry
/// references a library image that does not exist.
pub fn read_track(files: &TrackFiles, library: &[Image]) -> Result<Track> {
    let texture_index = parse_texture_index(&std::fs::read(&files.texture_index)?)?;
    let vertices = parse_vertices(&std::fs::read(&files.vertices)?)?;
    let mut faces = parse_faces(&std::fs::read(&files.faces)?)?;
    let sections = parse_sections(&std::fs::read(&files.sections)?)?;

    if let Some(path) = &files.texture_attributes {
        let attributes = parse_texture_attributes(&std::fs::read(path)?)?;
        merge_texture_attributes(&mut faces, &attributes);
    }

    let images = compose_track_images(&texture_index, library)?;

    info!(
        "Track: {} vertices, {} faces, {} sections, {} textures",
        vertices.len(),
        faces.len(),
        sections.len(),
        images.len()
    );

    Ok(Track {
        vertices,
        faces,
        texture_index,
        sections,
        images,
    })
}

/// Read `len / size` records; a trailing partial record is ignored.
fn read_records<T>(
    data: &[u8],
    size: usize,
    what: &str,
    mut read: impl FnMut(&mut RecordCursor<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let count = data.len() / size;
    let trailing = data.len() % size;
    if trailing != 0 {
        debug!("{}: ignoring {} trailing bytes", what, trailing);
    }
    let mut cursor = RecordCursor::new(data);
    (0..count).map(|_| read(&mut cursor)).collect()
}

pub fn parse_vertices(data: &[u8]) -> Result<Vec<TrackVertex>> {
    read_records(data, VERTEX_RECORD_SIZE, "TRV", |c| {
        let x = c.read_i32()?;
        let y = c.read_i32()?;
        let z = c.read_i32()?;
        Ok(TrackVertex {
            position: IVec3::new(x, y, z),
            padding: c.read_i32()?,
        })
    })
}

pub fn parse_faces(data: &[u8]) -> Result<Vec<TrackFace>> {
    read_records(data, FACE_RECORD_SIZE, "TRF", |c| {
        let indices = c.read_i16_block::<4>()?;
        let normal = [c.read_i16()?, c.read_i16()?, c.read_i16()?];
        let tile = c.read_u8()?;
        let flags = FaceFlags(c.read_u8()?);
        Ok(TrackFace {
            indices,
            normal,
            tile,
            flags,
            color: Rgb::from_packed(c.read_u32()?),
        })
    })
}

pub fn parse_texture_index(data: &[u8]) -> Result<Vec<TextureIndexEntry>> {
    read_records(data, TEXTURE_INDEX_RECORD_SIZE, "TTF", |c| {
        // Stored reversed; flip back to lookup order.
        let mut nearest = c.read_i16_block::<16>()?;
        nearest.reverse();
        Ok(TextureIndexEntry {
            nearest,
            medium: c.read_i16_block::<4>()?,
            farthest: c.read_i16()?,
        })
    })
}

pub fn parse_sections(data: &[u8]) -> Result<Vec<TrackSection>> {
    read_records(data, SECTION_RECORD_SIZE, "TRS", |c| {
        let next_junction = c.read_i32()?;
        let previous = c.read_i32()?;
        let next = c.read_i32()?;
        let position = IVec3::new(c.read_i32()?, c.read_i32()?, c.read_i32()?);
        c.skip(116, "section")?;
        let first_face = c.read_u32()?;
        let face_count = c.read_u16()?;
        c.skip(4, "section")?;
        let flags = SectionFlags(c.read_u16()?);
        c.skip(4, "section")?;
        Ok(TrackSection {
            next_junction,
            previous,
            next,
            position,
            first_face,
            face_count,
            flags,
        })
    })
}

pub fn parse_texture_attributes(data: &[u8]) -> Result<Vec<TextureAttribute>> {
    read_records(data, TEXTURE_ATTRIBUTE_RECORD_SIZE, "TEX", |c| {
        Ok(TextureAttribute {
            tile: c.read_u8()?,
            flags: FaceFlags(c.read_u8()?),
        })
    })
}

/// Replace each face's tile and flags with its `TRACK.TEX` entry.
pub fn merge_texture_attributes(faces: &mut [TrackFace], attributes: &[TextureAttribute]) {
    if attributes.len() < faces.len() {
        warn!(
            "TEX has {} entries for {} faces; the rest keep their own tile",
            attributes.len(),
            faces.len()
        );
    }
    for (face, attribute) in faces.iter_mut().zip(attributes) {
        face.tile = attribute.tile;
        face.flags = attribute.flags;
    }
}
