//! Sequential PRM object decoding

use std::path::Path;

use glam::IVec3;
use tracing::{debug, info, warn};

use super::polygon::read_polygon;
use super::{NAME_LEN, OBJECT_HEADER_SIZE, Object, ObjectHeader, Polygon, VERTEX_SIZE};
use crate::error::{Error, Result};
use crate::formats::common::RecordCursor;

/// Iterator over the objects of one PRM buffer.
///
/// Yields each object with the offset it started at. After a truncated
/// object the position of the next one is unknown, so iteration ends.
pub struct ObjectReader<'a> {
    cursor: RecordCursor<'a>,
    failed: bool,
}

impl<'a> ObjectReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: RecordCursor::new(data),
            failed: false,
        }
    }
}

impl Iterator for ObjectReader<'_> {
    type Item = Result<(Object, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_exhausted() {
            return None;
        }
        let start = self.cursor.position();
        match read_object(&mut self.cursor) {
            Ok(object) => Some(Ok((object, start))),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode one object at the cursor and advance past it.
pub fn read_object(cursor: &mut RecordCursor<'_>) -> Result<Object> {
    let start = cursor.position();
    let header = read_header(cursor)?;

    cursor.require(usize::from(header.vertex_count) * VERTEX_SIZE, "object vertices")?;
    let mut vertices = Vec::with_capacity(usize::from(header.vertex_count));
    for _ in 0..header.vertex_count {
        let x = cursor.read_i16()?;
        let y = cursor.read_i16()?;
        let z = cursor.read_i16()?;
        cursor.skip(2, "vertex padding")?;
        vertices.push(IVec3::new(i32::from(x), i32::from(y), i32::from(z)));
    }

    let mut polygons = Vec::with_capacity(usize::from(header.polygon_count));
    for _ in 0..header.polygon_count {
        let (polygon, consumed) = read_polygon(cursor)?;
        if let Polygon::Unknown { tag, .. } = polygon {
            warn!(
                "Object '{}': unknown polygon type 0x{:02x} at offset {}, skipping its remaining polygons",
                header.name,
                tag,
                cursor.position()
            );
            polygons.push(polygon);
            break;
        }
        debug_assert!(consumed > 0);
        polygons.push(polygon);
    }

    let byte_length = cursor.position() - start;
    debug!(
        "Object '{}': {} vertices, {} polygons, {} bytes",
        header.name,
        vertices.len(),
        polygons.len(),
        byte_length
    );

    Ok(Object {
        header,
        vertices,
        polygons,
        byte_length,
    })
}

fn read_header(cursor: &mut RecordCursor<'_>) -> Result<ObjectHeader> {
    cursor.require(OBJECT_HEADER_SIZE, "object header")?;

    let raw_name = cursor.read_bytes::<NAME_LEN>()?;
    let name_len = raw_name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    let name = String::from_utf8_lossy(&raw_name[..name_len]).into_owned();
    cursor.skip(1, "object header")?;

    let vertex_count = cursor.read_u16()?;
    cursor.skip(14, "object header")?;
    let polygon_count = cursor.read_u16()?;
    cursor.skip(20, "object header")?;
    let index1 = cursor.read_u16()?;
    cursor.skip(28, "object header")?;
    let origin = read_header_vector(cursor)?;
    cursor.skip(20, "object header")?;
    let position = read_header_vector(cursor)?;
    cursor.skip(16, "object header")?;

    Ok(ObjectHeader {
        name,
        vertex_count,
        polygon_count,
        index1,
        origin,
        position,
    })
}

/// Header vectors are block-swapped, then X and Z trade back.
fn read_header_vector(cursor: &mut RecordCursor<'_>) -> Result<IVec3> {
    let swapped = cursor.read_i32_block::<3>()?;
    Ok(IVec3::new(swapped[2], swapped[1], swapped[0]))
}

/// Decode every object in a PRM buffer.
///
/// A truncated object ends decoding; objects before it are kept. Objects
/// referencing vertices they do not have are dropped and decoding goes on.
pub fn parse_objects(data: &[u8]) -> Vec<Object> {
    let mut objects = Vec::new();
    for item in ObjectReader::new(data) {
        match item {
            Ok((object, offset)) => {
                if let Err(e) = object.validate() {
                    warn!("Dropping object at offset {}: {}", offset, e);
                    continue;
                }
                objects.push(object);
            }
            Err(e) => {
                warn!("Object decoding stopped: {}", e);
            }
        }
    }
    objects
}

/// Read a `.PRM` file from disk.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] if the file does not exist.
pub fn read_objects<P: AsRef<Path>>(path: P) -> Result<Vec<Object>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let data = std::fs::read(path)?;
    let objects = parse_objects(&data);
    info!("Read {} objects from {}", objects.len(), path.display());
    Ok(objects)
}
