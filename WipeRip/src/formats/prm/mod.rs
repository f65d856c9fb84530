//! PRM 3D object support
//!
//! A `.PRM` file is a run of objects with no table of contents. Each object
//! is a 144-byte big-endian header, `vertex_count` 8-byte vertices and
//! `polygon_count` polygon records whose sizes follow from their
//! discriminants. The next object starts right after the last polygon.

pub mod polygon;
pub mod reader;

pub use polygon::{
    Face, Polygon, PolygonKind, Shading, Sprite, SpriteAnchor, Texturing, read_polygon,
};
pub use reader::{ObjectReader, parse_objects, read_objects};

use glam::IVec3;

use crate::error::{Error, Result};

/// Size of the object header in bytes.
pub const OBJECT_HEADER_SIZE: usize = 144;

/// Size of one vertex record in bytes.
pub const VERTEX_SIZE: usize = 8;

/// Length of the name field.
pub const NAME_LEN: usize = 15;

/// Decoded object header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub name: String,
    pub vertex_count: u16,
    pub polygon_count: u16,
    pub index1: u16,
    pub origin: IVec3,
    /// World offset added to every vertex on placement.
    pub position: IVec3,
}

/// One decoded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub header: ObjectHeader,
    /// Vertex positions, widened from 16 bits.
    pub vertices: Vec<IVec3>,
    pub polygons: Vec<Polygon>,
    /// Bytes this object occupied in its file.
    pub byte_length: usize,
}

/// How an object's position offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Add the offset to every vertex.
    #[default]
    Bake,
    /// Leave vertices local and carry the offset alongside.
    Separate,
}

/// An object after its one-time position transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedObject {
    pub name: String,
    pub vertices: Vec<IVec3>,
    pub polygons: Vec<Polygon>,
    /// The offset still to be applied by the consumer, when not baked.
    pub offset: Option<IVec3>,
}

impl Object {
    /// Apply the position offset. Consumes the object so the offset can
    /// only ever be applied once.
    #[must_use]
    pub fn place(self, mode: PositionMode) -> PlacedObject {
        let position = self.header.position;
        let (vertices, offset) = match mode {
            PositionMode::Bake => (
                self.vertices
                    .into_iter()
                    .map(|v| v.wrapping_add(position))
                    .collect(),
                None,
            ),
            PositionMode::Separate => (self.vertices, Some(position)),
        };
        PlacedObject {
            name: self.header.name,
            vertices,
            polygons: self.polygons,
            offset,
        }
    }

    /// Check that every polygon references an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfRange`] for the first bad index.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        for polygon in &self.polygons {
            if let Some(&index) = polygon
                .vertex_indices()
                .iter()
                .find(|&&i| usize::from(i) >= count)
            {
                return Err(Error::VertexIndexOutOfRange {
                    object: self.header.name.clone(),
                    index: usize::from(index),
                    count,
                });
            }
        }
        Ok(())
    }

    /// Bytes the header, vertices and polygon records add up to.
    #[must_use]
    pub fn computed_length(&self) -> usize {
        OBJECT_HEADER_SIZE
            + self.vertices.len() * VERTEX_SIZE
            + self
                .polygons
                .iter()
                .filter_map(Polygon::kind)
                .map(PolygonKind::record_size)
                .sum::<usize>()
    }
}
