//! Polygon record variants
//!
//! Every record opens with a big-endian type discriminant and subtype. The
//! discriminant alone fixes the record's layout and size. Index, UV and color
//! arrays are stored block-swapped, so their element order here is the
//! reverse of the order on disk. Output winding is applied later from this
//! stored order.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::formats::common::{RecordCursor, Rgb, Texel};

/// The eleven known record layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum PolygonKind {
    Reserved = 0x00,
    FlatTriFaceColor = 0x01,
    TexturedTriFaceColor = 0x02,
    FlatQuadFaceColor = 0x03,
    TexturedQuadFaceColor = 0x04,
    FlatTriVertexColor = 0x05,
    TexturedTriVertexColor = 0x06,
    FlatQuadVertexColor = 0x07,
    TexturedQuadVertexColor = 0x08,
    SpriteTopAnchor = 0x0A,
    SpriteBottomAnchor = 0x0B,
}

impl PolygonKind {
    #[must_use]
    pub fn from_tag(tag: u16) -> Option<Self> {
        Some(match tag {
            0x00 => Self::Reserved,
            0x01 => Self::FlatTriFaceColor,
            0x02 => Self::TexturedTriFaceColor,
            0x03 => Self::FlatQuadFaceColor,
            0x04 => Self::TexturedQuadFaceColor,
            0x05 => Self::FlatTriVertexColor,
            0x06 => Self::TexturedTriVertexColor,
            0x07 => Self::FlatQuadVertexColor,
            0x08 => Self::TexturedQuadVertexColor,
            0x0A => Self::SpriteTopAnchor,
            0x0B => Self::SpriteBottomAnchor,
            _ => return None,
        })
    }

    #[must_use]
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// Size of the whole record in bytes, header included.
    #[must_use]
    pub fn record_size(self) -> usize {
        match self {
            Self::Reserved => 18,
            Self::FlatTriFaceColor => 16,
            Self::TexturedTriFaceColor => 28,
            Self::FlatQuadFaceColor => 16,
            Self::TexturedQuadFaceColor => 32,
            Self::FlatTriVertexColor => 24,
            Self::TexturedTriVertexColor => 36,
            Self::FlatQuadVertexColor => 28,
            Self::TexturedQuadVertexColor => 44,
            Self::SpriteTopAnchor => 14,
            Self::SpriteBottomAnchor => 16,
        }
    }

    #[must_use]
    pub fn is_textured(self) -> bool {
        matches!(
            self,
            Self::TexturedTriFaceColor
                | Self::TexturedQuadFaceColor
                | Self::TexturedTriVertexColor
                | Self::TexturedQuadVertexColor
        )
    }

    #[must_use]
    pub fn has_vertex_colors(self) -> bool {
        matches!(
            self,
            Self::FlatTriVertexColor
                | Self::TexturedTriVertexColor
                | Self::FlatQuadVertexColor
                | Self::TexturedQuadVertexColor
        )
    }
}

/// Face coloring: one color for the face, or one per corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shading<const N: usize> {
    Face(Rgb),
    Vertex([Rgb; N]),
}

/// Texture reference of a textured face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texturing<const N: usize> {
    /// Index into the images of the paired container.
    pub texture: u16,
    pub texels: [Texel; N],
}

/// A triangle (`N = 3`) or quad (`N = 4`) face record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face<const N: usize> {
    pub kind: PolygonKind,
    pub subtype: u16,
    pub indices: [u16; N],
    pub texturing: Option<Texturing<N>>,
    pub shading: Shading<N>,
}

impl<const N: usize> Face<N> {
    /// Two or more corners share a vertex.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (0..N).any(|i| self.indices[i + 1..].contains(&self.indices[i]))
    }
}

/// Which edge of a sprite sits on its anchor vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteAnchor {
    Top,
    Bottom,
}

/// A camera-facing billboard anchored on one vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub anchor: SpriteAnchor,
    pub subtype: u16,
    pub index: u16,
    pub width: u16,
    pub height: u16,
    pub texture: u16,
    /// Raw color field; 16 bits wide on top-anchored sprites.
    pub color: u32,
}

/// One decoded polygon record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polygon {
    /// Record `0x00`; its payload has no known meaning.
    Reserved { subtype: u16, payload: Vec<u8> },
    Triangle(Face<3>),
    Quad(Face<4>),
    Sprite(Sprite),
    /// A discriminant outside the known set. Carries no geometry.
    Unknown { tag: u16, subtype: u16 },
}

impl Polygon {
    /// The record layout, or `None` for [`Polygon::Unknown`].
    #[must_use]
    pub fn kind(&self) -> Option<PolygonKind> {
        match self {
            Self::Reserved { .. } => Some(PolygonKind::Reserved),
            Self::Triangle(face) => Some(face.kind),
            Self::Quad(face) => Some(face.kind),
            Self::Sprite(sprite) => Some(match sprite.anchor {
                SpriteAnchor::Top => PolygonKind::SpriteTopAnchor,
                SpriteAnchor::Bottom => PolygonKind::SpriteBottomAnchor,
            }),
            Self::Unknown { .. } => None,
        }
    }

    /// Vertex indices referenced by this record.
    #[must_use]
    pub fn vertex_indices(&self) -> &[u16] {
        match self {
            Self::Triangle(face) => &face.indices,
            Self::Quad(face) => &face.indices,
            Self::Sprite(sprite) => std::slice::from_ref(&sprite.index),
            Self::Reserved { .. } | Self::Unknown { .. } => &[],
        }
    }
}

/// Decode the polygon record under the cursor.
///
/// Returns the record and the bytes it occupied. An unknown discriminant is
/// returned as [`Polygon::Unknown`] with zero bytes consumed; its size cannot
/// be known, so the caller must stop reading records from this object.
pub fn read_polygon(cursor: &mut RecordCursor<'_>) -> Result<(Polygon, usize)> {
    let start = cursor.position();
    let tag = cursor.peek_u16()?;

    let Some(kind) = PolygonKind::from_tag(tag) else {
        cursor.require(4, "polygon header")?;
        let mut probe = cursor.clone();
        probe.read_u16()?;
        let subtype = probe.read_u16()?;
        return Ok((Polygon::Unknown { tag, subtype }, 0));
    };

    cursor.require(kind.record_size(), "polygon record")?;
    cursor.read_u16()?;
    let subtype = cursor.read_u16()?;

    let polygon = match kind {
        PolygonKind::Reserved => Polygon::Reserved {
            subtype,
            payload: cursor.read_bytes::<14>()?.to_vec(),
        },
        PolygonKind::FlatTriFaceColor => {
            let indices = cursor.read_u16_block::<3>()?;
            cursor.skip(2, "polygon padding")?;
            Polygon::Triangle(Face {
                kind,
                subtype,
                indices,
                texturing: None,
                shading: Shading::Face(Rgb::from_packed(cursor.read_u32()?)),
            })
        }
        PolygonKind::TexturedTriFaceColor => {
            let indices = cursor.read_u16_block::<3>()?;
            let texturing = read_texturing::<3>(cursor)?;
            Polygon::Triangle(Face {
                kind,
                subtype,
                indices,
                texturing: Some(texturing),
                shading: Shading::Face(Rgb::from_packed(cursor.read_u32()?)),
            })
        }
        PolygonKind::FlatQuadFaceColor => Polygon::Quad(Face {
            kind,
            subtype,
            indices: cursor.read_u16_block::<4>()?,
            texturing: None,
            shading: Shading::Face(Rgb::from_packed(cursor.read_u32()?)),
        }),
        PolygonKind::TexturedQuadFaceColor => {
            let indices = cursor.read_u16_block::<4>()?;
            let texturing = read_texturing::<4>(cursor)?;
            Polygon::Quad(Face {
                kind,
                subtype,
                indices,
                texturing: Some(texturing),
                shading: Shading::Face(Rgb::from_packed(cursor.read_u32()?)),
            })
        }
        PolygonKind::FlatTriVertexColor => {
            let indices = cursor.read_u16_block::<3>()?;
            cursor.skip(2, "polygon padding")?;
            Polygon::Triangle(Face {
                kind,
                subtype,
                indices,
                texturing: None,
                shading: read_vertex_colors::<3>(cursor)?,
            })
        }
        PolygonKind::TexturedTriVertexColor => {
            let indices = cursor.read_u16_block::<3>()?;
            let texturing = read_texturing::<3>(cursor)?;
            Polygon::Triangle(Face {
                kind,
                subtype,
                indices,
                texturing: Some(texturing),
                shading: read_vertex_colors::<3>(cursor)?,
            })
        }
        PolygonKind::FlatQuadVertexColor => Polygon::Quad(Face {
            kind,
            subtype,
            indices: cursor.read_u16_block::<4>()?,
            texturing: None,
            shading: read_vertex_colors::<4>(cursor)?,
        }),
        PolygonKind::TexturedQuadVertexColor => {
            let indices = cursor.read_u16_block::<4>()?;
            let texturing = read_texturing::<4>(cursor)?;
            Polygon::Quad(Face {
                kind,
                subtype,
                indices,
                texturing: Some(texturing),
                shading: read_vertex_colors::<4>(cursor)?,
            })
        }
        PolygonKind::SpriteTopAnchor | PolygonKind::SpriteBottomAnchor => {
            let index = cursor.read_u16()?;
            let width = cursor.read_u16()?;
            let height = cursor.read_u16()?;
            let texture = cursor.read_u16()?;
            let (anchor, color) = if kind == PolygonKind::SpriteTopAnchor {
                (SpriteAnchor::Top, u32::from(cursor.read_u16()?))
            } else {
                (SpriteAnchor::Bottom, cursor.read_u32()?)
            };
            Polygon::Sprite(Sprite {
                anchor,
                subtype,
                index,
                width,
                height,
                texture,
                color,
            })
        }
    };

    let consumed = cursor.position() - start;
    debug_assert_eq!(consumed, kind.record_size(), "layout of {kind:?}");
    debug!("Polygon {:?} at offset {} ({} bytes)", kind, start, consumed);
    Ok((polygon, consumed))
}

/// Texture id, two opaque words, the UV block and one trailing opaque word.
fn read_texturing<const N: usize>(cursor: &mut RecordCursor<'_>) -> Result<Texturing<N>> {
    let texture = cursor.read_u16()?;
    cursor.skip(4, "polygon texture padding")?;
    let texels = cursor.read_texel_block::<N>()?;
    cursor.skip(2, "polygon texture padding")?;
    Ok(Texturing { texture, texels })
}

fn read_vertex_colors<const N: usize>(cursor: &mut RecordCursor<'_>) -> Result<Shading<N>> {
    let packed = cursor.read_u32_block::<N>()?;
    Ok(Shading::Vertex(packed.map(Rgb::from_packed)))
}
