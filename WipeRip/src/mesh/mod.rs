//! Mesh reconstruction
//!
//! Turns decoded objects and tracks into flat position, UV and color lists
//! with faces indexing into each. The three lists keep separate index spaces:
//! a UV is only appended for a textured face, a color for every face that is
//! emitted.

pub mod object;
pub mod track;
pub mod uv;

pub use object::{QUAD_WINDING, TRIANGLE_WINDING, reconstruct_object};
pub use track::{BOOST_COLOR, reconstruct_sections, reconstruct_track};
pub use uv::{normalize_texel, orient_uv, texel_to_uv, track_face_uvs};

use glam::{IVec3, Vec2};
use serde::{Deserialize, Serialize};

use crate::formats::common::Rgb;
use crate::formats::prm::SpriteAnchor;

/// Options for mesh reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Drop faces that use the same vertex more than once.
    pub suppress_degenerates: bool,
    /// Collect sprite records as anchor instances.
    pub include_sprites: bool,
}

impl MeshOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_suppress_degenerates(mut self, suppress: bool) -> Self {
        self.suppress_degenerates = suppress;
        self
    }

    #[must_use]
    pub fn with_sprites(mut self, include: bool) -> Self {
        self.include_sprites = include;
        self
    }
}

/// What a face is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Untextured,
    /// Index into the images of the object's container.
    Texture(u16),
    /// Composite texture of a track face.
    TrackTile(u8),
}

/// One face corner. All indices are 0-based into the mesh lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: usize,
    pub uv: Option<usize>,
    pub color: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFace {
    /// Corners in output winding order.
    pub corners: Vec<Corner>,
    pub material: Material,
}

/// A sprite resolved to its anchor vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInstance {
    pub anchor: SpriteAnchor,
    pub position: IVec3,
    pub width: u16,
    pub height: u16,
    pub texture: u16,
    pub color: Rgb,
}

/// Counters gathered while reconstructing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MeshStats {
    pub degenerate_faces: usize,
    pub suppressed_faces: usize,
    /// Textured faces emitted without UVs because their image is missing.
    pub missing_textures: usize,
    /// Faces skipped for referencing a vertex that does not exist.
    pub invalid_faces: usize,
}

/// Index-correct geometry for one exported entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconstructedMesh {
    pub name: String,
    pub positions: Vec<IVec3>,
    pub uvs: Vec<Vec2>,
    pub colors: Vec<Rgb>,
    pub faces: Vec<MeshFace>,
    pub sprites: Vec<SpriteInstance>,
    /// Position offset to write alongside when it was not baked in.
    pub offset: Option<IVec3>,
    pub stats: MeshStats,
}

impl ReconstructedMesh {
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<IVec3>) -> Self {
        Self {
            name: name.into(),
            positions,
            ..Self::default()
        }
    }

    /// Whether any face carries UVs.
    #[must_use]
    pub fn is_textured(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Whether every corner indexes into the lists it references.
    #[must_use]
    pub fn indices_in_range(&self) -> bool {
        self.faces.iter().flat_map(|f| &f.corners).all(|c| {
            c.position < self.positions.len()
                && c.color < self.colors.len()
                && c.uv.is_none_or(|uv| uv < self.uvs.len())
        })
    }
}
