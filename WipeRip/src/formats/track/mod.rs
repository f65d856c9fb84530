//! Track geometry support
//!
//! Track data is split over fixed-record files read purely by count:
//!
//! | File          | Record            | Size |
//! |---------------|-------------------|------|
//! | `TRACK.TRV`   | vertex            | 16   |
//! | `TRACK.TRF`   | face              | 20   |
//! | `LIBRARY.TTF` | texture index     | 42   |
//! | `TRACK.TRS`   | section           | 156  |
//! | `TRACK.TEX`   | texture attribute | 2    |
//!
//! `TRACK.TEX` only exists for Wipeout 2097, where it overrides the tile and
//! flags stored in each face.

pub mod compose;
pub mod reader;

pub use compose::{TILE_EDGE, TILES_PER_EDGE, compose_tiles, compose_track_images};
pub use reader::{
    TrackFiles, merge_texture_attributes, parse_faces, parse_sections, parse_texture_attributes,
    parse_texture_index, parse_vertices, read_track,
};

use std::fmt;
use std::str::FromStr;

use glam::IVec3;
use serde::Serialize;

use crate::formats::common::Rgb;
use crate::formats::tim::Image;

pub const VERTEX_RECORD_SIZE: usize = 16;
pub const FACE_RECORD_SIZE: usize = 20;
pub const TEXTURE_INDEX_RECORD_SIZE: usize = 42;
pub const SECTION_RECORD_SIZE: usize = 156;
pub const TEXTURE_ATTRIBUTE_RECORD_SIZE: usize = 2;

/// Which game's track layout to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Game {
    #[default]
    Wipeout,
    Wipeout2097,
}

impl Game {
    /// Whether faces take their tile and flags from `TRACK.TEX`.
    #[must_use]
    pub fn has_texture_attributes(self) -> bool {
        self == Self::Wipeout2097
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wipeout" | "1" | "wo" => Ok(Self::Wipeout),
            "2097" | "xl" | "wipeout2097" | "wipeout-xl" | "2" => Ok(Self::Wipeout2097),
            _ => Err(format!("Invalid game '{s}'. Valid values: wipeout, 2097")),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wipeout => write!(f, "Wipeout"),
            Self::Wipeout2097 => write!(f, "Wipeout 2097"),
        }
    }
}

/// Face flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FaceFlags(pub u8);

impl FaceFlags {
    /// No bits set. Every value contains it, so test walls with
    /// [`FaceFlags::is_wall`] rather than `contains`.
    pub const WALL: Self = Self(0);
    pub const TRACK: Self = Self(1);
    pub const WEAPON: Self = Self(2);
    pub const FLIP: Self = Self(4);
    pub const WEAPON_2: Self = Self(8);
    pub const UNKNOWN: Self = Self(16);
    pub const BOOST: Self = Self(32);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag bit is set.
    #[must_use]
    pub fn is_wall(self) -> bool {
        self == Self::WALL
    }
}

/// Section flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SectionFlags(pub u16);

impl SectionFlags {
    pub const JUMP: Self = Self(1);
    pub const JUNCTION_END: Self = Self(8);
    pub const JUNCTION_START: Self = Self(16);
    pub const JUNCTION: Self = Self(32);

    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackVertex {
    pub position: IVec3,
    pub padding: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackFace {
    /// Vertex indices in stored (block-swapped) order.
    pub indices: [i16; 4],
    pub normal: [i16; 3],
    /// Composite texture this face uses.
    pub tile: u8,
    pub flags: FaceFlags,
    pub color: Rgb,
}

/// The library images making up one composite texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureIndexEntry {
    /// Sixteen full-detail tiles in lookup order.
    pub nearest: [i16; 16],
    pub medium: [i16; 4],
    pub farthest: i16,
}

/// One segment of the racing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSection {
    pub next_junction: i32,
    pub previous: i32,
    pub next: i32,
    pub position: IVec3,
    pub first_face: u32,
    pub face_count: u16,
    pub flags: SectionFlags,
}

/// Per-face override from `TRACK.TEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureAttribute {
    pub tile: u8,
    pub flags: FaceFlags,
}

/// A fully decoded track.
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub vertices: Vec<TrackVertex>,
    pub faces: Vec<TrackFace>,
    pub texture_index: Vec<TextureIndexEntry>,
    pub sections: Vec<TrackSection>,
    /// One composite per texture index entry.
    pub images: Vec<Image>,
}
