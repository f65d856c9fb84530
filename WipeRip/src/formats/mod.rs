//! File format handlers for the Wipeout asset formats
//!
//! - `cmp` - packed image containers
//! - `tim` - images unpacked from containers (little-endian)
//! - `prm` - 3D objects (big-endian)
//! - `track` - track geometry and texture index files (big-endian)

pub mod cmp;
pub mod common;
pub mod prm;
pub mod tim;
pub mod track;

// Re-export common types for convenience
pub use common::{RecordCursor, Rgb, Texel};

// Re-export main decoded types
pub use cmp::{PackedContainer, parse_container_bytes, read_container};
pub use prm::{Object, PlacedObject, Polygon, PolygonKind, PositionMode, parse_objects, read_objects};
pub use tim::{Image, PixelFormat, decode_image, decode_images};
pub use track::{Game, Track, TrackFiles, read_track};
