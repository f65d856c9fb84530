//! # WipeRip
//!
//! A pure-Rust ripper for the assets of the PlayStation Wipeout games.
//!
//! ## Supported Formats
//!
//! - **CMP containers** - LZ-packed bundles of images
//! - **TIM images** - 4/8-bit paletted and 16-bit true color
//! - **PRM objects** - scenery, ships and sky meshes
//! - **Track files** - `TRV`/`TRF`/`TRS` geometry, `TTF` texture index, `TEX` attributes
//!
//! Everything is exported as Wavefront OBJ/MTL with PNG textures.
//!
//! ## Quick Start
//!
//! ### Ripping a Track
//!
//! ```no_run
//! use wiperip::converter::ExportOptions;
//! use wiperip::formats::Game;
//! use wiperip::rip::rip_track;
//!
//! let report = rip_track("WIPEOUT/TRACK02", "out/", Game::Wipeout, &ExportOptions::default())?;
//! println!("Wrote {} files", report.files.len());
//! # Ok::<(), wiperip::Error>(())
//! ```
//!
//! ### Decoding Objects
//!
//! ```no_run
//! use wiperip::prelude::*;
//!
//! let images = load_images("SHIPS.CMP")?;
//! for object in read_objects("SHIPS.PRM")? {
//!     let placed = object.place(PositionMode::Bake);
//!     let mesh = reconstruct_object(&placed, &images, &MeshOptions::default());
//!     println!("{}: {} faces", mesh.name, mesh.faces.len());
//! }
//! # Ok::<(), wiperip::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `wiperip` command-line binary

pub mod compression;
pub mod converter;
pub mod error;
pub mod formats;
pub mod mesh;
pub mod rip;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        Game, Image, Object, PlacedObject, Polygon, PolygonKind, PositionMode, Track, TrackFiles,
        decode_images, read_container, read_objects, read_track,
    };
    pub use crate::mesh::{MeshOptions, ReconstructedMesh, reconstruct_object, reconstruct_track};

    pub use crate::converter;
    pub use crate::converter::{ExportOptions, ObjWriter};
    pub use crate::rip::{RipReport, load_images, rip_common, rip_track};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
