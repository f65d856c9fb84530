//! Ripping whole asset groups
//!
//! A track directory is ripped into `ripped_track/`, `ripped_objects/` and
//! `ripped_sky/`; a common-data folder into one `ripped_NAME/` folder per
//! asset.

pub mod assets;
pub mod common;
pub mod track;
mod types;

pub use assets::{export_object_set, load_images, reconstruct_objects};
pub use common::{AssetPair, rip_common, rip_common_with_progress, scan_assets};
pub use track::{OBJECTS_DIR, SKY_DIR, TRACK_DIR, TrackInputs, rip_track, rip_track_with_progress};
pub use types::{RipPhase, RipProgress, RipProgressCallback, RipReport};
