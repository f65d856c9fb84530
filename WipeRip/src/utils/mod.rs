//! Utility functions

pub mod path;

pub use path::{asset_stem, find_file, has_extension, require_file};
