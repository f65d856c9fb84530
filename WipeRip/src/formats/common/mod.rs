//! Common types and utilities shared across the Wipeout formats

pub mod cursor;
pub mod types;

pub use cursor::RecordCursor;
pub use types::{Rgb, Texel};
