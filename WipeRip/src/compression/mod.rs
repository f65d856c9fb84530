//! Decompression for the `.CMP` container stream
//!
//! The stream is a bit-flag LZ variant over an 8 KiB window: literals are
//! 8-bit fields, back-references are a 13-bit window position followed by a
//! 4-bit length, and position zero ends the stream.

pub mod bit_reader;
pub mod window;

pub use bit_reader::BitReader;
pub use window::{Termination, Unpacked, WINDOW_SIZE, unpack};
