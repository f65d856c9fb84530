//! Sliding-window decoder for the `.CMP` payload stream

use tracing::debug;

use super::bit_reader::BitReader;

/// Size of the history window in bytes.
pub const WINDOW_SIZE: usize = 0x2000;

const WINDOW_MASK: usize = WINDOW_SIZE - 1;
const LITERAL_BITS: u32 = 8;
const POSITION_BITS: u32 = 13;
const LENGTH_BITS: u32 = 4;
const LENGTH_BIAS: usize = 2;

/// Most output bytes one input byte can expand to: an 18-bit copy yields at
/// most 18 bytes.
const MAX_EXPANSION: usize = 8;

/// Why the decoder stopped producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A back-reference with position zero was read.
    Sentinel,
    /// The compressed input ran out first.
    InputExhausted,
    /// The requested output length was reached.
    OutputFull,
}

/// Result of decoding one payload stream.
#[derive(Debug, Clone)]
pub struct Unpacked {
    pub data: Vec<u8>,
    pub termination: Termination,
    /// Compressed bytes read.
    pub consumed: usize,
}

/// Decode a payload stream into at most `expected_len` bytes.
///
/// Each control bit selects a literal byte (set) or a back-reference into the
/// window (clear). A back-reference copies `length + 1` bytes starting at
/// `position`, writing each produced byte back into the window as it goes.
/// Malformed or short input never fails; whatever was decoded is returned.
///
/// `expected_len` comes from an untrusted header, so the output buffer is
/// only reserved up to what `src` could possibly produce.
#[must_use]
pub fn unpack(src: &[u8], expected_len: usize) -> Unpacked {
    let mut window = vec![0u8; WINDOW_SIZE];
    let mut window_pos = 1usize;
    let mut out = Vec::with_capacity(expected_len.min(src.len().saturating_mul(MAX_EXPANSION)));
    let mut bits = BitReader::new(src);

    let termination = 'stream: loop {
        if out.len() >= expected_len {
            break Termination::OutputFull;
        }
        let Some(is_literal) = bits.read_bit() else {
            break Termination::InputExhausted;
        };

        if is_literal {
            let Some(byte) = bits.read_bits(LITERAL_BITS) else {
                break Termination::InputExhausted;
            };
            let byte = byte as u8;
            window[window_pos & WINDOW_MASK] = byte;
            window_pos += 1;
            out.push(byte);
            continue;
        }

        let Some(position) = bits.read_bits(POSITION_BITS) else {
            break Termination::InputExhausted;
        };
        if position == 0 {
            break Termination::Sentinel;
        }
        let Some(length) = bits.read_bits(LENGTH_BITS) else {
            break Termination::InputExhausted;
        };
        let length = length as usize + LENGTH_BIAS;
        let position = position as usize;

        for i in 0..=length {
            if out.len() >= expected_len {
                break 'stream Termination::OutputFull;
            }
            let byte = window[(i + position) & WINDOW_MASK];
            window[window_pos & WINDOW_MASK] = byte;
            window_pos += 1;
            out.push(byte);
        }
    };

    debug!(
        "Unpacked {} of {} bytes from {} compressed ({:?})",
        out.len(),
        expected_len,
        bits.bytes_consumed(),
        termination
    );

    Unpacked {
        data: out,
        termination,
        consumed: bits.bytes_consumed(),
    }
}
