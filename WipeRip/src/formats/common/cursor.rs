//! Sequential record cursor with per-field byte-order correction
//!
//! Records in the PRM and track files are fixed layouts whose multi-byte
//! fields were written with two different swap granularities:
//!
//! - *field* reads (`read_u16`, `read_i32`, ...) convert one scalar.
//! - *block* reads (`read_u16_block`, `read_texel_block`, ...) reverse the
//!   whole array as one run of bytes before interpreting it. For scalar
//!   arrays this reverses element order; for byte pairs it also exchanges
//!   the two components of every pair.
//!
//! The cursor only moves forward. [`RecordCursor::peek_u16`] is the single
//! exception, used to look at a record discriminant before choosing a layout.

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use super::types::Texel;
use crate::error::{Error, Result};

/// Forward-only reader over a borrowed byte source.
///
/// `B` is the byte order of the source (`BigEndian` for PRM/track files,
/// `LittleEndian` for container and image headers).
#[derive(Debug, Clone)]
pub struct RecordCursor<'a, B: ByteOrder = BigEndian> {
    inner: Cursor<&'a [u8]>,
    order: PhantomData<B>,
}

impl<'a, B: ByteOrder> RecordCursor<'a, B> {
    /// Create a cursor positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
            order: PhantomData,
        }
    }

    /// Current offset from the start of the source.
    #[must_use]
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Total length of the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Whether the source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with [`Error::TruncatedStream`] unless `needed` bytes remain.
    pub fn require(&self, needed: usize, record: &'static str) -> Result<()> {
        let available = self.remaining();
        if available < needed {
            return Err(Error::truncated(record, self.position(), needed, available));
        }
        Ok(())
    }

    /// Skip `count` opaque bytes.
    pub fn skip(&mut self, count: usize, record: &'static str) -> Result<()> {
        self.require(count, record)?;
        self.inner.seek(SeekFrom::Current(count as i64))?;
        Ok(())
    }

    /// Read `N` raw bytes with no byte-order handling.
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.require(N, "byte array")?;
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Look at the next `u16` without consuming it.
    pub fn peek_u16(&mut self) -> Result<u16> {
        self.require(2, "record discriminant")?;
        let start = self.inner.position();
        let value = self.inner.read_u16::<B>()?;
        self.inner.set_position(start);
        Ok(value)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1, "u8 field")?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.require(2, "u16 field")?;
        Ok(self.inner.read_u16::<B>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.require(2, "i16 field")?;
        Ok(self.inner.read_i16::<B>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.require(4, "u32 field")?;
        Ok(self.inner.read_u32::<B>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.require(4, "i32 field")?;
        Ok(self.inner.read_i32::<B>()?)
    }

    /// Read `len` bytes and reverse them as one block.
    fn read_reversed(&mut self, len: usize, record: &'static str) -> Result<Vec<u8>> {
        self.require(len, record)?;
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        buf.reverse();
        Ok(buf)
    }
}

// Block reads only occur in the big-endian files. A reversed big-endian run
// is a little-endian run of the same elements in reverse order.
impl RecordCursor<'_, BigEndian> {
    /// Read a block-swapped `u16` array.
    pub fn read_u16_block<const N: usize>(&mut self) -> Result<[u16; N]> {
        let bytes = self.read_reversed(N * 2, "u16 block")?;
        let mut out = [0u16; N];
        LittleEndian::read_u16_into(&bytes, &mut out);
        Ok(out)
    }

    /// Read a block-swapped `i16` array.
    pub fn read_i16_block<const N: usize>(&mut self) -> Result<[i16; N]> {
        let bytes = self.read_reversed(N * 2, "i16 block")?;
        let mut out = [0i16; N];
        LittleEndian::read_i16_into(&bytes, &mut out);
        Ok(out)
    }

    /// Read a block-swapped `u32` array.
    pub fn read_u32_block<const N: usize>(&mut self) -> Result<[u32; N]> {
        let bytes = self.read_reversed(N * 4, "u32 block")?;
        let mut out = [0u32; N];
        LittleEndian::read_u32_into(&bytes, &mut out);
        Ok(out)
    }

    /// Read a block-swapped `i32` array.
    pub fn read_i32_block<const N: usize>(&mut self) -> Result<[i32; N]> {
        let bytes = self.read_reversed(N * 4, "i32 block")?;
        let mut out = [0i32; N];
        LittleEndian::read_i32_into(&bytes, &mut out);
        Ok(out)
    }

    /// Read a block-swapped array of `(u, v)` byte pairs.
    ///
    /// Pair order is reversed and each pair's components trade places.
    pub fn read_texel_block<const N: usize>(&mut self) -> Result<[Texel; N]> {
        let bytes = self.read_reversed(N * 2, "texel block")?;
        Ok(std::array::from_fn(|i| Texel {
            u: bytes[i * 2],
            v: bytes[i * 2 + 1],
        }))
    }
}
