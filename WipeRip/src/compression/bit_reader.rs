//! MSB-first bit reader for the container stream

/// Reads bits most-significant first, pulling a fresh byte whenever the
/// current one is used up. Fields may straddle byte boundaries.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    src: &'a [u8],
    pos: usize,
    current: u8,
    mask: u8,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            current: 0,
            mask: 0,
        }
    }

    /// Number of source bytes fetched so far.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.pos
    }

    /// Read one bit, or `None` once the input is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.mask == 0 {
            self.current = *self.src.get(self.pos)?;
            self.pos += 1;
            self.mask = 0x80;
        }
        let bit = self.current & self.mask != 0;
        self.mask >>= 1;
        Some(bit)
    }

    /// Read a `width`-bit unsigned field, high bit first.
    pub fn read_bits(&mut self, width: u32) -> Option<u32> {
        let mut value = 0u32;
        for shift in (0..width).rev() {
            if self.read_bit()? {
                value |= 1 << shift;
            }
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_cross_byte_boundaries() {
        // 1 | 0100_0001 | 0000...
        let data = [0b1010_0000, 0b1000_0000];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bits(8), Some(0x41));
        assert_eq!(reader.bytes_consumed(), 2);
    }

    #[test]
    fn test_exhaustion() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(8), Some(0xFF));
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.read_bits(4), None);
    }
}
