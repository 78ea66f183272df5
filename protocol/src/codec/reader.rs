//! Sequential reader over a decoded buffer.

use super::{varint, CodecError};

/// Hands out consecutive fixed-width slices of a buffer.
///
/// Decoders validate the total length up front, then walk the fields in
/// declaration order. Running off the end is still an error rather than a
/// panic, in case a caller skipped the length check.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Takes the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::UnexpectedEnd {
                wanted: len,
                remaining,
            });
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Takes the next `N` bytes as an array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads one unsigned varint.
    pub fn read_varint(&mut self) -> Result<u64, CodecError> {
        let (value, used) = varint::decode(&self.bytes[self.position..])?;
        self.position += used;
        Ok(value)
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_takes() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.take(2).unwrap(), &[1, 2]);
        assert_eq!(reader.take_array::<1>().unwrap(), [3]);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.take(2).unwrap(), &[4, 5]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_take_past_end_errors() {
        let data = [1u8, 2];
        let mut reader = ByteReader::new(&data);
        assert_eq!(
            reader.take(3),
            Err(CodecError::UnexpectedEnd {
                wanted: 3,
                remaining: 2
            })
        );
        // A failed take consumes nothing.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_zero_length_take() {
        let data: [u8; 0] = [];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.take(0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_read_varint_advances() {
        let data = [0xAC, 0x02, 0x07];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_varint().unwrap(), 300);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_varint().unwrap(), 7);
    }
}
