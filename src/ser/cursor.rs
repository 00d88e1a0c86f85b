use crate::error::{CodecError, CodecResult, OffsetIssue};

/// Simple cursor over a byte slice providing structured reads with error
/// context. Failures carry the index of the field being parsed.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new cursor over the provided byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Returns the current offset within the slice.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes remaining in the cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Reads exactly `len` bytes from the cursor.
    pub fn read_exact(&mut self, len: usize, field: usize) -> CodecResult<&'a [u8]> {
        if self.offset + len > self.bytes.len() {
            return Err(CodecError::offset(OffsetIssue::Truncated, field));
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Reads a fixed-size byte array from the cursor.
    pub fn read_array<const N: usize>(&mut self, field: usize) -> CodecResult<[u8; N]> {
        let bytes = self.read_exact(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a little-endian `u32`, the fixed offset width.
    pub fn read_u32(&mut self, field: usize) -> CodecResult<u32> {
        let bytes = self.read_array::<4>(field)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Ensures that the reader consumed all bytes.
    pub fn ensure_consumed(&self, field: usize) -> CodecResult<()> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(CodecError::offset(OffsetIssue::TrailingBytes, field))
        }
    }
}

impl<'a> From<&'a [u8]> for ByteReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteReader::new(bytes)
    }
}
