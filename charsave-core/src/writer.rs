//! Sequential output buffer mirroring [`CursorReader`](crate::reader::CursorReader)

use crate::constants::MAX_STRING_LEN;
use crate::error::CodecError;
use bytes::{BufMut, Bytes, BytesMut};

/// Append-only writer of little-endian primitives
#[derive(Debug, Default)]
pub struct BufferWriter {
    buf: BytesMut,
}

impl BufferWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View of the bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and return the accumulated bytes
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Write a one-byte boolean
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    /// Write a little-endian i32
    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Write a little-endian i64
    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    /// Write a little-endian u16
    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    /// Write a single byte
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a little-endian f32
    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    /// Write three consecutive f32 values
    pub fn write_vec3(&mut self, value: &[f32; 3]) {
        for component in value {
            self.buf.put_f32_le(*component);
        }
    }

    /// Write raw bytes verbatim
    pub fn write_opaque(&mut self, value: &[u8]) {
        self.buf.put_slice(value);
    }

    /// Write a one-byte length followed by the string bytes
    pub fn write_string(&mut self, value: &[u8]) -> Result<(), CodecError> {
        if value.len() > MAX_STRING_LEN {
            return Err(CodecError::OversizedString(value.len()));
        }
        self.buf.put_u8(value.len() as u8);
        self.buf.put_slice(value);
        Ok(())
    }

    /// Write an i32 length followed by the raw bytes
    pub fn write_blob(&mut self, value: &[u8]) -> Result<(), CodecError> {
        self.write_count(value.len())?;
        self.buf.put_slice(value);
        Ok(())
    }

    /// Write a sequence count taken from a collection's length
    pub fn write_count(&mut self, len: usize) -> Result<(), CodecError> {
        let count = i32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        self.buf.put_i32_le(count);
        Ok(())
    }

    /// Build a sub-region in its own buffer, then append `[len:i32][bytes]`
    ///
    /// The length is measured from the bytes `build` actually produced.
    /// Returns that length.
    pub fn write_nested<F>(&mut self, build: F) -> Result<usize, CodecError>
    where
        F: FnOnce(&mut BufferWriter) -> Result<(), CodecError>,
    {
        let mut inner = BufferWriter::new();
        build(&mut inner)?;

        let len = inner.len();
        self.write_count(len)?;
        self.buf.put_slice(&inner.buf);
        Ok(len)
    }
}
