//! Sequential cursor over an input buffer

use crate::constants::Primitive;
use crate::error::CodecError;
use bytes::{Buf, Bytes};

/// Forward-only reader of little-endian primitives
///
/// Every read either consumes exactly the bytes it names or fails with
/// [`CodecError::TruncatedInput`] without consuming anything.
#[derive(Debug, Clone)]
pub struct CursorReader {
    buf: Bytes,
    total: usize,
    validate_counts: bool,
}

impl CursorReader {
    /// Create a reader positioned at the start of `buf`
    pub fn new(buf: Bytes) -> Self {
        let total = buf.len();
        Self {
            buf,
            total,
            validate_counts: true,
        }
    }

    /// Enable or disable the sequence count pre-check in [`read_count`](Self::read_count)
    pub fn validate_counts(mut self, enabled: bool) -> Self {
        self.validate_counts = enabled;
        self
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.total - self.buf.remaining()
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), CodecError> {
        if self.buf.remaining() < needed {
            return Err(CodecError::TruncatedInput {
                offset: self.position(),
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    fn ensure_primitive(&self, kind: Primitive) -> Result<(), CodecError> {
        self.ensure(kind.size())
    }

    /// Read a one-byte boolean (nonzero is true)
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        self.ensure_primitive(Primitive::Bool)?;
        Ok(self.buf.get_u8() != 0)
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.ensure_primitive(Primitive::I32)?;
        Ok(self.buf.get_i32_le())
    }

    /// Read a little-endian i64
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        self.ensure_primitive(Primitive::I64)?;
        Ok(self.buf.get_i64_le())
    }

    /// Read a little-endian u16
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.ensure_primitive(Primitive::U16)?;
        Ok(self.buf.get_u16_le())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.ensure_primitive(Primitive::U8)?;
        Ok(self.buf.get_u8())
    }

    /// Read a little-endian f32
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        self.ensure_primitive(Primitive::F32)?;
        Ok(self.buf.get_f32_le())
    }

    /// Read three consecutive f32 values
    pub fn read_vec3(&mut self) -> Result<[f32; 3], CodecError> {
        self.ensure(3 * Primitive::F32.size())?;
        Ok([
            self.buf.get_f32_le(),
            self.buf.get_f32_le(),
            self.buf.get_f32_le(),
        ])
    }

    /// Read `N` raw bytes without interpreting them
    pub fn read_opaque<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Read exactly `len` raw bytes as a zero-copy slice of the input
    pub fn read_blob(&mut self, len: usize) -> Result<Bytes, CodecError> {
        self.ensure(len)?;
        Ok(self.buf.copy_to_bytes(len))
    }

    /// Read a length-prefixed string: one length byte, then that many bytes
    ///
    /// Contents are returned verbatim; they are not required to be UTF-8.
    pub fn read_string(&mut self) -> Result<Bytes, CodecError> {
        self.ensure_primitive(Primitive::U8)?;
        let len = self.buf[0] as usize;
        self.ensure(1 + len)?;
        self.buf.advance(1);
        Ok(self.buf.copy_to_bytes(len))
    }

    /// Read an i32 sequence count
    ///
    /// Negative counts are always rejected. With count validation on, a
    /// count whose elements could not fit in the remaining input (given the
    /// smallest possible element of `min_element_size` bytes) is rejected
    /// before any element is read.
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize, CodecError> {
        let offset = self.position();
        let count = self.read_i32()?;
        let remaining = self.buf.remaining();

        if count < 0 {
            return Err(CodecError::MalformedCount {
                offset,
                count,
                remaining,
            });
        }

        if self.validate_counts {
            let span = (count as usize).saturating_mul(min_element_size);
            if span > remaining {
                return Err(CodecError::MalformedCount {
                    offset,
                    count,
                    remaining,
                });
            }
        }

        Ok(count as usize)
    }
}
