//! Envelope framing and SHA-512 integrity trailer
//!
//! The digest exists for the game client's own verification. This crate
//! computes it when sealing but never checks it when decoding.

use crate::constants::{DIGEST_LEN, LENGTH_PREFIX_SIZE};
use crate::error::CodecError;
use crate::reader::CursorReader;
use crate::writer::BufferWriter;
use bytes::Bytes;
use sha2::{Digest, Sha512};

/// Compute the SHA-512 digest of a payload
pub fn compute_digest(payload: &[u8]) -> [u8; DIGEST_LEN] {
    let hash = Sha512::digest(payload);
    let mut result = [0u8; DIGEST_LEN];
    result.copy_from_slice(&hash);
    result
}

/// Wrap a payload as `[len:i32][payload][64:i32][sha512(payload)]`
pub fn seal(payload: &[u8]) -> Result<Bytes, CodecError> {
    let digest = compute_digest(payload);

    let mut writer =
        BufferWriter::with_capacity(LENGTH_PREFIX_SIZE + payload.len() + 4 + DIGEST_LEN);
    writer.write_blob(payload)?;
    writer.write_blob(&digest)?;
    Ok(writer.freeze())
}

/// Zero-copy view of an envelope's parts
///
/// Splitting only follows the length fields; it does not compare the digest
/// against the payload. Use [`Envelope::digest_matches`] for that.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Payload length as declared by the leading field
    pub declared_len: i32,

    /// Bytes covered by the digest
    pub payload: Bytes,

    /// Digest bytes as stored
    pub digest: Bytes,
}

impl Envelope {
    /// Split an envelope into length, payload and digest
    pub fn split(data: Bytes) -> Result<Self, CodecError> {
        let mut reader = CursorReader::new(data);

        let offset = reader.position();
        let declared_len = reader.read_i32()?;
        let payload_len = usize::try_from(declared_len).map_err(|_| CodecError::MalformedCount {
            offset,
            count: declared_len,
            remaining: reader.remaining(),
        })?;
        let payload = reader.read_blob(payload_len)?;

        let offset = reader.position();
        let digest_len = reader.read_i32()?;
        let digest_len = usize::try_from(digest_len).map_err(|_| CodecError::MalformedCount {
            offset,
            count: digest_len,
            remaining: reader.remaining(),
        })?;
        let digest = reader.read_blob(digest_len)?;

        Ok(Self {
            declared_len,
            payload,
            digest,
        })
    }

    /// Whether the stored digest is the SHA-512 of the payload
    pub fn digest_matches(&self) -> bool {
        self.digest[..] == compute_digest(&self.payload)[..]
    }
}
