//! Constants and limits for the character save format

/// Length in bytes of the SHA-512 digest that closes every envelope
pub const DIGEST_LEN: usize = 64;

/// Largest string the one-byte length prefix can describe
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Size of the leading total-length field
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Envelope overhead: total length + digest length field + digest
pub const ENVELOPE_OVERHEAD: usize = LENGTH_PREFIX_SIZE + 4 + DIGEST_LEN;

/// Smallest encoding of a string (empty, length byte only)
pub const STRING_MIN_SIZE: usize = 1;

/// Three little-endian f32 components
pub const POINT_SIZE: usize = 12;

/// set flag + position, the floats are present regardless of the flag
pub const FLAGGED_POINT_MIN_SIZE: usize = 1 + POINT_SIZE;

/// id + three flagged points + home point + map data flag
pub const WORLD_MIN_SIZE: usize = 8 + 3 * FLAGGED_POINT_MIN_SIZE + POINT_SIZE + 1;

/// name, stack, durability, grid position, equipped, quality, variant,
/// crafter id, crafter name, opaque trailer
pub const ITEM_MIN_SIZE: usize = STRING_MIN_SIZE + 4 + 4 + 8 + 1 + 4 + 4 + 8 + STRING_MIN_SIZE + 4;

/// name + hp left + stamina left
pub const FOOD_MIN_SIZE: usize = STRING_MIN_SIZE + 4 + 4;

/// id + level + unused slot
pub const SKILL_MIN_SIZE: usize = 4 + 4 + 4;

/// name + level
pub const STATION_MIN_SIZE: usize = STRING_MIN_SIZE + 4;

/// key + value
pub const TEXT_ENTRY_MIN_SIZE: usize = 2 * STRING_MIN_SIZE;

/// Fixed-width primitive kinds that make up the stream
///
/// Every field in the format is one of these (or a length-prefixed string or
/// blob built from them); the codec picks the kind per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// One byte, nonzero is true
    Bool,
    /// Little-endian signed 32-bit integer
    I32,
    /// Little-endian signed 64-bit integer
    I64,
    /// Little-endian unsigned 16-bit integer
    U16,
    /// Single unsigned byte
    U8,
    /// Little-endian IEEE-754 single precision float
    F32,
}

impl Primitive {
    /// Returns the encoded width in bytes
    pub const fn size(&self) -> usize {
        match self {
            Primitive::Bool | Primitive::U8 => 1,
            Primitive::U16 => 2,
            Primitive::I32 | Primitive::F32 => 4,
            Primitive::I64 => 8,
        }
    }
}
