//! Error types for save file codec operations

use alloc::string::String;

/// Errors that can occur while decoding or encoding a character save
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A read asked for more bytes than remain in the input
    #[cfg_attr(
        feature = "std",
        error("Truncated input at offset {offset}: needed {needed} bytes, {remaining} remain")
    )]
    TruncatedInput {
        /// Cursor position when the read was attempted.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// String too long for the one-byte length prefix
    #[cfg_attr(feature = "std", error("String of {0} bytes exceeds the 255 byte limit"))]
    OversizedString(usize),

    /// A sequence count that cannot fit in the remaining input
    #[cfg_attr(
        feature = "std",
        error("Malformed count {count} at offset {offset}: only {remaining} bytes remain")
    )]
    MalformedCount {
        /// Offset of the count field.
        offset: usize,
        /// The count as read from the stream.
        count: i32,
        /// Bytes left after the count field.
        remaining: usize,
    },

    /// Collection or blob too large for an i32 length field
    #[cfg_attr(feature = "std", error("Length {0} does not fit in an i32 field"))]
    LengthOverflow(usize),

    /// IO error during read/write
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}
