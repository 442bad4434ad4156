//! # charsave core
//!
//! Byte-exact decoder and encoder for life-sim character save files.
//!
//! ## Modules
//!
//! - `constants`: Format constants, record minimum sizes and primitive kinds
//! - `types`: Record model (Character, PlayerBody, World, Item, Food, Skill)
//! - `reader`: Sequential little-endian cursor over the input
//! - `writer`: Sequential output buffer with nested length-measured regions
//! - `decoder`: Stream to record tree
//! - `encoder`: Record tree to envelope
//! - `trailer`: Envelope framing and SHA-512 digest

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod reader;
pub mod trailer;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use bytes::Bytes;
pub use decoder::{decode_character_from_bytes, decode_character_zero_copy, Decoder};
pub use encoder::encode_character;
pub use error::CodecError;
pub use types::{Character, Food, Item, PlayerBody, Skill, World};

/// Result type alias for codec operations
pub type Result<T> = core::result::Result<T, CodecError>;
