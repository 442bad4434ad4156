//! Character encoding
//!
//! Produces the envelope:
//! 1. Total length (i32): byte length of the payload
//! 2. Payload:
//!    - Header counters, worlds, identity, instantiation flag
//!    - Body length (i32) and body, only when instantiated
//! 3. Digest length (i32, always 64)
//! 4. SHA-512 of the payload

use crate::error::CodecError;
use crate::trailer::seal;
use crate::types::{
    Appearance, Character, FlaggedPoint, Food, Inventory, Item, PlayerBody, Skill, Station,
    TextEntry, World,
};
use crate::writer::BufferWriter;
use bytes::Bytes;
#[cfg(feature = "std")]
use std::io::Write;

#[cfg(feature = "logging")]
use tracing::debug;

/// A record that can be appended to a [`BufferWriter`]
pub trait Encode {
    /// Append this record in stream order
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError>;
}

impl Encode for Bytes {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(self)
    }
}

impl Encode for i32 {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_i32(*self);
        Ok(())
    }
}

impl Encode for FlaggedPoint {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_bool(self.is_set);
        writer.write_vec3(&self.position);
        Ok(())
    }
}

impl Encode for World {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_i64(self.id);
        self.spawn.encode(writer)?;
        self.logout.encode(writer)?;
        self.death.encode(writer)?;
        writer.write_vec3(&self.home);

        writer.write_bool(self.map_data.is_some());
        if let Some(map) = &self.map_data {
            writer.write_blob(map)?;
        }
        Ok(())
    }
}

impl Encode for Item {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(&self.name)?;
        writer.write_i32(self.stack);
        writer.write_f32(self.durability);
        writer.write_i32(self.grid_pos[0]);
        writer.write_i32(self.grid_pos[1]);
        writer.write_bool(self.equipped);
        writer.write_i32(self.quality);
        writer.write_i32(self.variant);
        writer.write_i64(self.crafter_id);
        writer.write_string(&self.crafter_name)?;
        writer.write_opaque(&self.opaque);
        Ok(())
    }
}

impl Encode for Station {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(&self.name)?;
        writer.write_i32(self.level);
        Ok(())
    }
}

impl Encode for TextEntry {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(&self.key)?;
        writer.write_string(&self.value)
    }
}

impl Encode for Food {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(&self.name)?;
        writer.write_f32(self.hp_left);
        writer.write_f32(self.stamina_left);
        Ok(())
    }
}

impl Encode for Skill {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_i32(self.id);
        writer.write_f32(self.level);
        writer.write_opaque(&self.unused);
        Ok(())
    }
}

impl Encode for Inventory {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_i32(self.version);
        write_sequence(writer, &self.items)
    }
}

impl Encode for Appearance {
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_string(&self.beard)?;
        writer.write_string(&self.hair)?;
        writer.write_vec3(&self.skin_color);
        writer.write_vec3(&self.hair_color);
        writer.write_i32(self.model);
        Ok(())
    }
}

impl Encode for PlayerBody {
    /// Writes the body fields only; the length prefix belongs to the caller
    fn encode(&self, writer: &mut BufferWriter) -> Result<(), CodecError> {
        writer.write_i32(self.data_version);
        writer.write_f32(self.max_hp);
        writer.write_f32(self.hp);
        writer.write_f32(self.stamina);
        writer.write_bool(self.is_first_spawn);
        writer.write_f32(self.time_since_death);
        writer.write_string(&self.guardian_power)?;
        writer.write_f32(self.guardian_cooldown);

        self.inventory.encode(writer)?;

        write_sequence(writer, &self.recipes)?;
        write_sequence(writer, &self.stations)?;
        write_sequence(writer, &self.known_materials)?;
        write_sequence(writer, &self.shown_tutorials)?;
        write_sequence(writer, &self.uniques)?;
        write_sequence(writer, &self.trophies)?;
        write_sequence(writer, &self.biomes)?;
        write_sequence(writer, &self.texts)?;

        self.appearance.encode(writer)?;

        write_sequence(writer, &self.foods)?;
        writer.write_i32(self.skills_version);
        write_sequence(writer, &self.skills)
    }
}

/// Write an i32 count from `items.len()` followed by each record
pub fn write_sequence<T: Encode>(writer: &mut BufferWriter, items: &[T]) -> Result<(), CodecError> {
    writer.write_count(items.len())?;
    for item in items {
        item.encode(writer)?;
    }
    Ok(())
}

/// Encode the payload only: everything the digest covers
///
/// The instantiation flag comes from `character.body`, and the body length is
/// measured from the freshly written body bytes.
pub fn encode_payload(character: &Character) -> Result<Bytes, CodecError> {
    let mut writer = BufferWriter::new();

    writer.write_i32(character.version);
    writer.write_i32(character.kills);
    writer.write_i32(character.deaths);
    writer.write_i32(character.crafts);
    writer.write_i32(character.builds);
    write_sequence(&mut writer, &character.worlds)?;

    writer.write_string(&character.name)?;
    writer.write_i64(character.id);
    writer.write_string(&character.start_seed)?;

    writer.write_bool(character.is_instantiated());
    if let Some(body) = &character.body {
        let _body_len = writer.write_nested(|inner| body.encode(inner))?;
        #[cfg(feature = "logging")]
        debug!("Encoded player body of {} bytes", _body_len);
    }

    Ok(writer.freeze())
}

/// Encode a character into a complete envelope
pub fn encode_character(character: &Character) -> Result<Bytes, CodecError> {
    let payload = encode_payload(character)?;
    let envelope = seal(&payload)?;

    #[cfg(feature = "logging")]
    debug!(
        "Encoded character envelope: {} payload bytes, {} total",
        payload.len(),
        envelope.len()
    );

    Ok(envelope)
}

/// Encode a character and write the envelope to `writer`
#[cfg(feature = "std")]
pub fn write_character<W: Write>(character: &Character, writer: &mut W) -> Result<usize, CodecError> {
    let envelope = encode_character(character)?;
    writer.write_all(&envelope)?;
    Ok(envelope.len())
}
