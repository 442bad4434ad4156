//! Character decoding
//!
//! Walks the stream in the fixed field order of the save format. The
//! decoder never reads the digest trailer; any bytes after the decoded
//! structure are ignored.

use crate::constants::{
    FLAGGED_POINT_MIN_SIZE, FOOD_MIN_SIZE, ITEM_MIN_SIZE, SKILL_MIN_SIZE, STATION_MIN_SIZE,
    STRING_MIN_SIZE, TEXT_ENTRY_MIN_SIZE, WORLD_MIN_SIZE,
};
use crate::error::CodecError;
use crate::reader::CursorReader;
use crate::types::{
    Appearance, Character, FlaggedPoint, Food, Inventory, Item, PlayerBody, Skill, Station,
    TextEntry, World,
};
use alloc::vec::Vec;
use bytes::Bytes;
#[cfg(feature = "std")]
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// A record that can be read from a [`CursorReader`]
pub trait Decode: Sized {
    /// Smallest possible encoding of one record, used to sanity-check counts
    const MIN_SIZE: usize;

    /// Read one record, consuming exactly its bytes
    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError>;
}

impl Decode for Bytes {
    const MIN_SIZE: usize = STRING_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        reader.read_string()
    }
}

impl Decode for i32 {
    const MIN_SIZE: usize = 4;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        reader.read_i32()
    }
}

impl Decode for FlaggedPoint {
    const MIN_SIZE: usize = FLAGGED_POINT_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        // The flag never gates the three floats
        let is_set = reader.read_bool()?;
        let position = reader.read_vec3()?;
        Ok(Self { is_set, position })
    }
}

impl Decode for World {
    const MIN_SIZE: usize = WORLD_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        let id = reader.read_i64()?;
        let spawn = FlaggedPoint::decode(reader)?;
        let logout = FlaggedPoint::decode(reader)?;
        let death = FlaggedPoint::decode(reader)?;
        let home = reader.read_vec3()?;

        let map_data = if reader.read_bool()? {
            let offset = reader.position();
            let len = reader.read_i32()?;
            let len = usize::try_from(len).map_err(|_| CodecError::MalformedCount {
                offset,
                count: len,
                remaining: reader.remaining(),
            })?;
            Some(reader.read_blob(len)?)
        } else {
            None
        };

        Ok(Self {
            id,
            spawn,
            logout,
            death,
            home,
            map_data,
        })
    }
}

impl Decode for Item {
    const MIN_SIZE: usize = ITEM_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        Ok(Self {
            name: reader.read_string()?,
            stack: reader.read_i32()?,
            durability: reader.read_f32()?,
            grid_pos: [reader.read_i32()?, reader.read_i32()?],
            equipped: reader.read_bool()?,
            quality: reader.read_i32()?,
            variant: reader.read_i32()?,
            crafter_id: reader.read_i64()?,
            crafter_name: reader.read_string()?,
            opaque: reader.read_opaque::<4>()?,
        })
    }
}

impl Decode for Station {
    const MIN_SIZE: usize = STATION_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        Ok(Self {
            name: reader.read_string()?,
            level: reader.read_i32()?,
        })
    }
}

impl Decode for TextEntry {
    const MIN_SIZE: usize = TEXT_ENTRY_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        Ok(Self {
            key: reader.read_string()?,
            value: reader.read_string()?,
        })
    }
}

impl Decode for Food {
    const MIN_SIZE: usize = FOOD_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        Ok(Self {
            name: reader.read_string()?,
            hp_left: reader.read_f32()?,
            stamina_left: reader.read_f32()?,
        })
    }
}

impl Decode for Skill {
    const MIN_SIZE: usize = SKILL_MIN_SIZE;

    fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        Ok(Self {
            id: reader.read_i32()?,
            level: reader.read_f32()?,
            unused: reader.read_opaque::<4>()?,
        })
    }
}

/// Read an i32 count followed by that many records
pub fn read_sequence<T: Decode>(reader: &mut CursorReader) -> Result<Vec<T>, CodecError> {
    let count = reader.read_count(T::MIN_SIZE)?;

    // Counts are untrusted when validation is off; cap the preallocation
    let mut out = Vec::with_capacity(count.min(reader.remaining() / T::MIN_SIZE.max(1)));
    for _ in 0..count {
        out.push(T::decode(reader)?);
    }
    Ok(out)
}

fn decode_inventory(reader: &mut CursorReader) -> Result<Inventory, CodecError> {
    let version = reader.read_i32()?;
    let mut items: Vec<Item> = read_sequence(reader)?;

    #[cfg(feature = "logging")]
    let before = items.len();

    items.retain(|item| !item.name.is_empty());

    #[cfg(feature = "logging")]
    if items.len() != before {
        debug!("Dropped {} unnamed inventory slots", before - items.len());
    }

    Ok(Inventory { version, items })
}

fn decode_body(reader: &mut CursorReader, data_length: i32) -> Result<PlayerBody, CodecError> {
    #[cfg(feature = "logging")]
    let start = reader.position();

    let data_version = reader.read_i32()?;
    let max_hp = reader.read_f32()?;
    let hp = reader.read_f32()?;
    let stamina = reader.read_f32()?;
    let is_first_spawn = reader.read_bool()?;
    let time_since_death = reader.read_f32()?;
    let guardian_power = reader.read_string()?;
    let guardian_cooldown = reader.read_f32()?;

    let inventory = decode_inventory(reader)?;

    let recipes = read_sequence(reader)?;
    let stations = read_sequence(reader)?;
    let known_materials = read_sequence(reader)?;
    let shown_tutorials = read_sequence(reader)?;
    let uniques = read_sequence(reader)?;
    let trophies = read_sequence(reader)?;
    let biomes = read_sequence(reader)?;
    let texts = read_sequence(reader)?;

    let appearance = Appearance {
        beard: reader.read_string()?,
        hair: reader.read_string()?,
        skin_color: reader.read_vec3()?,
        hair_color: reader.read_vec3()?,
        model: reader.read_i32()?,
    };

    let foods = read_sequence(reader)?;
    let skills_version = reader.read_i32()?;
    let skills = read_sequence(reader)?;

    #[cfg(feature = "logging")]
    {
        let consumed = reader.position() - start;
        if i32::try_from(consumed).ok() != Some(data_length) {
            warn!(
                "Player body declared {} bytes but {} were decoded",
                data_length, consumed
            );
        }
    }

    Ok(PlayerBody {
        data_length,
        data_version,
        max_hp,
        hp,
        stamina,
        is_first_spawn,
        time_since_death,
        guardian_power,
        guardian_cooldown,
        inventory,
        recipes,
        stations,
        known_materials,
        shown_tutorials,
        uniques,
        trophies,
        biomes,
        texts,
        appearance,
        foods,
        skills_version,
        skills,
    })
}

impl Character {
    /// Read a whole save, starting at the leading total-length field
    pub fn decode(reader: &mut CursorReader) -> Result<Self, CodecError> {
        let file_size = reader.read_i32()?;
        let version = reader.read_i32()?;
        let kills = reader.read_i32()?;
        let deaths = reader.read_i32()?;
        let crafts = reader.read_i32()?;
        let builds = reader.read_i32()?;
        let worlds: Vec<World> = read_sequence(reader)?;

        #[cfg(feature = "logging")]
        debug!("Decoded {} worlds (version {})", worlds.len(), version);

        let name = reader.read_string()?;
        let id = reader.read_i64()?;
        let start_seed = reader.read_string()?;

        let body = if reader.read_bool()? {
            let data_length = reader.read_i32()?;
            #[cfg(feature = "logging")]
            debug!("Player body of {} bytes at offset {}", data_length, reader.position());
            Some(decode_body(reader, data_length)?)
        } else {
            None
        };

        Ok(Self {
            file_size,
            version,
            kills,
            deaths,
            crafts,
            builds,
            worlds,
            name,
            id,
            start_seed,
            body,
        })
    }
}

/// Configurable character decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    validate_counts: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            validate_counts: true,
        }
    }
}

impl Decoder {
    /// Create a decoder with count validation enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject sequence counts that cannot fit in the remaining input
    /// before reading any element (enabled by default)
    pub fn validate_counts(mut self, enabled: bool) -> Self {
        self.validate_counts = enabled;
        self
    }

    /// Decode a character, borrowing strings and blobs from `buf`
    pub fn decode(&self, buf: Bytes) -> Result<Character, CodecError> {
        let mut reader = CursorReader::new(buf).validate_counts(self.validate_counts);
        Character::decode(&mut reader)
    }
}

/// Decode a character from a byte buffer without copying strings or blobs
pub fn decode_character_zero_copy(buf: Bytes) -> Result<Character, CodecError> {
    Decoder::new().decode(buf)
}

/// Decode a character from a byte slice
pub fn decode_character_from_bytes(data: &[u8]) -> Result<Character, CodecError> {
    decode_character_zero_copy(Bytes::copy_from_slice(data))
}

/// Decode a character from a reader
///
/// The reader is drained to its end before decoding starts.
#[cfg(feature = "std")]
pub fn decode_character<R: Read>(reader: &mut R) -> Result<Character, CodecError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_character_zero_copy(Bytes::from(data))
}
