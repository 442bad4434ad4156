//! Record model for a decoded character save

use alloc::vec::Vec;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Three f32 components (x, y, z) or an RGB-like color triple
pub type Vec3 = [f32; 3];

/// A point whose meaning depends on a preceding flag
///
/// The position is always present in the stream; `is_set` only says whether
/// the game treats it as meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlaggedPoint {
    /// Whether the game considers this point valid
    pub is_set: bool,

    /// Stored position, present even when `is_set` is false
    pub position: Vec3,
}

impl FlaggedPoint {
    /// Create a point that is marked as set
    pub fn set(position: Vec3) -> Self {
        Self {
            is_set: true,
            position,
        }
    }
}

/// Per-world state the character has visited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// World identifier
    pub id: i64,

    /// Custom spawn point (bed)
    pub spawn: FlaggedPoint,

    /// Where the character last logged out
    pub logout: FlaggedPoint,

    /// Where the character last died
    pub death: FlaggedPoint,

    /// Home point, always meaningful
    pub home: Vec3,

    /// Explored-map blob, if the world has one
    pub map_data: Option<Bytes>,
}

/// Inventory slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Prefab name; empty names are dropped on decode
    pub name: Bytes,

    /// Stack size
    pub stack: i32,

    /// Remaining durability
    pub durability: f32,

    /// Grid position (column, row)
    pub grid_pos: [i32; 2],

    /// Whether the item is equipped
    pub equipped: bool,

    /// Upgrade quality level
    pub quality: i32,

    /// Style variant
    pub variant: i32,

    /// Crafting character's id
    pub crafter_id: i64,

    /// Crafting character's name
    pub crafter_name: Bytes,

    /// Trailing word of unknown meaning, kept verbatim
    pub opaque: [u8; 4],
}

/// Versioned inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Inventory layout version
    pub version: i32,

    /// Named items in stream order
    pub items: Vec<Item>,
}

/// Crafting station the character knows, with its level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station name
    pub name: Bytes,

    /// Station level
    pub level: i32,
}

/// Free-form key/value text pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    /// Text key
    pub key: Bytes,

    /// Text value
    pub value: Bytes,
}

/// Active food buff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Food prefab name
    pub name: Bytes,

    /// Health bonus left
    pub hp_left: f32,

    /// Stamina bonus left
    pub stamina_left: f32,
}

/// Skill progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Numeric skill identifier
    pub id: i32,

    /// Current level
    pub level: f32,

    /// Unused slot, kept verbatim
    pub unused: [u8; 4],
}

/// Character looks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Beard prefab name
    pub beard: Bytes,

    /// Hair prefab name
    pub hair: Bytes,

    /// Skin color
    pub skin_color: Vec3,

    /// Hair color
    pub hair_color: Vec3,

    /// Body model index
    pub model: i32,
}

/// Live gameplay state, present only for instantiated characters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Body length as read from the stream; recomputed on encode
    pub data_length: i32,

    /// Body layout version
    pub data_version: i32,

    /// Maximum health
    pub max_hp: f32,

    /// Current health
    pub hp: f32,

    /// Current stamina
    pub stamina: f32,

    /// Whether the next spawn is the first one
    pub is_first_spawn: bool,

    /// Seconds since last death
    pub time_since_death: f32,

    /// Selected guardian power
    pub guardian_power: Bytes,

    /// Guardian power cooldown
    pub guardian_cooldown: f32,

    /// Carried items
    pub inventory: Inventory,

    /// Known recipes
    pub recipes: Vec<Bytes>,

    /// Known crafting stations
    pub stations: Vec<Station>,

    /// Discovered materials
    pub known_materials: Vec<Bytes>,

    /// Tutorials already shown
    pub shown_tutorials: Vec<Bytes>,

    /// Unique events seen
    pub uniques: Vec<Bytes>,

    /// Trophies collected
    pub trophies: Vec<Bytes>,

    /// Discovered biome ids
    pub biomes: Vec<i32>,

    /// Key/value texts
    pub texts: Vec<TextEntry>,

    /// Beard, hair, colors and model
    pub appearance: Appearance,

    /// Active food buffs
    pub foods: Vec<Food>,

    /// Skills layout version
    pub skills_version: i32,

    /// Skill progress
    pub skills: Vec<Skill>,
}

/// Root record of a character save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Payload length as read from the stream; recomputed on encode
    pub file_size: i32,

    /// Character format version
    pub version: i32,

    /// Lifetime kills
    pub kills: i32,

    /// Lifetime deaths
    pub deaths: i32,

    /// Lifetime crafts
    pub crafts: i32,

    /// Lifetime builds
    pub builds: i32,

    /// Visited worlds in stream order
    pub worlds: Vec<World>,

    /// Character name
    pub name: Bytes,

    /// Character id
    pub id: i64,

    /// Starting seed
    pub start_seed: Bytes,

    /// Player body, `Some` iff the character is instantiated
    pub body: Option<PlayerBody>,
}

impl Character {
    /// Create an uninstantiated character
    pub fn new(name: impl Into<Bytes>, id: i64, start_seed: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            id,
            start_seed: start_seed.into(),
            ..Self::default()
        }
    }

    /// Attach a player body, marking the character as instantiated
    pub fn with_body(mut self, body: PlayerBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Whether the save carries a player body
    pub fn is_instantiated(&self) -> bool {
        self.body.is_some()
    }
}
