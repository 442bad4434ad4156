//! Property-based tests using proptest

use bytes::Bytes;
use charsave_core::{
    decoder::{decode_character_from_bytes, Decoder},
    encoder::encode_character,
    trailer::{compute_digest, Envelope},
    types::{
        Appearance, Character, FlaggedPoint, Food, Inventory, Item, PlayerBody, Skill, Station,
        TextEntry, World,
    },
};
use proptest::prelude::*;

fn text(max: usize) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..max).prop_map(Bytes::from)
}

fn name() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 1..24).prop_map(Bytes::from)
}

fn float() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn point() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(float())
}

prop_compose! {
    fn flagged_point()(is_set in any::<bool>(), position in point()) -> FlaggedPoint {
        FlaggedPoint { is_set, position }
    }
}

prop_compose! {
    fn world()(
        id in any::<i64>(),
        spawn in flagged_point(),
        logout in flagged_point(),
        death in flagged_point(),
        home in point(),
        map_data in prop::option::of(prop::collection::vec(any::<u8>(), 0..256).prop_map(Bytes::from)),
    ) -> World {
        World { id, spawn, logout, death, home, map_data }
    }
}

prop_compose! {
    fn item()(
        name in name(),
        stack in any::<i32>(),
        durability in float(),
        grid_pos in any::<[i32; 2]>(),
        equipped in any::<bool>(),
        quality in any::<i32>(),
        variant in any::<i32>(),
        crafter_id in any::<i64>(),
        crafter_name in text(24),
        opaque in any::<[u8; 4]>(),
    ) -> Item {
        Item {
            name,
            stack,
            durability,
            grid_pos,
            equipped,
            quality,
            variant,
            crafter_id,
            crafter_name,
            opaque,
        }
    }
}

prop_compose! {
    fn player_body()(
        header in (any::<i32>(), float(), float(), float(), any::<bool>(), float(), text(32), float()),
        inventory_version in any::<i32>(),
        items in prop::collection::vec(item(), 0..8),
        recipes in prop::collection::vec(text(32), 0..8),
        stations in prop::collection::vec((text(24), any::<i32>()), 0..4),
        known_materials in prop::collection::vec(text(16), 0..4),
        shown_tutorials in prop::collection::vec(text(16), 0..4),
        uniques in prop::collection::vec(text(16), 0..4),
        trophies in prop::collection::vec(text(16), 0..4),
        biomes in prop::collection::vec(any::<i32>(), 0..8),
        texts in prop::collection::vec((text(16), text(16)), 0..4),
        looks in (text(16), text(16), point(), point(), any::<i32>()),
        foods in prop::collection::vec((text(16), float(), float()), 0..3),
        skills_version in any::<i32>(),
        skills in prop::collection::vec((any::<i32>(), float(), any::<[u8; 4]>()), 0..8),
    ) -> PlayerBody {
        let (data_version, max_hp, hp, stamina, is_first_spawn, time_since_death, guardian_power, guardian_cooldown) = header;
        let (beard, hair, skin_color, hair_color, model) = looks;
        PlayerBody {
            data_length: 0,
            data_version,
            max_hp,
            hp,
            stamina,
            is_first_spawn,
            time_since_death,
            guardian_power,
            guardian_cooldown,
            inventory: Inventory { version: inventory_version, items },
            recipes,
            stations: stations.into_iter().map(|(name, level)| Station { name, level }).collect(),
            known_materials,
            shown_tutorials,
            uniques,
            trophies,
            biomes,
            texts: texts.into_iter().map(|(key, value)| TextEntry { key, value }).collect(),
            appearance: Appearance { beard, hair, skin_color, hair_color, model },
            foods: foods
                .into_iter()
                .map(|(name, hp_left, stamina_left)| Food { name, hp_left, stamina_left })
                .collect(),
            skills_version,
            skills: skills
                .into_iter()
                .map(|(id, level, unused)| Skill { id, level, unused })
                .collect(),
        }
    }
}

prop_compose! {
    fn character()(
        counters in any::<[i32; 5]>(),
        worlds in prop::collection::vec(world(), 0..4),
        name in text(32),
        id in any::<i64>(),
        start_seed in text(16),
        body in prop::option::of(player_body()),
    ) -> Character {
        let [version, kills, deaths, crafts, builds] = counters;
        Character {
            file_size: 0,
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
        }
    }
}

proptest! {
    #[test]
    fn prop_round_trip_encode_decode(original in character()) {
        let encoded = encode_character(&original).unwrap();
        let mut decoded = decode_character_from_bytes(&encoded).unwrap();

        let envelope = Envelope::split(encoded.clone()).unwrap();
        prop_assert_eq!(decoded.file_size as usize, envelope.payload.len());

        decoded.file_size = 0;
        if let Some(body) = decoded.body.as_mut() {
            prop_assert!(body.data_length > 0);
            body.data_length = 0;
        }
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn prop_reencode_is_byte_identical(original in character()) {
        let encoded = encode_character(&original).unwrap();
        let decoded = decode_character_from_bytes(&encoded).unwrap();
        prop_assert_eq!(encode_character(&decoded).unwrap(), encoded);
    }

    #[test]
    fn prop_digest_covers_payload(original in character()) {
        let encoded = encode_character(&original).unwrap();
        let envelope = Envelope::split(encoded).unwrap();
        prop_assert_eq!(&envelope.digest[..], &compute_digest(&envelope.payload)[..]);
    }

    #[test]
    fn prop_recipe_count_matches(recipes in prop::collection::vec(text(32), 0..16)) {
        let body = PlayerBody { recipes: recipes.clone(), ..PlayerBody::default() };
        let character = Character::new("Count", 1, "seed").with_body(body);
        let decoded = decode_character_from_bytes(&encode_character(&character).unwrap()).unwrap();
        prop_assert_eq!(decoded.body.unwrap().recipes, recipes);
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        // Should never panic, even on random data
        let result = decode_character_from_bytes(&data);
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_unchecked_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        let _ = Decoder::new().validate_counts(false).decode(Bytes::from(data));
    }

    #[test]
    fn prop_truncated_envelope_is_rejected(original in character(), cut_ratio in 0.0f64..1.0) {
        let encoded = encode_character(&original).unwrap();
        let structure_len = encoded.len() - 4 - 64;
        let cut = (structure_len as f64 * cut_ratio) as usize;
        prop_assert!(decode_character_from_bytes(&encoded[..cut]).is_err());
    }
}
