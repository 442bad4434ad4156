use bytes::Bytes;
use charsave_core::{
    decoder::decode_character_from_bytes,
    encoder::encode_character,
    types::{Character, FlaggedPoint, Item, PlayerBody, Skill, World},
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn character_with_items(item_count: usize) -> Character {
    let mut body = PlayerBody {
        max_hp: 25.0,
        hp: 25.0,
        recipes: (0..64)
            .map(|i| Bytes::from(format!("Recipe_{}", i)))
            .collect(),
        skills: (0..16)
            .map(|id| Skill {
                id,
                level: id as f32,
                unused: [0; 4],
            })
            .collect(),
        ..PlayerBody::default()
    };
    body.inventory.items = (0..item_count)
        .map(|i| Item {
            name: Bytes::from(format!("Item_{}", i)),
            stack: 1,
            durability: 100.0,
            ..Item::default()
        })
        .collect();

    let mut character = Character::new("Bench", 1, "seed").with_body(body);
    character.worlds = (0..4)
        .map(|id| World {
            id,
            spawn: FlaggedPoint::set([1.0, 2.0, 3.0]),
            map_data: Some(Bytes::from(vec![0x42u8; 4096])),
            ..World::default()
        })
        .collect();
    character
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for items in [8, 32, 128] {
        let character = character_with_items(items);
        let size = encode_character(&character).unwrap().len();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &character, |b, ch| {
            b.iter(|| encode_character(black_box(ch)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for items in [8, 32, 128] {
        let encoded = encode_character(&character_with_items(items)).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &encoded, |b, data| {
            b.iter(|| decode_character_from_bytes(black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");

    for items in [8, 32] {
        let character = character_with_items(items);

        group.bench_with_input(BenchmarkId::from_parameter(items), &character, |b, ch| {
            b.iter(|| {
                let encoded = encode_character(ch).unwrap();
                let decoded = decode_character_from_bytes(&encoded).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_round_trip);
criterion_main!(benches);
