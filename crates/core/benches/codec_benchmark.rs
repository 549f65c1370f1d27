//! Benchmarks pour l'encodage et le décodage de blocs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use molfs_core::{decode_block, encode_block, PrimerPair, PrimerRegistry};
use std::time::Duration;

fn registry() -> PrimerRegistry {
    let mut registry = PrimerRegistry::new();
    registry.register(1, 0, PrimerPair::synthesize(1, 0, 22, 42));
    registry
}

fn benchmark_encode(c: &mut Criterion) {
    let registry = registry();

    // Blocs de tailles représentatives
    let test_data = vec![
        ("block_5k", vec![0x5Au8; 5120]),
        ("block_64k", vec![0x5Au8; 64 * 1024]),
        ("block_1m", vec![0x5Au8; 1024 * 1024]),
    ];

    let mut group = c.benchmark_group("Encoding Performance");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for (name, data) in test_data {
        group.bench_function(format!("encode_{}", name), |b| {
            b.iter(|| {
                let _ = encode_block(&registry, 1, 0, black_box(&data));
            });
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let registry = registry();
    let data = vec![0xC3u8; 5120];
    let encoded = encode_block(&registry, 1, 0, &data).unwrap();

    let mut group = c.benchmark_group("Decoding Performance");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    group.bench_function("decode_block_5k", |b| {
        b.iter(|| {
            let _ = decode_block(
                &registry,
                1,
                0,
                black_box(&encoded.oligos),
                Some(data.len()),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
