//! Benchmark for the import engine hot paths.
//!
//! TARGET: a 1024x1024 heightmap placed in well under a second
//!
//! Run with: cargo bench --package terravox_import --bench import_benchmark

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terravox_import::{
    half_to_f32, run_import, select_weighted, BlockColorIndex, BlockId, BlockNameResolver,
    HeightGrid, ImportConfig, WeightedBlock,
};

struct BenchRegistry;

impl BlockNameResolver for BenchRegistry {
    fn resolve(&self, name: &str) -> Option<BlockId> {
        match name {
            "Stone" => Some(1),
            "Dirt" => Some(2),
            "Gravel" => Some(3),
            _ => None,
        }
    }
}

impl BlockColorIndex for BenchRegistry {
    fn closest_block(&self, _r: u8, _g: u8, _b: u8) -> Option<BlockId> {
        Some(1)
    }
}

fn write_raw_heightmap(side: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "terravox_bench_{}_{side}.f32",
        std::process::id()
    ));
    let mut bytes = Vec::with_capacity((side * side * 4) as usize);
    for z in 0..side {
        for x in 0..side {
            let v = ((x ^ z).wrapping_mul(2654435761)) as f32;
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    fs::write(&path, bytes).expect("write bench heightmap");
    path
}

fn benchmark_half_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("half_decode");
    group.throughput(Throughput::Elements(65_536));

    group.bench_function("64k_values", |b| {
        b.iter(|| {
            for bits in 0..=u16::MAX {
                black_box(half_to_f32(black_box(bits)));
            }
        });
    });

    group.finish();
}

fn benchmark_weighted_selection(c: &mut Criterion) {
    let blocks = vec![
        WeightedBlock {
            block_id: 1,
            weight: 70,
        },
        WeightedBlock {
            block_id: 2,
            weight: 20,
        },
        WeightedBlock {
            block_id: 3,
            weight: 10,
        },
    ];

    let mut group = c.benchmark_group("weighted_selection");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_picks", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| {
            for _ in 0..1_000_000u32 {
                black_box(select_weighted(&blocks, &mut rng));
            }
        });
    });

    group.finish();
}

fn benchmark_box_blur(c: &mut Criterion) {
    let side = 1024usize;
    let samples: Vec<f32> = (0..side * side).map(|i| (i % 257) as f32 / 256.0).collect();
    let grid = HeightGrid::from_samples(samples, side as u32, side as u32);

    let mut group = c.benchmark_group("box_blur");
    group.throughput(Throughput::Elements((side * side) as u64));
    group.sample_size(20);

    group.bench_function("1024x1024", |b| {
        b.iter(|| black_box(grid.box_blur()));
    });

    group.finish();
}

fn benchmark_full_import(c: &mut Criterion) {
    let path = write_raw_heightmap(1024);

    let mut cfg = ImportConfig::new(&path);
    cfg.height_scale = 64;
    cfg.max_size = 256;
    cfg.block_pattern = "70%Stone,20%Dirt,10%Gravel".to_string();

    let mut group = c.benchmark_group("full_import");
    group.sample_size(20);

    group.bench_function("1024_to_256_heightmap", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| {
            black_box(
                run_import(
                    black_box(&cfg),
                    &BenchRegistry,
                    &BenchRegistry,
                    &mut rng,
                )
                .expect("import"),
            )
        });
    });

    group.finish();
    fs::remove_file(&path).ok();
}

criterion_group!(
    benches,
    benchmark_half_decode,
    benchmark_weighted_selection,
    benchmark_box_blur,
    benchmark_full_import
);
criterion_main!(benches);
