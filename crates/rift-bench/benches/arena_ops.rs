//! Criterion micro-benchmarks for the linear arena.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rift_arena::{ArenaConfig, LinearArena, MemoryArena};
use rift_bench::metadata_layouts;

/// Benchmark: 10K mixed allocations into a fresh default arena.
fn bench_allocate_10k(c: &mut Criterion) {
    let layouts = metadata_layouts(10_000);
    c.bench_function("arena_allocate_10k", |b| {
        b.iter(|| {
            let mut arena = LinearArena::default();
            for layout in &layouts {
                black_box(arena.allocate(*layout));
            }
            black_box(arena.used_bytes());
        });
    });
}

/// Benchmark: the same workload with 4KB blocks, so most of the cost is
/// block growth.
fn bench_allocate_small_blocks(c: &mut Criterion) {
    let layouts = metadata_layouts(10_000);
    let config = ArenaConfig::new().with_block_size(4 * 1024);
    c.bench_function("arena_allocate_small_blocks", |b| {
        b.iter(|| {
            let mut arena = LinearArena::new(config.clone()).unwrap();
            for layout in &layouts {
                black_box(arena.allocate(*layout));
            }
            black_box(arena.block_count());
        });
    });
}

/// Benchmark: moving 1K `u64` values into the arena.
fn bench_alloc_value(c: &mut Criterion) {
    c.bench_function("arena_alloc_value_1k", |b| {
        b.iter(|| {
            let mut arena = LinearArena::default();
            for i in 0..1_000u64 {
                black_box(arena.alloc_value(i));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_10k,
    bench_allocate_small_blocks,
    bench_alloc_value
);
criterion_main!(benches);
