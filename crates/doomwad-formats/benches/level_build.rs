//! Benchmarks for archive opening and level building

use criterion::{Criterion, criterion_group, criterion_main};
use doomwad_formats::{LevelBuilder, WadArchive};
use std::hint::black_box;
use test_utils::{GlFixture, MapFixture, WadBuilder};

/// Archive with `count` copies of the two-room map, each with GL nodes
fn generate_wad(count: usize) -> Vec<u8> {
    let mut builder = WadBuilder::pwad();
    for i in 1..=count {
        let name = format!("MAP{i:02}");
        builder = builder
            .map(&name, &MapFixture::two_rooms())
            .gl_nodes(&name, &GlFixture::two_rooms());
    }
    builder.build()
}

fn benchmark_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("open");

    let small = generate_wad(4);
    group.bench_function("open_4_maps", |b| {
        b.iter(|| {
            let archive = WadArchive::from_bytes(black_box(small.clone())).unwrap();
            black_box(archive);
        });
    });

    let large = generate_wad(32);
    group.bench_function("open_32_maps", |b| {
        b.iter(|| {
            let archive = WadArchive::from_bytes(black_box(large.clone())).unwrap();
            black_box(archive);
        });
    });

    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let archive = WadArchive::from_bytes(generate_wad(1)).unwrap();
    let map = &archive.maps()[0];

    group.bench_function("build_gl", |b| {
        b.iter(|| {
            let level = LevelBuilder::new(&archive, black_box(map)).build().unwrap();
            black_box(level);
        });
    });

    group.bench_function("build_classic", |b| {
        b.iter(|| {
            let level = LevelBuilder::new(&archive, black_box(map))
                .use_gl_nodes(false)
                .build()
                .unwrap();
            black_box(level);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_open, benchmark_build);
criterion_main!(benches);
