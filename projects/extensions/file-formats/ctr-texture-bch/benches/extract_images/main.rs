use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ctr_texture_api::format::constants::*;
use ctr_texture_api::{LinearCodec, RawCodec};
use ctr_texture_bch::BchContainer;
use std::hint::black_box;

#[path = "../../tests/common/mod.rs"]
mod common;

use common::Fixture;

// A model's worth of textures: a few large mip chains plus small UI-sized ones.
fn generate_container() -> Vec<u8> {
    let mut fixture = Fixture::new();
    for _ in 0..4 {
        fixture = fixture
            .texture(256, 256, FORMAT_RGBA8, 8)
            .texture(128, 128, FORMAT_RGB565, 7)
            .texture(64, 64, FORMAT_LA8, 0);
    }
    fixture.build().bytes
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BCH Extract/Reinsert");
    let input = generate_container();
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function(BenchmarkId::new("extract", "raw"), |b| {
        b.iter(|| BchContainer::from_bytes(black_box(&input), RawCodec::default()))
    });

    group.bench_function(BenchmarkId::new("extract", "linear"), |b| {
        b.iter(|| BchContainer::from_bytes(black_box(&input), LinearCodec::default()))
    });

    let container = match BchContainer::from_bytes(&input, LinearCodec::default()) {
        Ok(container) => container,
        Err(error) => panic!("Benchmark container failed to load: {error}"),
    };
    group.bench_function(BenchmarkId::new("reinsert", "linear"), |b| {
        b.iter(|| black_box(&container).to_bytes())
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
