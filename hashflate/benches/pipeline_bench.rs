//! Benchmarks for the full pipeline and the standalone stages.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hashflate::{Lz77Config, Method};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
        text.iter().copied().cycle().take(size).collect()
    }

    pub fn zeros(size: usize) -> Vec<u8> {
        vec![0; size]
    }
}

const SIZE: usize = 128 * 1024;

fn bench_methods(c: &mut Criterion) {
    let patterns: [(&str, PatternGenerator); 3] = [
        ("text", test_data::text_like),
        ("random", test_data::random),
        ("zeros", test_data::zeros),
    ];

    for method in Method::ALL {
        let mut group = c.benchmark_group(format!("compress_{method}"));
        let codec = method.codec(Lz77Config::DEFAULT).unwrap();

        for (name, generate) in patterns {
            let data = generate(SIZE);
            group.throughput(Throughput::Bytes(SIZE as u64));
            group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
                b.iter(|| black_box(codec.compress(black_box(data)).unwrap()));
            });
        }
        group.finish();
    }
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_deflate");
    let codec = Method::Deflate.codec(Lz77Config::DEFAULT).unwrap();

    for (name, data) in [
        ("text", test_data::text_like(SIZE)),
        ("random", test_data::random(SIZE)),
    ] {
        let artifact = codec.compress(&data).unwrap();
        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &artifact, |b, artifact| {
            b.iter(|| black_box(codec.decompress(black_box(artifact)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_methods, bench_decompress);
criterion_main!(benches);
