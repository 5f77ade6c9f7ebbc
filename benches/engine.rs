//! Criterion benchmarks for the optimal-parsing compressors.
//!
//! Run with:
//!   cargo bench --bench engine

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn synthetic_corpus(size: usize) -> Vec<u8> {
    // A mix of runs and pseudo-random bytes so both literal and match edges
    // get exercised, rather than a single degenerate shape.
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0x2545F491;
    while data.len() < size {
        if data.len() % 4096 < 1024 {
            data.extend(std::iter::repeat(0xAAu8).take(256.min(size - data.len())));
        } else {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state & 0xFF) as u8);
        }
    }
    data
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for &size in &[4_096usize, 65_536] {
        let data = synthetic_corpus(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("chameleon", size), &data, |b, data| {
            b.iter(|| retrolzss::chameleon_compress(data).unwrap())
        });

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("comper", size), &data, |b, data| {
            b.iter(|| retrolzss::comper_compress(data).unwrap())
        });

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("rocket", size), &data, |b, data| {
            b.iter(|| retrolzss::rocket_compress(data).unwrap())
        });

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("kosinski", size), &data, |b, data| {
            b.iter(|| retrolzss::kosinski_compress(data).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress);
criterion_main!(benches);
