//! Benchmarks for Reed-Solomon encoding and reconstruction.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tessella::Codec;

fn bench_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

fn bench_encode(c: &mut Criterion) {
    let configs: &[(usize, usize)] = &[(2, 1), (4, 2), (8, 4)];
    let sizes: &[usize] = &[64 * 1024, 256 * 1024];

    let mut group = c.benchmark_group("rs_encode");
    for &(k, m) in configs {
        let codec = Codec::new(k, m).unwrap();
        for &size in sizes {
            let data = bench_data(size);
            let label = format!("k{k}_m{m}_{size}");
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new("encode", &label), &data, |b, data| {
                b.iter(|| codec.encode(data).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let configs: &[(usize, usize)] = &[(2, 1), (4, 2), (8, 4)];
    let sizes: &[usize] = &[64 * 1024, 256 * 1024];

    let mut group = c.benchmark_group("rs_decode");
    for &(k, m) in configs {
        let codec = Codec::new(k, m).unwrap();
        for &size in sizes {
            let data = bench_data(size);
            let shards = codec.encode(&data).unwrap();

            // worst case: the first m data shards lost, parity fills in
            let survivors: Vec<(u32, Vec<u8>)> = shards
                .iter()
                .enumerate()
                .skip(m)
                .map(|(i, s)| (i as u32, s.clone()))
                .collect();

            let label = format!("k{k}_m{m}_{size}");
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new("decode", &label),
                &survivors,
                |b, survivors| {
                    b.iter(|| codec.decode(survivors).unwrap());
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
