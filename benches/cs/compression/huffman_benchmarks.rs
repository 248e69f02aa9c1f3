use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpack::compression::{huffman_decode, huffman_encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn text_input(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn random_input(len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_encode");
    for &size in &[1 << 10, 1 << 14, 1 << 18] {
        group.throughput(Throughput::Bytes(size as u64));
        let text = text_input(size);
        let random = random_input(size);
        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, input| {
            b.iter(|| huffman_encode(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("random", size), &random, |b, input| {
            b.iter(|| huffman_encode(black_box(input)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decode");
    for &size in &[1 << 10, 1 << 14, 1 << 18] {
        group.throughput(Throughput::Bytes(size as u64));
        let packed = huffman_encode(&text_input(size)).unwrap();
        group.bench_with_input(BenchmarkId::new("text", size), &packed, |b, input| {
            b.iter(|| huffman_decode(black_box(input)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
