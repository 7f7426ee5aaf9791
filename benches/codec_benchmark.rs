use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use sievex::compression::codec::{compress_postings, decompress_postings, PostingCodec};

/// Sorted doc-id list with small random gaps, the shape real posting
/// lists have after a build.
fn posting_list(len: usize, max_gap: u32) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    let mut ids = Vec::with_capacity(len);
    let mut current = 0u32;
    for _ in 0..len {
        current += rng.gen_range(1..=max_gap);
        ids.push(current);
    }
    ids
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");

    for &len in &[100usize, 10_000] {
        let ids = posting_list(len, 16);
        for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
            group.bench_with_input(
                BenchmarkId::new(codec.tag(), len),
                &ids,
                |b, ids| b.iter(|| compress_postings(codec, black_box(ids)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_unpack(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack");

    for &len in &[100usize, 10_000] {
        let ids = posting_list(len, 16);
        for codec in [PostingCodec::Varbyte, PostingCodec::Simple9] {
            let blob = compress_postings(codec, &ids).unwrap();
            group.bench_with_input(
                BenchmarkId::new(codec.tag(), len),
                &blob,
                |b, blob| b.iter(|| decompress_postings(codec, black_box(blob)).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_pack, bench_unpack);
criterion_main!(benches);
