use std::num::NonZeroUsize;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use encoded_document::EncodedDocument;


fn chunk_plan_benchmark(c: &mut Criterion) {
    let raw = vec![0x25u8; 8 * 1024 * 1024];
    let document = EncodedDocument::encode(&raw);
    let threshold = NonZeroUsize::new(3 * 1024 * 1024).unwrap();
    c.bench_function("plan chunks 8 MiB", |b| b.iter(|| {
        let total: usize = black_box(&document)
            .chunks(threshold)
            .map(|chunk| chunk.payload.len())
            .sum();
        black_box(total)
    }));
}

criterion_group!(benches, chunk_plan_benchmark);
criterion_main!(benches);
