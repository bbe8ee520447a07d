//! Benchmark – `varbuf::GrowableBuffer` capacity growth
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use varbuf::GrowableBuffer;

/// Appends `total` bytes one at a time starting from `initial_capacity`, so
/// the run is dominated by the growth policy rather than by the copy itself.
fn append_bytes(initial_capacity: usize, total: usize) -> usize {
    let mut buf = GrowableBuffer::new(initial_capacity);
    for i in 0..total {
        buf.put_u8(i.to_le_bytes()[0]).expect("within max capacity");
    }
    buf.capacity()
}

fn bench_single_byte_appends(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_byte_appends");

    for &total in &[1_000usize, 100_000, 1_000_000] {
        group.throughput(Throughput::Bytes(total as u64));
        for &initial in &[1usize, total] {
            let name = if initial == 1 { "from_1" } else { "presized" };
            group.bench_with_input(BenchmarkId::new(name, total), &total, |b, &t| {
                b.iter(|| black_box(append_bytes(black_box(initial), t)));
            });
        }
    }
    group.finish();
}

fn bench_chunked_appends(c: &mut Criterion) {
    let chunk = vec![0xA5u8; 4096];
    let mut group = c.benchmark_group("chunked_appends");
    group.throughput(Throughput::Bytes(chunk.len() as u64 * 256));
    group.bench_function("256x4KiB", |b| {
        b.iter(|| {
            let mut buf = GrowableBuffer::new(1);
            for _ in 0..256 {
                buf.put_bytes(black_box(&chunk)).expect("within max capacity");
            }
            black_box(buf.position())
        });
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_single_byte_appends, bench_chunked_appends }
criterion_main!(benches);
