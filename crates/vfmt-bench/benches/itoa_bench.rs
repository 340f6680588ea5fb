//! Integer-to-text conversion benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use vfmt_core::stdlib::itoa::{SCRATCH_LEN, itoa, utoa};

fn bench_itoa(c: &mut Criterion) {
    let mut group = c.benchmark_group("itoa");
    for (name, radix) in [("decimal", 10), ("hex", 16), ("binary", 2)] {
        group.bench_function(name, |b| {
            let mut scratch = [0u8; SCRATCH_LEN];
            b.iter(|| {
                let value = criterion::black_box(i32::MIN);
                criterion::black_box(itoa(value, radix, &mut scratch).map(<[u8]>::len));
            });
        });
    }
    group.finish();
}

fn bench_utoa_max(c: &mut Criterion) {
    c.bench_function("utoa_max_hex", |b| {
        let mut scratch = [0u8; SCRATCH_LEN];
        b.iter(|| {
            let value = criterion::black_box(u32::MAX);
            criterion::black_box(utoa(value, 16, &mut scratch).map(<[u8]>::len));
        });
    });
}

criterion_group!(benches, bench_itoa, bench_utoa_max);
criterion_main!(benches);
