//! Criterion micro-benchmarks for identifier copy, array build, and relocation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sidarena_arena::{duplicate_entry_array, duplicate_identifier};
use sidarena_bench::{entry_attributes, identifier_set};
use sidarena_core::{Sid, SidAndAttributes};

fn entries<'a>(sids: &'a [Sid], attrs: &[u32]) -> Vec<SidAndAttributes<'a>> {
    sids.iter()
        .zip(attrs)
        .map(|(sid, &a)| SidAndAttributes::new(sid, a))
        .collect()
}

/// Benchmark: copy one maximum-length identifier into its own buffer.
fn bench_duplicate_identifier(c: &mut Criterion) {
    let sid: Sid = "S-1-5-21-1-2-3-4-5-6-7-8-9-10-11-12-13-14"
        .parse()
        .unwrap();
    c.bench_function("duplicate_identifier_max", |b| {
        b.iter(|| black_box(duplicate_identifier(black_box(&sid)).unwrap()));
    });
}

/// Benchmark: build arrays of increasing size.
fn bench_duplicate_entry_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_entry_array");
    for n in [1usize, 16, 256, 4096] {
        let sids = identifier_set(n, 42);
        let attrs = entry_attributes(n);
        let input = entries(&sids, &attrs);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| black_box(duplicate_entry_array(input).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: relocate a 256-entry arena into a caller buffer.
fn bench_relocate(c: &mut Criterion) {
    let sids = identifier_set(256, 7);
    let attrs = entry_attributes(256);
    let array = duplicate_entry_array(&entries(&sids, &attrs)).unwrap();
    let mut out = vec![0u8; array.byte_len()];
    let base = out.as_ptr() as usize as u64;
    c.bench_function("relocate_256", |b| {
        b.iter(|| {
            array.relocate_into(&mut out, base).unwrap();
            black_box(out[0]);
        });
    });
}

/// Benchmark: decode and check every slot of a 256-entry arena.
fn bench_validate(c: &mut Criterion) {
    let sids = identifier_set(256, 9);
    let attrs = entry_attributes(256);
    let array = duplicate_entry_array(&entries(&sids, &attrs)).unwrap();
    c.bench_function("validate_256", |b| {
        b.iter(|| black_box(array.validate().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_duplicate_identifier,
    bench_duplicate_entry_array,
    bench_relocate,
    bench_validate
);
criterion_main!(benches);
