// benches/resolution.rs
//! Benchmarks for the hot paths at an API boundary: resolving a chain,
//! collecting every code, looking up inherited metadata and projecting JSON.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use errcode::{
    AnyCode, AnyError, CodedError, HttpStatuses, JsonFormat, all_codes, annotate, definitions,
    group, message, resolve,
};

fn coded(msg: &str) -> AnyError {
    Arc::new(CodedError::new(message(msg), &definitions::NOT_FOUND))
}

fn annotated_chain(depth: usize) -> AnyError {
    let mut err = coded("leaf");
    for i in 0..depth {
        err = annotate(err, format!("layer {i}"));
    }
    err
}

fn wide_group(width: usize) -> AnyError {
    group((0..width).map(|i| {
        if i % 2 == 0 {
            coded("member")
        } else {
            message("plain member")
        }
    }))
}

// ============================================================================
// Resolution
// ============================================================================

fn bench_resolve_direct(c: &mut Criterion) {
    let err = coded("direct");
    c.bench_function("resolve_direct_code", |b| {
        b.iter(|| resolve(black_box(&err)))
    });
}

fn bench_resolve_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_annotated_chain");
    for depth in [1usize, 4, 16, 64] {
        let err = annotated_chain(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &err, |b, err| {
            b.iter(|| resolve(black_box(err)))
        });
    }
    group.finish();
}

fn bench_all_codes_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_codes_group");
    for width in [2usize, 8, 32] {
        let err = wide_group(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &err, |b, err| {
            b.iter(|| all_codes(black_box(err)))
        });
    }
    group.finish();
}

// ============================================================================
// Metadata & Projection
// ============================================================================

fn bench_status_lookup(c: &mut Criterion) {
    let statuses = HttpStatuses::with_defaults();
    c.bench_function("status_inherited", |b| {
        b.iter(|| statuses.status(black_box(&definitions::OUT_OF_RANGE)))
    });
    c.bench_function("status_direct", |b| {
        b.iter(|| statuses.status(black_box(&definitions::NOT_FOUND)))
    });
}

fn bench_json_projection(c: &mut Criterion) {
    let single: AnyCode = Arc::new(CodedError::new(message("x"), &definitions::FORBIDDEN));
    c.bench_function("json_single_code", |b| {
        b.iter(|| JsonFormat::from_code(black_box(&single)))
    });

    let multi = wide_group(8);
    c.bench_function("json_group_of_8", |b| {
        b.iter(|| JsonFormat::from_error(black_box(&multi)))
    });
}

criterion_group!(
    benches,
    bench_resolve_direct,
    bench_resolve_depth,
    bench_all_codes_width,
    bench_status_lookup,
    bench_json_projection,
);
criterion_main!(benches);
