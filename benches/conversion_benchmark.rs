// ============================================================================
// Amount Conversion Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Display - smallest units to decimal text
// 2. Parsing - decimal text to smallest units
// 3. Input - edit and external-value transitions of the amount field
// 4. Cancellation - wrapping, canceling and polling a pending operation
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use tx_amount_core::prelude::*;

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn benchmark_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_display_string");

    for decimals in [0u8, 6, 18].iter() {
        let amount = TokenAmount::from_i128(123_456_789_012_345_678_901_234);

        group.bench_with_input(BenchmarkId::new("decimals", decimals), decimals, |b, &d| {
            b.iter(|| black_box(to_display_string(black_box(amount), d)));
        });
    }

    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_smallest_units");

    let inputs = [
        ("integer", "1500", 18u8),
        ("fraction", "1234.567891", 18),
        ("full_precision", "0.000000000000000001", 18),
        ("empty", "", 18),
    ];

    for (name, text, decimals) in inputs.iter() {
        group.bench_with_input(BenchmarkId::new(*name, decimals), text, |b, text| {
            b.iter(|| black_box(to_smallest_units(black_box(text), *decimals)));
        });
    }

    group.finish();
}

// ============================================================================
// Input State Machine Benchmarks
// ============================================================================

fn benchmark_input_transitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_decimal_input");

    let config = InputConfig::spendable(18, TokenAmount::from_i128(i128::MAX));
    let mut input = BoundedDecimalInput::new(config, TokenAmount::ZERO, Arc::new(NoOpEventHandler));

    group.bench_function("accepted_edit", |b| {
        b.iter(|| black_box(input.edit(black_box("42.125"))));
    });

    group.bench_function("external_value", |b| {
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            let units = if toggle { 1_000 } else { 2_000 };
            black_box(input.set_value(TokenAmount::from_i128(units)))
        });
    });

    group.finish();
}

// ============================================================================
// Cancellation Benchmarks
// ============================================================================

fn benchmark_cancelable(c: &mut Criterion) {
    c.bench_function("make_cancelable_and_resolve", |b| {
        b.iter(|| {
            let (op, _handle) = make_cancelable(futures::future::ready(Ok::<u64, ()>(7)));
            black_box(futures::executor::block_on(op))
        });
    });

    c.bench_function("make_cancelable_and_cancel", |b| {
        b.iter(|| {
            let (op, handle) = make_cancelable(futures::future::pending::<Result<u64, ()>>());
            handle.cancel();
            black_box(futures::executor::block_on(op))
        });
    });
}

criterion_group!(
    benches,
    benchmark_display,
    benchmark_parse,
    benchmark_input_transitions,
    benchmark_cancelable
);
criterion_main!(benches);
