//! Benchmark – `LazyValue::float_value` against `str::parse::<f32>`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonlazy::{LazyValue, ValueKind};

/// Short plain decimals take the fast path; the rest fall back to the
/// generic parser.
const INPUTS: &[(&str, &str)] = &[
    ("short", "3.14"),
    ("negative", "-271.828"),
    ("integral", "65536"),
    ("nine_places", "0.123456789"),
    ("exponent", "6.02214076e23"),
    ("long", "3.14159265358979323846"),
];

/// Lays the literals out as a JSON array and returns each literal's range.
fn make_document(literals: &[&str]) -> (String, Vec<std::ops::Range<usize>>) {
    let mut doc = String::from("[");
    let mut ranges = Vec::with_capacity(literals.len());
    for (i, lit) in literals.iter().enumerate() {
        if i > 0 {
            doc.push(',');
        }
        let start = doc.len();
        doc.push_str(lit);
        ranges.push(start..doc.len());
    }
    doc.push(']');
    (doc, ranges)
}

fn bench_float_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("float_value");

    for &(name, literal) in INPUTS {
        let (doc, ranges) = make_document(&[literal; 64]);

        group.bench_with_input(BenchmarkId::new("lazy", name), &ranges, |b, ranges| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for range in ranges {
                    let value =
                        LazyValue::new(false, ValueKind::Double, range.clone(), doc.as_bytes())
                            .unwrap();
                    sum += value.float_value().unwrap();
                }
                black_box(sum);
            });
        });

        group.bench_with_input(BenchmarkId::new("std_parse", name), &ranges, |b, ranges| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for range in ranges {
                    sum += doc[range.clone()].parse::<f32>().unwrap();
                }
                black_box(sum);
            });
        });
    }
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

criterion_group! { name = benches; config = criterion(); targets = bench_float_value }
criterion_main!(benches);
