//! Benchmarks for window planning and normalization

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use fela_core::{normalize, Segment, SentenceList, Side, WindowPlan, DEFAULT_MAX_WINDOW_CHARS};
use std::hint::black_box;

fn sentences(side: Side, n: usize) -> SentenceList {
    let texts = (0..n)
        .map(|i| format!("This is sentence number {i} of the benchmark text."))
        .collect();
    SentenceList::new(side, texts).unwrap()
}

/// Alternating 1:1 and 2:1 segments with a gap every tenth sentence
fn segments(n: usize) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut i = 0;
    let mut t = 0;
    while i < n {
        if i % 10 == 9 {
            i += 1;
            continue;
        }
        if i + 1 < n && i % 3 == 0 {
            out.push(Segment::new(vec![i, i + 1], vec![t]));
            i += 2;
        } else {
            out.push(Segment::new(i, t));
            i += 1;
        }
        t += 1;
    }
    out
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for n in [100, 1_000, 10_000] {
        let source = sentences(Side::Source, n);
        let target = sentences(Side::Target, n);
        let segs = segments(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}_sentences"), |b| {
            b.iter(|| normalize(black_box(&source), black_box(&target), black_box(&segs)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_window_texts(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_texts");
    let source = sentences(Side::Source, 2_000);

    for num_overlaps in [1, 4, 8] {
        let plan = WindowPlan::new(source.len(), num_overlaps).unwrap();
        group.throughput(Throughput::Elements(plan.len() as u64));
        group.bench_function(format!("overlaps_{num_overlaps}"), |b| {
            b.iter(|| plan.texts(black_box(&source), DEFAULT_MAX_WINDOW_CHARS).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_window_texts);
criterion_main!(benches);
