//! Benchmarks for highlighting.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use glint_core::{Highlighter, LineWindow, PhpTokenizer, Tokenizer};

/// Generates a PHP class with `methods` small methods.
fn generate_source(methods: usize) -> String {
    let mut source = String::from("<?php\n\nnamespace App\\Service;\n\nclass Generated extends Base\n{\n");
    for i in 0..methods {
        source.push_str(&format!(
            "    /** Method {i}. */\n    public function method{i}(int $x): ?Result\n    {{\n        $value = strlen('item {i}') + $x * {i};\n        return new Result($value, self::LIMIT);\n    }}\n\n"
        ));
    }
    source.push_str("}\n");
    source
}

/// Benchmarks tokenizing alone.
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for methods in [10, 100, 1000].iter() {
        let source = generate_source(*methods);

        group.bench_with_input(BenchmarkId::new("php", methods), &source, |b, source| {
            b.iter(|| black_box(PhpTokenizer.tokenize(black_box(source))))
        });
    }

    group.finish();
}

/// Benchmarks whole-source highlighting.
fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");
    let highlighter = Highlighter::new();

    for methods in [10, 100, 1000].iter() {
        let source = generate_source(*methods);

        group.bench_with_input(BenchmarkId::new("full", methods), &source, |b, source| {
            b.iter(|| black_box(highlighter.highlight(black_box(source), None, None, None)))
        });
    }

    group.finish();
}

/// Benchmarks windowed extraction at various depths.
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let highlighter = Highlighter::new();
    let source = generate_source(1000);

    group.bench_function("near_start", |b| {
        b.iter(|| black_box(highlighter.extract(black_box(&source), 20, 8)))
    });

    group.bench_function("near_end", |b| {
        b.iter(|| black_box(highlighter.extract(black_box(&source), 6900, 8)))
    });

    group.bench_function("fallback", |b| {
        let broken = format!("{source}\n$x = 'unterminated;");
        let window = LineWindow::around(6900, 8);
        b.iter(|| black_box(highlighter.highlight_window(black_box(&broken), &window)))
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_highlight, bench_extract);
criterion_main!(benches);
