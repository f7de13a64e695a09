//! Criterion benchmarks for formula compile + validation.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p detlab

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use detlab::formula::{CompiledFormula, FormulaValidator};
use nalgebra::Vector2;

fn bench_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula");
    let validator = FormulaValidator::new();
    for text in ["ad-bc", "a*d - b*c", "((a)*(d)) - ((b)*(c))", "a*b-c*d", "a*(d-"] {
        group.bench_with_input(BenchmarkId::new("validate", text), &text, |b, &text| {
            b.iter(|| validator.validate_formula(text))
        });
    }

    let compiled = CompiledFormula::compile("ad-bc").unwrap();
    let u = Vector2::new(3.0, 1.0);
    let v = Vector2::new(1.0, 2.0);
    group.bench_function("eval_compiled", |b| b.iter(|| compiled.eval(u, v)));
    group.finish();
}

criterion_group!(benches, bench_formula);
criterion_main!(benches);
