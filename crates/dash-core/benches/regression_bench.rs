use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dash_core::fit;

fn gen_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| 20_000.0 + i as f64 * 37.0).collect();
    // linear trend plus a deterministic wobble
    let ys = xs.iter().enumerate().map(|(i, x)| x * 0.0004 + (i as f64 * 0.7).sin() * 3.0).collect();
    (xs, ys)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression");
    for &n in &[50usize, 1_000, 100_000] {
        let (xs, ys) = gen_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &n, |b, _| {
            b.iter(|| black_box(fit(black_box(&xs), black_box(&ys))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
