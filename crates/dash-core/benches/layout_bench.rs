use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dash_core::{squarify, Hierarchy, TreeRecord};

fn gen_tree(groups: usize, leaves: usize) -> Hierarchy {
    let children = (0..groups)
        .map(|g| {
            let leaves = (0..leaves)
                .map(|l| TreeRecord::leaf(format!("g{g}l{l}"), vec![1.0 + ((g * 31 + l * 17) % 97) as f64]))
                .collect();
            TreeRecord::group(format!("g{g}"), leaves)
        })
        .collect();
    Hierarchy::from_record(TreeRecord::group("root", children)).unwrap()
}

fn bench_squarify(c: &mut Criterion) {
    let mut group = c.benchmark_group("squarify");
    for &(g, l) in &[(5usize, 10usize), (20, 50), (50, 200)] {
        let tree = gen_tree(g, l);
        group.bench_with_input(BenchmarkId::from_parameter(format!("g{g}_l{l}")), &tree, |b, tree| {
            b.iter(|| black_box(squarify(tree, 960.0, 600.0, |id| tree.leaf_size(id, 0))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_squarify);
criterion_main!(benches);
