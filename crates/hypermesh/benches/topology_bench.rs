//! Criterion benchmarks for topology extraction and whole-polytope builds.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hypermesh::api::{
    build_polytope, extract_edges, extract_vertices, house4, tesseract, BuildCfg, EdgeKeying,
    FaceColors, RefineCfg, Tessellation,
};

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");
    let faces = house4();
    group.bench_function("extract_vertices_house", |b| {
        b.iter(|| extract_vertices(&faces))
    });
    for &split in &[f64::INFINITY, 0.1, 0.01] {
        group.bench_with_input(BenchmarkId::new("extract_edges_house", split), &split, |b, &s| {
            b.iter(|| extract_edges(&faces, s, EdgeKeying::Undirected))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    let faces = tesseract(1.0);
    for parallel in [false, true] {
        let cfg = BuildCfg {
            tessellation: Tessellation::Refine(RefineCfg::new(0.125, 0.2)),
            parallel,
            ..BuildCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("tesseract", parallel), &cfg, |b, cfg| {
            b.iter(|| build_polytope(&faces, &FaceColors::default(), cfg).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_topology);
criterion_main!(benches);
