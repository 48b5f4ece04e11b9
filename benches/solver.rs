//! Benchmarks for the present packer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use packer::geometry::orientations;
use packer::grid::format_packing;
use packer::input::{parse, REFERENCE_INPUT};
use packer::pieces::{ShapeLibrary, REFERENCE_SHAPES};
use packer::solver::{Region, SearchConfig, Solver, Verdict};
use packer::Problem;

fn reference_library() -> ShapeLibrary {
    ShapeLibrary::from_patterns(REFERENCE_SHAPES).unwrap()
}

/// Benchmark counting feasible regions of the whole reference puzzle.
fn bench_count_reference(c: &mut Criterion) {
    let problem = Problem::parse(REFERENCE_INPUT).unwrap();
    let mut group = c.benchmark_group("reference");
    group.sample_size(10);
    group.bench_function("count_feasible", |b| {
        b.iter(|| black_box(&problem).count_feasible(SearchConfig::default()))
    });
    group.finish();
}

/// Benchmark the feasible 12x5 region.
fn bench_feasible_region(c: &mut Criterion) {
    let library = reference_library();
    let solver = Solver::new(&library);
    let region = Region::new(12, 5, vec![1, 0, 1, 0, 2, 2]);

    c.bench_function("feasible_12x5", |b| {
        b.iter(|| solver.check(black_box(&region)))
    });
}

/// Benchmark proving the crowded 12x5 region infeasible, with and without
/// unreachable-cell pruning.
fn bench_infeasible_region(c: &mut Criterion) {
    let library = reference_library();
    let region = Region::new(12, 5, vec![1, 0, 1, 0, 3, 2]);
    let mut group = c.benchmark_group("infeasible_12x5");
    group.sample_size(10);

    for prune_unreachable in [true, false] {
        let config = SearchConfig {
            max_nodes: None,
            prune_unreachable,
        };
        let solver = Solver::with_config(&library, config);
        let name = if prune_unreachable { "pruned" } else { "plain" };
        group.bench_function(name, |b| b.iter(|| solver.check(black_box(&region))));
    }
    group.finish();
}

/// Benchmark computing all orientations for a single shape.
fn bench_orientations(c: &mut Criterion) {
    let library = reference_library();
    let shape = library.shape(0).unwrap();

    c.bench_function("orientations", |b| {
        b.iter(|| orientations(black_box(shape)))
    });
}

/// Benchmark parsing the reference input.
fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_reference", |b| {
        b.iter(|| parse(black_box(REFERENCE_INPUT)))
    });
}

/// Benchmark formatting a packing for display.
fn bench_format_packing(c: &mut Criterion) {
    let library = reference_library();
    let region = Region::new(12, 5, vec![1, 0, 1, 0, 2, 2]);
    let Ok(report) = Solver::new(&library).check(&region) else {
        return;
    };
    let Verdict::Fits(packing) = report.verdict else {
        return;
    };

    c.bench_function("format_packing", |b| {
        b.iter(|| format_packing(12, 5, &library, black_box(&packing)))
    });
}

criterion_group!(
    benches,
    bench_count_reference,
    bench_feasible_region,
    bench_infeasible_region,
    bench_orientations,
    bench_parse,
    bench_format_packing
);
criterion_main!(benches);
