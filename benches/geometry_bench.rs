//! Mesh generation benchmarks.
#![allow(missing_docs, unused_results)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use molscope::geometry::{generate_cylinder, generate_sphere};
use molscope::picking::{resolve_selection, PickId, Selection};

fn sphere_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("geodesic_sphere");

    for depth in [1, 2, 3, 4, 5].iter() {
        group.bench_with_input(format!("depth_{depth}"), depth, |b, &depth| {
            b.iter(|| {
                black_box(generate_sphere(
                    black_box(Vec3::ZERO),
                    1.0,
                    Vec3::ONE,
                    depth,
                ))
            });
        });
    }

    group.finish();
}

fn cylinder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond_cylinder");

    for smoothness in [8, 32, 120].iter() {
        group.bench_with_input(
            format!("smoothness_{smoothness}"),
            smoothness,
            |b, &smoothness| {
                b.iter(|| {
                    black_box(generate_cylinder(
                        black_box(Vec3::ZERO),
                        black_box(Vec3::new(1.2, 0.3, -0.4)),
                        Vec3::splat(0.3),
                        0.2,
                        smoothness,
                    ))
                });
            },
        );
    }

    group.finish();
}

fn selection_benchmark(c: &mut Criterion) {
    let objects: Vec<PickId> = (1..=255).filter_map(PickId::new).collect();
    let selected: Selection = objects.iter().copied().step_by(2).collect();

    c.bench_function("resolve_selection_255", |b| {
        b.iter(|| {
            black_box(resolve_selection(
                black_box(128),
                &objects,
                &selected,
                true,
            ))
        });
    });
}

criterion_group!(
    benches,
    sphere_benchmark,
    cylinder_benchmark,
    selection_benchmark
);
criterion_main!(benches);
