// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for ear-clipping triangulation of floor plan faces.
//!
//! Run with: cargo bench -p floorplan-glb-geometry

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use floorplan_glb_geometry::{triangulate_polygon, Point3};

/// Comb-shaped room outline with `teeth` notches along one side
fn comb(teeth: usize) -> (Vec<Point3<f64>>, Vec<u32>) {
    let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
    for t in 0..teeth {
        let x = t as f64 * 2.0;
        vertices.push(Point3::new(x, 3.0, 0.0));
        vertices.push(Point3::new(x + 1.0, 3.0, 0.0));
        vertices.push(Point3::new(x + 1.0, 1.0, 0.0));
        vertices.push(Point3::new(x + 2.0, 1.0, 0.0));
    }
    vertices.push(Point3::new(teeth as f64 * 2.0, 0.0, 0.0));

    let polygon = (0..vertices.len() as u32).collect();
    (vertices, polygon)
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate_polygon");

    for teeth in [1, 4, 8, 16] {
        let (vertices, polygon) = comb(teeth);
        group.bench_with_input(
            BenchmarkId::from_parameter(polygon.len()),
            &(vertices, polygon),
            |b, (vertices, polygon)| {
                b.iter(|| triangulate_polygon(black_box(vertices), black_box(polygon)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_triangulate);
criterion_main!(benches);
