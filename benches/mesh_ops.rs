//! Benchmarks for mesh operations.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use halfmesh::prelude::*;

fn grid_faces(n: usize) -> SlicedArray<u32> {
    let mut faces = SlicedArray::with_capacity(n * n * 2, n * n * 6);

    for j in 0..n {
        for i in 0..n {
            let v00 = (j * (n + 1) + i) as u32;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1) as u32;
            let v11 = v01 + 1;

            faces.push_slice(&[v00, v10, v11]);
            faces.push_slice(&[v00, v11, v01]);
        }
    }
    faces
}

fn bench_mesh_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");
    for n in [10usize, 100, 300] {
        let faces = grid_faces(n);
        group.throughput(Throughput::Elements(faces.len() as u64));

        group.bench_with_input(BenchmarkId::new("parallel", n), &faces, |b, faces| {
            b.iter(|| build_mesh(faces, &BuildOptions::full()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("sequential", n), &faces, |b, faces| {
            b.iter(|| build_mesh(faces, &BuildOptions::full().sequential()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("minimal", n), &faces, |b, faces| {
            b.iter(|| build_mesh(faces, &BuildOptions::default()).unwrap());
        });
    }
    group.finish();
}

fn bench_mesh_traversal(c: &mut Criterion) {
    let mesh = build_mesh(&grid_faces(200), &BuildOptions::full()).unwrap();

    c.bench_function("vertex_neighbors_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in mesh.vertex_ids() {
                count += mesh.vertex_neighbors(v).count();
            }
            count
        });
    });

    c.bench_function("face_circulation_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for f in mesh.face_ids() {
                count += mesh.face_circulator(f).count();
            }
            count
        });
    });

    c.bench_function("find_halfedge_all_edges", |b| {
        b.iter(|| {
            mesh.edge_ids()
                .map(|e| {
                    let he = mesh.edge_halfedge(e);
                    mesh.find_halfedge(mesh.vertex(he), mesh.dest(he))
                })
                .filter(|he| he.is_valid())
                .count()
        });
    });

    c.bench_function("to_sliced_array", |b| {
        b.iter(|| to_sliced_array(&mesh));
    });
}

criterion_group!(benches, bench_mesh_construction, bench_mesh_traversal);
criterion_main!(benches);
