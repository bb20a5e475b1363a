use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use voxtile_mesh::{BasicMesh, HalfEdgeMesh, Polygon};

/// Flat `n x n` grid of unit quads in the XY plane.
fn grid(n: u32) -> BasicMesh {
    let mut mesh = BasicMesh::default();
    for y in 0..=n {
        for x in 0..=n {
            mesh.vertices.push(Vec3::new(x as f32, y as f32, 0.0));
        }
    }
    let row = n + 1;
    for y in 0..n {
        for x in 0..n {
            let i = x + row * y;
            mesh.push_face(Polygon::Quad([i, i + 1, i + 1 + row, i + row]), Vec3::Z);
        }
    }
    mesh
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("half_edge_build");
    for n in [8, 16, 32] {
        let basic = grid(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &basic, |b, basic| {
            b.iter(|| HalfEdgeMesh::from_basic(black_box(basic)));
        });
    }
    group.finish();
}

fn bench_decimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimate_grid");
    group.sample_size(10);
    for n in [4, 8, 12] {
        let Ok(mesh) = HalfEdgeMesh::from_basic(&grid(n)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.clone(),
                |mut mesh| mesh.decimate(),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_decimate);
criterion_main!(benches);
