//! Loads the shipped block models and checks their topology end to end.

use std::path::PathBuf;

use glam::Vec3;
use voxtile_core::BlockType;
use voxtile_mesh::{BasicMesh, HalfEdgeMesh, MeshLibrary, Polygon};

fn model_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/models")
}

#[test]
fn cube_is_closed_manifold() {
    let mesh = HalfEdgeMesh::load(&model_dir(), "cube").unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.edge_count(), 24);
    mesh.validate().unwrap();

    for (id, edge) in mesh.edges() {
        let pair = edge.pair.expect("closed mesh has no boundary");
        assert_eq!(mesh.edge(pair).unwrap().pair, Some(id));
        assert!(edge.important, "every cube edge is a crease");
    }
}

#[test]
fn every_shipped_shape_is_closed() {
    for name in BlockType::SHAPES.iter().filter_map(|shape| shape.model_name()) {
        let mesh = HalfEdgeMesh::load(&model_dir(), name).unwrap();
        mesh.validate().unwrap();
        assert!(mesh.edges().all(|(_, e)| e.pair.is_some()), "{name}");
    }
}

#[test]
fn flattened_triangles_keep_face_normals() {
    let normals = [Vec3::Z, Vec3::X, Vec3::NEG_Y];
    let basic = BasicMesh {
        vertices: vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, -1.0),
        ],
        faces: vec![
            Polygon::Triangle([0, 1, 2]),
            Polygon::Triangle([2, 1, 3]),
            Polygon::Triangle([0, 3, 1]),
        ],
        normals: normals.to_vec(),
    };
    let mesh = HalfEdgeMesh::from_basic(&basic).unwrap().to_mesh();

    assert_eq!(mesh.indices.len(), 9);
    assert_eq!(mesh.vertices.len(), 9);
    for (triangle, normal) in mesh.indices.chunks(3).zip(normals) {
        for &index in triangle {
            assert_eq!(mesh.normals[index as usize], normal);
        }
    }
}

#[test]
fn decimating_a_cube_changes_nothing_but_triangulation() {
    let mut mesh = HalfEdgeMesh::load(&model_dir(), "cube").unwrap();
    let stats = mesh.decimate().unwrap();
    assert_eq!(stats.collapses, 0);
    assert_eq!(stats.faces_after, 12);
    assert_eq!(mesh.vertex_count(), 8);
    mesh.validate().unwrap();
}

#[test]
fn library_loads_available_shapes() {
    let library = MeshLibrary::load(&model_dir());
    assert_eq!(library.shape_count(), 8);

    let cube = library.get(BlockType::Cube, 0).unwrap();
    assert_eq!(cube.indices.len(), 36);
    assert_eq!(cube.vertices.len(), 24);
    assert!(library.get(BlockType::Slope, 3).is_some());
    assert_eq!(library.get(BlockType::InvCorner, 2).unwrap().triangle_count(), 10);
    assert_eq!(library.get(BlockType::CornerSlope, 0).unwrap().triangle_count(), 4);
    assert!(library.get(BlockType::DiagonalCorner, 0).is_none());

    // A quarter turn keeps the cube on the half-unit grid.
    for v in &library.get(BlockType::Cube, 1).unwrap().vertices {
        for c in v.to_array() {
            assert!((c.abs() - 0.5).abs() < 1e-6);
        }
    }
}

#[test]
fn missing_models_are_skipped() {
    let library = MeshLibrary::load(&model_dir().join("does-not-exist"));
    assert!(library.is_empty());
}
