//! Block meshes per shape and rotation.

use std::path::Path;

use hashbrown::HashMap;
use voxtile_core::constants::ROTATIONS;
use voxtile_core::math::y_rotation;
use voxtile_core::BlockType;

use crate::half_edge::HalfEdgeMesh;
use crate::mesh::Mesh;

/// Flattened block meshes, one per shape and quarter turn.
#[derive(Clone, Debug, Default)]
pub struct MeshLibrary {
    meshes: HashMap<(BlockType, u8), Mesh>,
}

impl MeshLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every shape that has a model file in `dir`.
    ///
    /// A missing or malformed file is logged and its shape left out; the
    /// rest of the library still loads.
    pub fn load(dir: &Path) -> Self {
        let mut library = Self::new();
        for shape in BlockType::SHAPES {
            let Some(name) = shape.model_name() else {
                continue;
            };
            match HalfEdgeMesh::load(dir, name) {
                Ok(mesh) => library.insert(shape, &mesh.to_mesh()),
                Err(err) => tracing::warn!("skipping block model '{}': {}", name, err),
            }
        }
        tracing::info!(
            "loaded {} block shapes from {}",
            library.shape_count(),
            dir.display()
        );
        library
    }

    /// Register a shape from its unrotated mesh, storing all four rotations.
    pub fn insert(&mut self, shape: BlockType, base: &Mesh) {
        for rotation in 0..ROTATIONS {
            let mesh = if rotation == 0 {
                base.clone()
            } else {
                base.transformed(y_rotation(rotation))
            };
            self.meshes.insert((shape, rotation), mesh);
        }
    }

    /// Mesh for a shape at a rotation, if the shape was loaded.
    pub fn get(&self, shape: BlockType, rotation: u8) -> Option<&Mesh> {
        self.meshes.get(&(shape, rotation % ROTATIONS))
    }

    /// Number of shapes available.
    pub fn shape_count(&self) -> usize {
        self.meshes.len() / ROTATIONS as usize
    }

    /// Whether no shape has been loaded.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn wedge() -> Mesh {
        Mesh {
            vertices: vec![
                Vec3::new(0.5, -0.5, -0.5),
                Vec3::new(0.5, 0.5, -0.5),
                Vec3::new(0.5, -0.5, 0.5),
            ],
            normals: vec![Vec3::X; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn stores_four_rotations() {
        let mut library = MeshLibrary::new();
        library.insert(BlockType::Slope, &wedge());
        assert_eq!(library.shape_count(), 1);
        assert_eq!(library.get(BlockType::Slope, 0), Some(&wedge()));
        assert!(library.get(BlockType::Slope, 3).is_some());
        assert!(library.get(BlockType::Cube, 0).is_none());

        let quarter = library.get(BlockType::Slope, 1).unwrap();
        assert_relative_eq!(quarter.normals[0].z, -1.0, epsilon = 1e-6);
        let half = library.get(BlockType::Slope, 2).unwrap();
        assert_relative_eq!(half.normals[0].x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(half.vertices[0].x, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let library = MeshLibrary::load(Path::new("no/such/dir"));
        assert!(library.is_empty());
    }
}
