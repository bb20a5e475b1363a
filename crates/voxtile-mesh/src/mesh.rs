//! Plain mesh containers.

use glam::{Mat3, Vec3};
use voxtile_core::math::round_to_step;

/// Rounding applied to rotated positions.
const POSITION_STEP: f32 = 0.1;
/// Rounding applied to rotated normals.
const NORMAL_STEP: f32 = 1.0e-6;

/// Flattened triangle mesh with one normal per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Vertex normals, parallel to `vertices`
    pub normals: Vec<Vec3>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Whether the mesh has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Copy of the mesh with positions and normals rotated by `rotation`.
    ///
    /// Results are rounded so that quarter turns land exactly on the block grid.
    #[must_use]
    pub fn transformed(&self, rotation: Mat3) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|&v| round_to_step(rotation * v, POSITION_STEP))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|&n| round_to_step(rotation * n, NORMAL_STEP))
                .collect(),
            indices: self.indices.clone(),
        }
    }
}

/// A triangle or quad, as indices into a vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polygon {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Polygon {
    /// Corner indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Self::Triangle(idx) => idx,
            Self::Quad(idx) => idx,
        }
    }

    /// Build a polygon from 3 or 4 indices.
    pub fn from_slice(indices: &[u32]) -> Option<Self> {
        match *indices {
            [a, b, c] => Some(Self::Triangle([a, b, c])),
            [a, b, c, d] => Some(Self::Quad([a, b, c, d])),
            _ => None,
        }
    }
}

/// Indexed polygon mesh: shared vertices, one flat normal per face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasicMesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Faces, indexing `vertices`
    pub faces: Vec<Polygon>,
    /// Face normals, parallel to `faces`
    pub normals: Vec<Vec3>,
}

impl BasicMesh {
    /// Append a face with its normal.
    pub fn push_face(&mut self, face: Polygon, normal: Vec3) {
        self.faces.push(face);
        self.normals.push(normal);
    }
}
