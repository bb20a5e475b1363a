//! Half-edge mesh topology.
//!
//! Each polygon side is a directed half-edge pointing at its destination
//! vertex. Half-edges of one face form a cyclic `next` ring, and the two
//! half-edges of a shared side reference each other through `pair`. Sides on
//! an open boundary have no pair.
//!
//! Storage is arena based: ids stay valid until the element they name is
//! removed, which lets the decimator edit the structure in place.

use std::path::Path;

use glam::Vec3;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use crate::arena::{Arena, EdgeId, FaceId, VertexId};
use crate::error::{MeshError, Result};
use crate::mesh::{BasicMesh, Mesh};
use crate::raw_model;

/// Tolerance used when comparing face normals.
pub(crate) const NORMAL_EPSILON: f32 = 1.0e-4;

/// Mesh vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Position
    pub location: Vec3,
    /// One half-edge leaving this vertex
    pub edge: Option<EdgeId>,
}

/// Directed half-edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// Destination vertex
    pub vert: VertexId,
    /// Opposite half-edge, `None` on an open boundary
    pub pair: Option<EdgeId>,
    /// Face this half-edge borders
    pub face: FaceId,
    /// Next half-edge around the face
    pub next: EdgeId,
    /// Boundary or crease edge that decimation must keep
    pub important: bool,
}

/// Polygon face with its flat normal.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Half-edge flattening starts from
    pub edge: EdgeId,
    /// Unit face normal
    pub normal: Vec3,
}

/// Editable half-edge mesh.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: Arena<VertexId, Vertex>,
    pub(crate) edges: Arena<EdgeId, Edge>,
    pub(crate) faces: Arena<FaceId, Face>,
}

impl HalfEdgeMesh {
    /// Build the topology of an indexed polygon mesh.
    ///
    /// Every face index must be in range and every face needs a normal. A
    /// directed side that appears twice makes the input non-manifold; the
    /// repeat is logged and left without a pair. Vertices no face uses are
    /// dropped.
    pub fn from_basic(basic: &BasicMesh) -> Result<Self> {
        let count = basic.vertices.len();
        for (face, polygon) in basic.faces.iter().enumerate() {
            if let Some(&index) = polygon.indices().iter().find(|&&i| i as usize >= count) {
                return Err(MeshError::IndexOutOfRange { face, index, count });
            }
            if face >= basic.normals.len() {
                return Err(MeshError::MissingNormal {
                    face,
                    normals: basic.normals.len(),
                    faces: basic.faces.len(),
                });
            }
        }

        let side_count: usize = basic.faces.iter().map(|p| p.indices().len()).sum();
        let mut mesh = Self {
            vertices: Arena::with_capacity(count),
            edges: Arena::with_capacity(side_count),
            faces: Arena::with_capacity(basic.faces.len()),
        };
        let ids: Vec<VertexId> = basic
            .vertices
            .iter()
            .map(|&location| {
                mesh.vertices.insert(Vertex {
                    location,
                    edge: None,
                })
            })
            .collect();

        let mut sides: HashMap<(u32, u32), EdgeId> = HashMap::with_capacity(side_count);
        for (polygon, &normal) in basic.faces.iter().zip(&basic.normals) {
            let corners = polygon.indices();
            let corner_ids: Vec<VertexId> = corners.iter().map(|&i| ids[i as usize]).collect();
            let ring = mesh.push_face(&corner_ids, normal);
            for (i, &edge) in ring.iter().enumerate() {
                let key = (corners[i], corners[(i + 1) % corners.len()]);
                match sides.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(edge);
                    }
                    Entry::Occupied(_) => tracing::warn!(
                        "non-manifold input: side {} -> {} is used by more than one face",
                        key.0,
                        key.1
                    ),
                }
            }
        }

        for (&(from, to), &edge) in &sides {
            mesh.edges[edge].pair = sides.get(&(to, from)).copied();
        }

        let isolated: Vec<VertexId> = mesh
            .vertices
            .iter()
            .filter(|(_, v)| v.edge.is_none())
            .map(|(id, _)| id)
            .collect();
        if !isolated.is_empty() {
            tracing::debug!("dropping {} unreferenced vertices", isolated.len());
        }
        for id in isolated {
            mesh.vertices.remove(id);
        }

        let all: Vec<EdgeId> = mesh.edges.ids().collect();
        for edge in all {
            mesh.refresh_importance(edge);
        }

        Ok(mesh)
    }

    /// Load `<dir>/<name>.rawmodel` and build its topology.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(name).with_extension(raw_model::EXTENSION);
        let basic = raw_model::load(&path)?;
        Self::from_basic(&basic)
    }

    /// Insert a face over existing vertices and return its half-edge ring.
    ///
    /// Half-edge `i` runs from corner `i` to corner `i + 1`. Quads start
    /// flattening at the side ending in the fourth corner.
    pub(crate) fn push_face(&mut self, corners: &[VertexId], normal: Vec3) -> Vec<EdgeId> {
        let n = corners.len();
        let face = self.faces.next_id();

        let mut ring = Vec::with_capacity(n);
        for i in 0..n {
            let id = self.edges.next_id();
            self.edges.insert(Edge {
                vert: corners[(i + 1) % n],
                pair: None,
                face,
                next: id,
                important: false,
            });
            ring.push(id);
        }
        for i in 0..n {
            self.edges[ring[i]].next = ring[(i + 1) % n];
            self.vertices[corners[i]].edge = Some(ring[i]);
        }

        let start = if n == 4 { ring[2] } else { ring[0] };
        self.faces.insert(Face {
            edge: start,
            normal,
        });
        ring
    }

    /// Number of live vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live half-edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of live faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter()
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces.iter()
    }

    /// Half-edges of a face, starting at `face.edge`.
    pub fn face_ring(&self, face: FaceId) -> Vec<EdgeId> {
        let start = self.faces[face].edge;
        let mut ring = vec![start];
        let mut current = self.edges[start].next;
        while current != start && ring.len() <= self.edges.len() {
            ring.push(current);
            current = self.edges[current].next;
        }
        ring
    }

    /// Corner vertices of a face in flattening order.
    pub fn face_vertices(&self, face: FaceId) -> Vec<VertexId> {
        self.face_ring(face)
            .into_iter()
            .map(|e| self.edges[e].vert)
            .collect()
    }

    /// Half-edge preceding `edge` in its face.
    pub fn prev(&self, edge: EdgeId) -> EdgeId {
        let mut current = edge;
        loop {
            let next = self.edges[current].next;
            if next == edge {
                return current;
            }
            current = next;
        }
    }

    /// Vertex a half-edge leaves from.
    #[inline]
    pub fn origin(&self, edge: EdgeId) -> VertexId {
        self.edges[self.prev(edge)].vert
    }

    /// Vector from the origin to the destination of a half-edge.
    pub fn edge_vector(&self, edge: EdgeId) -> Vec3 {
        let to = self.vertices[self.edges[edge].vert].location;
        let from = self.vertices[self.origin(edge)].location;
        to - from
    }

    /// Half-edges leaving `vertex`, walking the fan in both directions so
    /// that vertices on an open boundary are covered too.
    pub fn outgoing(&self, vertex: VertexId) -> Vec<EdgeId> {
        let Some(start) = self.vertices.get(vertex).and_then(|v| v.edge) else {
            return Vec::new();
        };
        let limit = self.edges.len();

        let mut fan = vec![start];
        let mut current = start;
        let mut closed = false;
        while let Some(pair) = self.edges[current].pair {
            current = self.edges[pair].next;
            if current == start {
                closed = true;
                break;
            }
            if fan.len() > limit {
                break;
            }
            fan.push(current);
        }

        if !closed {
            current = start;
            while let Some(pair) = self.edges[self.prev(current)].pair {
                current = pair;
                if current == start || fan.len() > limit {
                    break;
                }
                fan.push(current);
            }
        }
        fan
    }

    /// Vertices sharing an edge with `vertex`.
    pub fn neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut result = Vec::new();
        for edge in self.outgoing(vertex) {
            // Every face of the fan has one side leaving and one entering.
            for other in [self.edges[edge].vert, self.origin(self.prev(edge))] {
                if !result.contains(&other) {
                    result.push(other);
                }
            }
        }
        result
    }

    /// Whether `edge` must survive decimation: it lies on an open boundary or
    /// separates faces with different normals.
    pub fn is_crease(&self, edge: EdgeId) -> bool {
        let e = &self.edges[edge];
        e.pair.map_or(true, |pair| {
            let a = self.faces[e.face].normal;
            let b = self.faces[self.edges[pair].face].normal;
            !a.abs_diff_eq(b, NORMAL_EPSILON)
        })
    }

    /// Recompute the `important` flag of a half-edge.
    pub(crate) fn refresh_importance(&mut self, edge: EdgeId) {
        let important = self.is_crease(edge);
        self.edges[edge].important = important;
    }

    /// Whether any edge touching `vertex` is important.
    pub fn on_crease(&self, vertex: VertexId) -> bool {
        self.outgoing(vertex).into_iter().any(|e| {
            self.edges[e].important || self.edges[self.prev(e)].important
        })
    }

    /// Flatten into a triangle mesh with per-vertex copies of the face normal.
    ///
    /// Triangles keep their three corners; quads emit four corners and the
    /// triangles `0 1 2` and `0 2 3`.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::default();
        for (id, face) in self.faces.iter() {
            let corners = self.face_vertices(id);
            let base = mesh.vertices.len() as u32;
            match corners.len() {
                3 => mesh.indices.extend([base, base + 1, base + 2]),
                4 => mesh
                    .indices
                    .extend([base, base + 1, base + 2, base, base + 2, base + 3]),
                len => {
                    tracing::warn!("skipping face {} with {} corners", id, len);
                    continue;
                }
            }
            for corner in corners {
                mesh.vertices.push(self.vertices[corner].location);
                mesh.normals.push(face.normal);
            }
        }
        mesh
    }

    /// Check the structural invariants, describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let fail = |message: String| Err(MeshError::Topology(message));

        for (id, edge) in self.edges.iter() {
            if !self.vertices.contains(edge.vert) {
                return fail(format!("edge {id} points at dead vertex {}", edge.vert));
            }
            if !self.faces.contains(edge.face) || !self.edges.contains(edge.next) {
                return fail(format!("edge {id} references a dead face or edge"));
            }
            if self.edges[edge.next].face != edge.face {
                return fail(format!("edge {id} leaves its face ring"));
            }
            if let Some(pair) = edge.pair {
                let Some(opposite) = self.edges.get(pair) else {
                    return fail(format!("edge {id} has dead pair {pair}"));
                };
                if opposite.pair != Some(id) {
                    return fail(format!("pair of edge {id} does not point back"));
                }
                if opposite.vert != self.origin(id) {
                    return fail(format!("edge {id} and its pair are not opposite"));
                }
            }
        }

        for (id, face) in self.faces.iter() {
            if !self.edges.contains(face.edge) {
                return fail(format!("face {id} references dead edge {}", face.edge));
            }
            let len = self.face_ring(id).len();
            if !(3..=4).contains(&len) {
                return fail(format!("face {id} has a ring of {len} edges"));
            }
        }

        for (id, vertex) in self.vertices.iter() {
            let Some(edge) = vertex.edge else {
                return fail(format!("vertex {id} has no outgoing edge"));
            };
            if !self.edges.contains(edge) || self.origin(edge) != id {
                return fail(format!("vertex {id} has a stale outgoing edge"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Polygon;

    fn square() -> BasicMesh {
        BasicMesh {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![Polygon::Triangle([0, 1, 2]), Polygon::Triangle([0, 2, 3])],
            normals: vec![Vec3::Z, Vec3::Z],
        }
    }

    #[test]
    fn builds_pairs_and_boundary() {
        let mesh = HalfEdgeMesh::from_basic(&square()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.face_count(), 2);
        mesh.validate().unwrap();

        let paired = mesh.edges().filter(|(_, e)| e.pair.is_some()).count();
        assert_eq!(paired, 2);
        // Boundary sides are important, the shared diagonal is not.
        for (_, edge) in mesh.edges() {
            assert_eq!(edge.important, edge.pair.is_none());
        }
    }

    #[test]
    fn triangle_flattens_from_second_corner() {
        let mut basic = square();
        basic.faces.truncate(1);
        basic.normals.truncate(1);
        let mesh = HalfEdgeMesh::from_basic(&basic).unwrap();
        let flat = mesh.to_mesh();
        assert_eq!(
            flat.vertices,
            vec![basic.vertices[1], basic.vertices[2], basic.vertices[0]]
        );
        assert_eq!(flat.indices, vec![0, 1, 2]);
    }

    #[test]
    fn quad_flattens_from_fourth_corner() {
        let mut basic = square();
        basic.faces = vec![Polygon::Quad([0, 1, 2, 3])];
        basic.normals.truncate(1);
        let mesh = HalfEdgeMesh::from_basic(&basic).unwrap();
        let flat = mesh.to_mesh();
        assert_eq!(
            flat.vertices,
            vec![
                basic.vertices[3],
                basic.vertices[0],
                basic.vertices[1],
                basic.vertices[2]
            ]
        );
        assert_eq!(flat.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(flat.normals.iter().all(|&n| n == Vec3::Z));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut basic = square();
        basic.faces.push(Polygon::Triangle([0, 2, 4]));
        basic.normals.push(Vec3::Z);
        let err = HalfEdgeMesh::from_basic(&basic).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                face: 2,
                index: 4,
                count: 4
            }
        ));
    }

    #[test]
    fn rejects_missing_normal() {
        let mut basic = square();
        basic.normals.pop();
        let err = HalfEdgeMesh::from_basic(&basic).unwrap_err();
        assert!(matches!(err, MeshError::MissingNormal { face: 1, .. }));
    }

    #[test]
    fn prunes_isolated_vertices() {
        let mut basic = square();
        basic.vertices.push(Vec3::splat(9.0));
        let mesh = HalfEdgeMesh::from_basic(&basic).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        mesh.validate().unwrap();
    }

    #[test]
    fn repeated_side_is_left_unpaired() {
        let mut basic = square();
        basic.faces.push(Polygon::Triangle([0, 1, 2]));
        basic.normals.push(Vec3::Z);
        let mesh = HalfEdgeMesh::from_basic(&basic).unwrap();
        assert_eq!(mesh.face_count(), 3);
        mesh.validate().unwrap();
    }

    #[test]
    fn boundary_fan_covers_all_outgoing_edges() {
        let mesh = HalfEdgeMesh::from_basic(&square()).unwrap();
        // Vertex 0 is the shared corner of both triangles.
        let fan = mesh.outgoing(VertexId(0));
        assert_eq!(fan.len(), 2);
        let mut neighbours = mesh.neighbours(VertexId(0));
        neighbours.sort();
        assert_eq!(neighbours, vec![VertexId(1), VertexId(2), VertexId(3)]);
        assert!(mesh.on_crease(VertexId(0)));
    }
}
