//! Crease-preserving edge-collapse decimation.
//!
//! An edge `a -> b` is collapsed by merging its destination `b` into its
//! origin `a`. Vertices inside a flat region go unconditionally. Vertices on
//! a crease only go when they sit in the middle of a straight crease run, so
//! the silhouette and every hard edge keep their shape.

use glam::Vec3;

use crate::arena::{EdgeId, FaceId, VertexId};
use crate::error::{MeshError, Result};
use crate::half_edge::{HalfEdgeMesh, NORMAL_EPSILON};

/// Below this squared length a triangle counts as degenerate.
const MIN_AREA_SQ: f32 = 1.0e-12;

/// Outcome of a decimation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecimationStats {
    /// Number of edges collapsed
    pub collapses: usize,
    /// Triangles after quads were split, before collapsing
    pub faces_before: usize,
    /// Triangles left
    pub faces_after: usize,
}

impl HalfEdgeMesh {
    /// Split every quad into two triangles.
    ///
    /// Fails without touching the mesh if any face ring is not a triangle or
    /// a quad.
    pub fn triangulate(&mut self) -> Result<()> {
        let mut quads = Vec::new();
        for face in self.faces.ids() {
            match self.face_ring(face).len() {
                3 => {}
                4 => quads.push(face),
                len => return Err(MeshError::DegenerateFace { face, len }),
            }
        }
        for face in quads {
            self.split_quad(face);
        }
        Ok(())
    }

    /// Replace a quad by the triangles `0 1 2` and `0 2 3`, corners taken in
    /// flattening order.
    fn split_quad(&mut self, face: FaceId) {
        let ring = self.face_ring(face);
        let corners: Vec<VertexId> = ring.iter().map(|&e| self.edges[e].vert).collect();
        let normal = self.faces[face].normal;

        // Side i of the ring runs from corner i - 1 to corner i.
        let outer: Vec<((VertexId, VertexId), Option<EdgeId>)> = ring
            .iter()
            .enumerate()
            .map(|(i, &e)| ((corners[(i + 3) % 4], corners[i]), self.edges[e].pair))
            .collect();

        for &e in &ring {
            self.edges.remove(e);
        }
        self.faces.remove(face);

        let first = self.push_face(&[corners[0], corners[1], corners[2]], normal);
        let second = self.push_face(&[corners[0], corners[2], corners[3]], normal);
        self.link(first[2], Some(second[0]));

        let sides = [
            (first[0], (corners[0], corners[1])),
            (first[1], (corners[1], corners[2])),
            (second[1], (corners[2], corners[3])),
            (second[2], (corners[3], corners[0])),
        ];
        for (edge, key) in sides {
            let pair = outer.iter().find(|(k, _)| *k == key).and_then(|(_, p)| *p);
            self.link(edge, pair);
        }
        for edge in first.into_iter().chain(second) {
            self.refresh_importance(edge);
        }
    }

    /// Make `edge` and `pair` opposites of each other.
    fn link(&mut self, edge: EdgeId, pair: Option<EdgeId>) {
        self.edges[edge].pair = pair;
        if let Some(pair) = pair {
            self.edges[pair].pair = Some(edge);
        }
    }

    /// Collapse edges until none qualifies.
    ///
    /// Quads are split first. After each collapse the scan starts over from
    /// the first live edge.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn decimate(&mut self) -> Result<DecimationStats> {
        self.triangulate()?;
        let all: Vec<EdgeId> = self.edges.ids().collect();
        for edge in all {
            self.refresh_importance(edge);
        }

        let faces_before = self.face_count();
        let mut collapses = 0;
        'scan: loop {
            let candidates: Vec<EdgeId> = self.edges.ids().collect();
            for edge in candidates {
                if self.can_collapse(edge) {
                    self.collapse(edge);
                    collapses += 1;
                    continue 'scan;
                }
            }
            break;
        }

        let stats = DecimationStats {
            collapses,
            faces_before,
            faces_after: self.face_count(),
        };
        tracing::debug!(
            "decimated {} -> {} faces in {} collapses",
            stats.faces_before,
            stats.faces_after,
            stats.collapses
        );
        Ok(stats)
    }

    /// Whether merging the destination of `edge` into its origin keeps the
    /// mesh valid and its creases intact.
    pub fn can_collapse(&self, edge: EdgeId) -> bool {
        let Some(pair) = self.edges[edge].pair else {
            return false;
        };
        let face = self.edges[edge].face;
        let pair_face = self.edges[pair].face;
        if face == pair_face
            || self.face_ring(face).len() != 3
            || self.face_ring(pair_face).len() != 3
        {
            return false;
        }

        let a = self.origin(edge);
        let b = self.edges[edge].vert;
        if a == b {
            return false;
        }

        if self.on_crease(b) && !self.slides_along_crease(edge, a, b) {
            return false;
        }

        let c = self.edges[self.edges[edge].next].vert;
        let d = self.edges[self.edges[pair].next].vert;
        self.link_condition(a, b, c, d) && !self.collapse_flips(a, b, face, pair_face)
    }

    /// `b` lies inside a straight crease run that continues past it from `a`.
    fn slides_along_crease(&self, edge: EdgeId, a: VertexId, b: VertexId) -> bool {
        if !self.on_crease(a) {
            return false;
        }
        let dir = self.edge_vector(edge).normalize_or_zero();
        if dir == Vec3::ZERO {
            return false;
        }

        let fan = self.outgoing(b);
        let continues = fan.iter().any(|&out| {
            let step = self.edge_vector(out).normalize_or_zero();
            step.abs_diff_eq(dir, NORMAL_EPSILON) && self.on_crease(self.edges[out].vert)
        });
        if !continues {
            return false;
        }

        fan.iter().all(|&out| {
            let incoming = self.prev(out);
            [out, incoming].into_iter().all(|e| {
                !self.edges[e].important
                    || self
                        .edge_vector(e)
                        .normalize_or_zero()
                        .cross(dir)
                        .length_squared()
                        < NORMAL_EPSILON
            })
        })
    }

    /// The only vertices adjacent to both `a` and `b` are the tips of the
    /// two triangles that vanish.
    fn link_condition(&self, a: VertexId, b: VertexId, c: VertexId, d: VertexId) -> bool {
        if c == d {
            return false;
        }
        let around_b = self.neighbours(b);
        let shared: Vec<VertexId> = self
            .neighbours(a)
            .into_iter()
            .filter(|v| around_b.contains(v))
            .collect();
        shared.len() == 2 && shared.contains(&c) && shared.contains(&d)
    }

    /// Moving `b` onto `a` would flip or flatten one of the faces that survive.
    fn collapse_flips(&self, a: VertexId, b: VertexId, gone: FaceId, pair_gone: FaceId) -> bool {
        let target = self.vertices[a].location;
        self.outgoing(b).into_iter().any(|out| {
            let face = self.edges[out].face;
            if face == gone || face == pair_gone {
                return false;
            }
            let corners = self.face_vertices(face);
            let before: Vec<Vec3> = corners
                .iter()
                .map(|&v| self.vertices[v].location)
                .collect();
            let after: Vec<Vec3> = corners
                .iter()
                .zip(&before)
                .map(|(&v, &p)| if v == b { target } else { p })
                .collect();
            let old = (before[1] - before[0]).cross(before[2] - before[0]);
            let new = (after[1] - after[0]).cross(after[2] - after[0]);
            new.length_squared() < MIN_AREA_SQ || old.dot(new) <= 0.0
        })
    }

    /// Merge the destination of `edge` into its origin, dropping the two
    /// triangles on either side.
    fn collapse(&mut self, edge: EdgeId) {
        let Some(pair) = self.edges[edge].pair else {
            return;
        };
        let a = self.origin(edge);
        let b = self.edges[edge].vert;

        let e1 = self.edges[edge].next;
        let e2 = self.edges[e1].next;
        let p1 = self.edges[pair].next;
        let p2 = self.edges[p1].next;
        let c = self.edges[e1].vert;
        let d = self.edges[p1].vert;
        let faces = [self.edges[edge].face, self.edges[pair].face];

        for (_, half) in self.edges.iter_mut() {
            if half.vert == b {
                half.vert = a;
            }
        }

        // Sides of the vanishing triangles become one edge each.
        let mut touched = Vec::with_capacity(4);
        for (left, right) in [(e1, e2), (p1, p2)] {
            let x = self.edges[left].pair;
            let y = self.edges[right].pair;
            if let Some(x) = x {
                self.edges[x].pair = y;
                touched.push(x);
            }
            if let Some(y) = y {
                self.edges[y].pair = x;
                touched.push(y);
            }
        }

        let candidates_a = [self.edges[e2].pair, self.edges[p2].pair];
        let candidate_c = [self.edges[e1].pair];
        let candidate_d = [self.edges[p1].pair];

        for half in [edge, e1, e2, pair, p1, p2] {
            self.edges.remove(half);
        }
        for face in faces {
            self.faces.remove(face);
        }
        self.vertices.remove(b);

        self.repair_vertex_edge(a, &candidates_a);
        self.repair_vertex_edge(c, &candidate_c);
        self.repair_vertex_edge(d, &candidate_d);

        for half in touched {
            self.refresh_importance(half);
        }
    }

    /// Point `vertex` at a live outgoing edge, preferring the candidates.
    fn repair_vertex_edge(&mut self, vertex: VertexId, candidates: &[Option<EdgeId>]) {
        let current = self.vertices.get(vertex).and_then(|v| v.edge);
        if current.is_some_and(|e| self.edges.contains(e)) {
            return;
        }
        let replacement = candidates
            .iter()
            .flatten()
            .copied()
            .find(|&e| self.edges.contains(e))
            .or_else(|| self.edges.ids().find(|&e| self.origin(e) == vertex));
        if let Some(vertex) = self.vertices.get_mut(vertex) {
            vertex.edge = replacement;
        }
    }
}
