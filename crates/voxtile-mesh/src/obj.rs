//! Wavefront OBJ output.
//!
//! Faces are grouped by normal and every group gets its own copy of the
//! vertices it uses, so each `v` line has exactly one matching `vn` line and
//! face corners reference both with the same index.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use hashbrown::HashMap;

use crate::arena::VertexId;
use crate::error::Result;
use crate::half_edge::HalfEdgeMesh;

/// Normals closer than this share a group.
const NORMAL_QUANTUM: f32 = 1.0e-5;

fn normal_key(normal: Vec3) -> [i64; 3] {
    (normal / NORMAL_QUANTUM).round().as_i64vec3().to_array()
}

/// Write the mesh as OBJ text. Quads are emitted as two triangles.
pub fn write_obj<W: Write>(mesh: &HalfEdgeMesh, mut out: W) -> Result<()> {
    let mut groups: HashMap<[i64; 3], usize> = HashMap::new();
    let mut group_normals: Vec<Vec3> = Vec::new();
    let mut slots: HashMap<(usize, VertexId), u32> = HashMap::new();
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(mesh.face_count());

    for (id, face) in mesh.faces() {
        let group = *groups.entry(normal_key(face.normal)).or_insert_with(|| {
            group_normals.push(face.normal);
            group_normals.len() - 1
        });
        let corners: Vec<u32> = mesh
            .face_vertices(id)
            .into_iter()
            .map(|vertex| {
                *slots.entry((group, vertex)).or_insert_with(|| {
                    positions.push(mesh.vertex(vertex).map_or(Vec3::ZERO, |v| v.location));
                    normals.push(group_normals[group]);
                    (positions.len() - 1) as u32
                })
            })
            .collect();
        match corners[..] {
            [a, b, c] => triangles.push([a, b, c]),
            [a, b, c, d] => triangles.extend([[a, b, c], [a, c, d]]),
            _ => tracing::warn!("skipping face {} with {} corners in OBJ output", id, corners.len()),
        }
    }

    for p in &positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    writeln!(out)?;
    for n in &normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    writeln!(out)?;
    for [a, b, c] in &triangles {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write the mesh to an OBJ file.
pub fn export_obj(mesh: &HalfEdgeMesh, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file))?;
    tracing::info!("exported {} faces to {}", mesh.face_count(), path.display());
    Ok(())
}
