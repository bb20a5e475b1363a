//! Whole-scene export to a single decimated mesh.
//!
//! Tiles are culled in parallel into triangle soups, the soups are welded
//! into one indexed mesh, and the result goes through the half-edge builder
//! and the decimator before being written as OBJ.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::{IVec3, Vec3};
use hashbrown::HashMap;
use rayon::prelude::*;
use voxtile_core::math::Aabb;
use voxtile_mesh::{BasicMesh, DecimationStats, HalfEdgeMesh, Mesh, MeshLibrary, Polygon};

use crate::error::Result;
use crate::scene::Scene;
use crate::tile_mesh::{emit_tile, BlockSite, TriangleSink};

/// Positions closer than this are welded into one vertex.
const WELD_QUANTUM: f32 = 1.0e-3;

/// Export settings.
#[derive(Clone, Copy, Debug)]
pub struct ExportOptions {
    /// Collapse flat regions and straight crease runs before writing.
    pub decimate: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { decimate: true }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable decimation.
    pub fn with_decimation(mut self, decimate: bool) -> Self {
        self.decimate = decimate;
        self
    }
}

/// What an export produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExportSummary {
    /// Triangles that survived culling
    pub triangles: usize,
    /// Distinct positions after welding
    pub vertices: usize,
    /// Faces in the written mesh
    pub faces: usize,
    /// Decimation outcome, when it ran
    pub decimation: Option<DecimationStats>,
    /// World-space extent of the written mesh, `None` when it is empty
    pub bounds: Option<Aabb>,
}

/// World-space triangles with one flat normal each.
#[derive(Debug, Default)]
struct Soup {
    triangles: Vec<([Vec3; 3], Vec3)>,
}

impl TriangleSink for Soup {
    fn push_triangle(&mut self, site: &BlockSite, mesh: &Mesh, corners: [usize; 3]) {
        let offset = site.location.as_vec3();
        let positions = corners.map(|i| mesh.vertices[i] + offset);
        self.triangles.push((positions, mesh.normals[corners[0]]));
    }
}

/// Cull every tile and weld the result into one indexed mesh.
pub fn build_export_mesh(scene: &Scene, library: &MeshLibrary) -> Result<BasicMesh> {
    let soups = scene
        .tiles()
        .par_iter()
        .map(|tile| {
            let mut soup = Soup::default();
            emit_tile(scene, library, tile.location, &mut soup)?;
            Ok(soup)
        })
        .collect::<Result<Vec<Soup>>>()?;

    let mut basic = BasicMesh::default();
    let mut welded: HashMap<IVec3, u32> = HashMap::new();
    let mut weld = |p: Vec3, vertices: &mut Vec<Vec3>| {
        let key = (p / WELD_QUANTUM).round().as_ivec3();
        *welded.entry(key).or_insert_with(|| {
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    };

    for &(positions, normal) in soups.iter().flat_map(|soup| &soup.triangles) {
        let [a, b, c] = positions.map(|p| weld(p, &mut basic.vertices));
        if a == b || b == c || a == c {
            continue;
        }
        basic.push_face(Polygon::Triangle([a, b, c]), normal);
    }
    Ok(basic)
}

/// Build the export mesh as half-edges, decimating it if asked.
#[tracing::instrument(level = "trace", skip_all)]
pub fn export_mesh(
    scene: &Scene,
    library: &MeshLibrary,
    options: ExportOptions,
) -> Result<(HalfEdgeMesh, ExportSummary)> {
    let basic = build_export_mesh(scene, library)?;
    let mut summary = ExportSummary {
        triangles: basic.faces.len(),
        vertices: basic.vertices.len(),
        ..Default::default()
    };

    let mut mesh = HalfEdgeMesh::from_basic(&basic)?;
    if options.decimate {
        summary.decimation = Some(mesh.decimate()?);
    }
    summary.faces = mesh.face_count();
    summary.bounds = Aabb::from_points(mesh.vertices().map(|(_, v)| v.location));
    Ok((mesh, summary))
}

/// Export the scene as OBJ text.
pub fn write_scene<W: Write>(
    scene: &Scene,
    library: &MeshLibrary,
    options: ExportOptions,
    out: W,
) -> Result<ExportSummary> {
    let (mesh, summary) = export_mesh(scene, library, options)?;
    voxtile_mesh::write_obj(&mesh, out)?;
    Ok(summary)
}

/// Export the scene to an OBJ file.
pub fn export_scene(
    scene: &Scene,
    library: &MeshLibrary,
    options: ExportOptions,
    path: &Path,
) -> Result<ExportSummary> {
    let file = File::create(path)?;
    let summary = write_scene(scene, library, options, BufWriter::new(file))?;
    tracing::info!(
        "exported scene to {}: {} triangles, {} welded vertices, {} faces written",
        path.display(),
        summary.triangles,
        summary.vertices,
        summary.faces
    );
    Ok(summary)
}
