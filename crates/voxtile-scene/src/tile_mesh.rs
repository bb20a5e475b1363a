//! Culled triangle geometry for tiles.
//!
//! Block meshes are stored face by face: consecutive vertices that share a
//! normal make up one triangle or quad. Each face is checked against the
//! neighbour it looks at and emitted whole, halved along a diagonal, or
//! dropped.

use glam::{IVec3, Vec3};
use voxtile_core::{BlockType, TileDims};
use voxtile_mesh::{Mesh, MeshLibrary};

use crate::error::{Result, SceneError};
use crate::picking;
use crate::scene::Scene;
use crate::visibility::{NE, NW, SE, SW};

/// Where the block being meshed sits.
#[derive(Clone, Copy, Debug)]
pub struct BlockSite {
    /// World block coordinate
    pub location: IVec3,
    /// Position inside the tile
    pub local: IVec3,
    /// Flattened index inside the tile
    pub index: usize,
}

/// Receiver of the triangles that survive culling.
pub trait TriangleSink {
    /// Accept the triangle made of three vertices of `mesh`.
    fn push_triangle(&mut self, site: &BlockSite, mesh: &Mesh, corners: [usize; 3]);
}

/// Emit the visible faces of one block into `sink`.
pub fn emit_block<S: TriangleSink>(
    scene: &Scene,
    shape: BlockType,
    mesh: &Mesh,
    site: &BlockSite,
    sink: &mut S,
) -> Result<()> {
    let count = mesh.normals.len().min(mesh.vertices.len());
    let mut start = 0;
    for end in 1..=count {
        if end < count && mesh.normals[end] == mesh.normals[start] {
            continue;
        }
        let normal = mesh.normals[end - 1];
        let visibility = scene.check_visibility(site.location, normal);
        match end - start {
            3 => {
                let own = scene.check_visibility_direction(site.location, normal);
                let criteria = if normal.y == 0.0 { 1 } else { 0 };
                if (visibility + own).abs() != criteria && own != -1 {
                    sink.push_triangle(site, mesh, [start, start + 1, start + 2]);
                }
            }
            4 => {
                let [a, b, c, d] = [start, start + 1, start + 2, start + 3];
                match visibility {
                    1 => {
                        sink.push_triangle(site, mesh, [a, b, c]);
                        sink.push_triangle(site, mesh, [a, c, d]);
                    }
                    SE => sink.push_triangle(site, mesh, [a, c, d]),
                    SW => sink.push_triangle(site, mesh, [d, a, b]),
                    NE => sink.push_triangle(site, mesh, [b, c, d]),
                    NW => sink.push_triangle(site, mesh, [a, b, c]),
                    _ => {}
                }
            }
            size => return Err(SceneError::UnsupportedFaceGroup { shape, size }),
        }
        start = end;
    }
    Ok(())
}

/// Emit every visible face of the tile at `tile_location`.
///
/// Blocks whose shape has no mesh in the library are skipped. Returns
/// `false` if there is no such tile.
pub fn emit_tile<S: TriangleSink>(
    scene: &Scene,
    library: &MeshLibrary,
    tile_location: IVec3,
    sink: &mut S,
) -> Result<bool> {
    let Some(tile) = scene.get_tile(tile_location) else {
        return Ok(false);
    };
    let dims = scene.dims();
    for (index, block) in tile.occupied() {
        let Some(mesh) = library.get(block.block_type, block.rotation()) else {
            continue;
        };
        let local = dims.block_location(index);
        let site = BlockSite {
            location: dims.world_location(tile_location, index),
            local,
            index,
        };
        emit_block(scene, block.block_type, mesh, &site, sink)?;
    }
    Ok(true)
}

/// Render buffers for one tile.
///
/// Triangles are not indexed in the usual sense: every triangle gets its own
/// three vertices so it can carry a flat pick colour and texture coordinate.
#[derive(Clone, Debug, Default)]
pub struct TileMesh {
    /// Tile-grid location the buffers were built for.
    pub location: IVec3,
    /// World-space vertex positions
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Pick id of the face, as RGB
    pub pick_colours: Vec<Vec3>,
    /// Triangle centroid in tile space, normalised to `0..1`
    pub uvw: Vec<Vec3>,
    pub indices: Vec<u32>,
    dims: Vec3,
    slot: usize,
    pick_bits: u32,
}

impl TileMesh {
    /// Empty buffers for the tile in `slot`.
    pub fn new(location: IVec3, slot: usize, dims: TileDims, pick_bits: u32) -> Self {
        Self {
            location,
            dims: dims.as_ivec3().as_vec3(),
            slot,
            pick_bits,
            ..Default::default()
        }
    }

    /// Whether no triangle survived culling.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn pick_colour_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pick_colours)
    }

    pub fn uvw_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvw)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl TriangleSink for TileMesh {
    fn push_triangle(&mut self, site: &BlockSite, mesh: &Mesh, corners: [usize; 3]) {
        let offset = site.location.as_vec3();
        let face_normal = mesh.normals[corners[0]];
        let colour = picking::to_colour(picking::encode(
            self.slot,
            site.index,
            face_normal,
            self.pick_bits,
        ));
        let centroid = corners.iter().map(|&i| mesh.vertices[i]).sum::<Vec3>() / 3.0;
        let uvw = (centroid + site.local.as_vec3() + 0.5) / self.dims;

        for i in corners {
            self.indices.push(self.positions.len() as u32);
            self.positions.push(mesh.vertices[i] + offset);
            self.normals.push(mesh.normals[i]);
            self.pick_colours.push(colour);
            self.uvw.push(uvw);
        }
    }
}

/// Build the render buffers of a tile. Returns `None` if the tile does not
/// exist.
#[tracing::instrument(level = "trace", skip_all)]
pub fn build_tile(
    scene: &Scene,
    library: &MeshLibrary,
    tile_location: IVec3,
) -> Result<Option<TileMesh>> {
    let Some(slot) = scene.tile_id(tile_location) else {
        return Ok(None);
    };
    let mut mesh = TileMesh::new(tile_location, slot, scene.dims(), scene.max_pick_bits());
    emit_tile(scene, library, tile_location, &mut mesh)?;
    tracing::debug!(
        "built tile {} with {} triangles",
        tile_location,
        mesh.triangle_count()
    );
    Ok(Some(mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxtile_core::EditorConfig;

    /// Unit cube as six quads, one normal per face.
    fn cube_mesh() -> Mesh {
        let faces = [
            (Vec3::NEG_Y, [[-1, -1, -1], [1, -1, -1], [1, -1, 1], [-1, -1, 1]]),
            (Vec3::Y, [[-1, 1, -1], [-1, 1, 1], [1, 1, 1], [1, 1, -1]]),
            (Vec3::NEG_Z, [[-1, -1, -1], [-1, 1, -1], [1, 1, -1], [1, -1, -1]]),
            (Vec3::Z, [[-1, -1, 1], [1, -1, 1], [1, 1, 1], [-1, 1, 1]]),
            (Vec3::NEG_X, [[-1, -1, -1], [-1, -1, 1], [-1, 1, 1], [-1, 1, -1]]),
            (Vec3::X, [[1, -1, -1], [1, 1, -1], [1, 1, 1], [1, -1, 1]]),
        ];
        let mut mesh = Mesh::default();
        for (normal, corners) in faces {
            for corner in corners {
                mesh.vertices.push(IVec3::from_array(corner).as_vec3() * 0.5);
                mesh.normals.push(normal);
            }
        }
        mesh.indices = (0..mesh.vertices.len() as u32).collect();
        mesh
    }

    fn library() -> MeshLibrary {
        let mut library = MeshLibrary::new();
        library.insert(BlockType::Cube, &cube_mesh());
        library
    }

    #[test]
    fn lone_cube_emits_every_face() {
        let mut scene = Scene::new(&EditorConfig::default());
        scene.add_block(IVec3::new(2, 3, 4), BlockType::Cube, 0, false);
        let mesh = build_tile(&scene, &library(), IVec3::ZERO).unwrap().unwrap();
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.positions.len(), 36);
        assert_eq!(mesh.position_bytes().len(), 36 * 12);
        assert_eq!(mesh.index_bytes().len(), 36 * 4);
        assert!(mesh
            .positions
            .iter()
            .all(|p| (p.x - 2.0).abs() <= 0.5 && (p.y - 3.0).abs() <= 0.5 && (p.z - 4.0).abs() <= 0.5));
    }

    #[test]
    fn touching_faces_are_culled() {
        let mut scene = Scene::new(&EditorConfig::default());
        scene.add_block(IVec3::ZERO, BlockType::Cube, 0, false);
        scene.add_block(IVec3::X, BlockType::Cube, 0, false);
        let mesh = build_tile(&scene, &library(), IVec3::ZERO).unwrap().unwrap();
        assert_eq!(mesh.triangle_count(), 20);
    }

    #[test]
    fn neighbour_in_next_tile_culls_across_border() {
        let mut scene = Scene::new(&EditorConfig::default());
        scene.add_block(IVec3::new(7, 0, 0), BlockType::Cube, 0, false);
        scene.add_block(IVec3::new(8, 0, 0), BlockType::Cube, 0, false);
        let left = build_tile(&scene, &library(), IVec3::ZERO).unwrap().unwrap();
        let right = build_tile(&scene, &library(), IVec3::X).unwrap().unwrap();
        assert_eq!(left.triangle_count(), 10);
        assert_eq!(right.triangle_count(), 10);
    }

    #[test]
    fn pick_colours_decode_to_the_block() {
        let mut scene = Scene::new(&EditorConfig::default());
        let location = IVec3::new(1, 0, 0);
        scene.add_block(location, BlockType::Cube, 0, false);
        let mesh = build_tile(&scene, &library(), IVec3::ZERO).unwrap().unwrap();
        for (colour, normal) in mesh.pick_colours.iter().zip(&mesh.normals) {
            let rgb = (*colour * 255.0).round().as_uvec3();
            let id = picking::from_rgb([rgb.x as u8, rgb.y as u8, rgb.z as u8]);
            let hit = scene.resolve_pick(id).unwrap();
            assert_eq!(hit.location, location);
            assert_eq!(hit.normal.as_vec3(), *normal);
        }
    }

    #[test]
    fn uvw_is_centroid_in_tile_space() {
        let mut scene = Scene::new(&EditorConfig::default());
        scene.add_block(IVec3::ZERO, BlockType::Cube, 0, false);
        let mesh = build_tile(&scene, &library(), IVec3::ZERO).unwrap().unwrap();
        for uvw in &mesh.uvw {
            assert!(uvw.cmpge(Vec3::ZERO).all() && uvw.cmple(Vec3::splat(1.0 / 8.0)).all());
        }
    }

    #[test]
    fn odd_face_group_is_rejected() {
        let mut mesh = cube_mesh();
        mesh.vertices.truncate(5);
        mesh.normals.truncate(5);
        mesh.normals[4] = Vec3::NEG_Y;
        let mut library = MeshLibrary::new();
        library.insert(BlockType::Slope, &mesh);
        let mut scene = Scene::new(&EditorConfig::default());
        scene.add_block(IVec3::ZERO, BlockType::Slope, 0, false);
        let err = build_tile(&scene, &library, IVec3::ZERO).unwrap_err();
        assert!(matches!(
            err,
            SceneError::UnsupportedFaceGroup {
                shape: BlockType::Slope,
                size: 5
            }
        ));
    }

    #[derive(Default)]
    struct Corners(Vec<[usize; 3]>);

    impl TriangleSink for Corners {
        fn push_triangle(&mut self, _site: &BlockSite, _mesh: &Mesh, corners: [usize; 3]) {
            self.0.push(corners);
        }
    }

    #[test]
    fn diagonal_neighbours_pick_one_half_of_a_quad() {
        // Only the +x face of the cube; its neighbour is seen through its right face.
        let mut quad = cube_mesh();
        quad.vertices.drain(..20);
        quad.normals.drain(..20);
        let site = BlockSite {
            location: IVec3::ZERO,
            local: IVec3::ZERO,
            index: 0,
        };
        let cases = [
            (None, vec![[0, 1, 2], [0, 2, 3]]),
            (Some((BlockType::Cube, 0)), vec![]),
            (Some((BlockType::Slope, 0)), vec![[0, 2, 3]]),
            (Some((BlockType::Slope, 2)), vec![[3, 0, 1]]),
            (Some((BlockType::RSlope, 0)), vec![[1, 2, 3]]),
            (Some((BlockType::RSlope, 2)), vec![[0, 1, 2]]),
        ];
        for (neighbour, expected) in cases {
            let mut scene = Scene::new(&EditorConfig::default());
            if let Some((shape, rotation)) = neighbour {
                scene.add_block(IVec3::X, shape, rotation, false);
            }
            let mut sink = Corners::default();
            emit_block(&scene, BlockType::Cube, &quad, &site, &mut sink).unwrap();
            assert_eq!(sink.0, expected, "neighbour {neighbour:?}");
        }
    }

    #[test]
    fn diagonal_codes_seen_through_the_right_face() {
        let mut scene = Scene::new(&EditorConfig::default());
        for (shape, rotation, expected) in [
            (BlockType::Slope, 0, SE),
            (BlockType::Slope, 2, SW),
            (BlockType::RSlope, 0, NE),
            (BlockType::RSlope, 2, NW),
        ] {
            scene.add_block(IVec3::X, shape, rotation, false);
            assert_eq!(scene.check_visibility(IVec3::ZERO, Vec3::X), expected);
        }
    }

    #[test]
    fn missing_tile_builds_nothing() {
        let scene = Scene::new(&EditorConfig::default());
        assert!(build_tile(&scene, &library(), IVec3::ONE).unwrap().is_none());
    }
}
