//! The editable block scene.
//!
//! Tiles live in a dense list so that a tile's slot can be baked into pick
//! colours; a hash index maps tile locations to slots. Removing a tile moves
//! the last tile into the freed slot, and the moved tile is reported through
//! [`Scene::take_relocated_tiles`] so its pick colours can be rebuilt.

use std::path::Path;

use glam::{IVec3, Vec3};
use hashbrown::HashMap;
use voxtile_core::{Block, BlockType, Direction, EditorConfig, TileDims};
use voxtile_entity::{Entity, OrbitCamera, Spatial, World};

use crate::error::Result;
use crate::picking;
use crate::tile::Tile;
use crate::visibility;

/// Block face that was hit by a pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickHit {
    /// World coordinate of the block
    pub location: IVec3,
    /// Outward normal of the face
    pub normal: IVec3,
}

/// Tiles of blocks plus the entities living among them.
pub struct Scene {
    dims: TileDims,
    pick_bits: u32,
    tiles: Vec<Tile>,
    index: HashMap<IVec3, usize>,
    relocated: Vec<IVec3>,
    world: World,
    camera: Entity,
}

impl Scene {
    /// Create a scene with a tile at the origin and an orbit camera aimed at
    /// its centre. The origin tile is filled with cubes when the config asks
    /// for a starting scene.
    pub fn new(config: &EditorConfig) -> Self {
        let dims = config.tile_dims;
        let pick_bits = picking::pick_bits(dims.volume());
        let mut world = World::new();
        let camera = voxtile_entity::spawn_orbit_camera(&mut world, config);

        let origin = if config.fill_start_tile {
            Tile::filled(IVec3::ZERO, dims, Block::new(BlockType::Cube, 0))
        } else {
            Tile::new(IVec3::ZERO, dims)
        };

        let mut scene = Self {
            dims,
            pick_bits,
            tiles: Vec::new(),
            index: HashMap::new(),
            relocated: Vec::new(),
            world,
            camera,
        };
        scene.insert_tile(origin);
        tracing::debug!("scene created, {} pick bits per tile", pick_bits);
        scene
    }

    /// Dimensions of every tile.
    #[inline]
    pub fn dims(&self) -> TileDims {
        self.dims
    }

    /// Bits reserved for the block part of a pick id.
    #[inline]
    pub fn max_pick_bits(&self) -> u32 {
        self.pick_bits
    }

    fn insert_tile(&mut self, tile: Tile) -> usize {
        let slot = self.tiles.len();
        self.index.insert(tile.location, slot);
        self.tiles.push(tile);
        slot
    }

    fn remove_tile(&mut self, location: IVec3) {
        let Some(slot) = self.index.remove(&location) else {
            return;
        };
        self.tiles.swap_remove(slot);
        if let Some(moved) = self.tiles.get(slot) {
            self.index.insert(moved.location, slot);
            self.relocated.push(moved.location);
        }
        tracing::debug!("removed empty tile {}", location);
    }

    /// Place a block, creating its tile if needed. Placing `Empty` removes
    /// whatever was there.
    pub fn add_block(&mut self, location: IVec3, block_type: BlockType, rotation: u8, flipped: bool) {
        if block_type.is_empty() {
            self.remove_block(location);
            return;
        }
        let (tile_location, index) = self.dims.split(location);
        let slot = match self.index.get(&tile_location) {
            Some(&slot) => slot,
            None => self.insert_tile(Tile::new(tile_location, self.dims)),
        };
        let block = Block::new(block_type, rotation).with_flipped(flipped);
        self.tiles[slot].set_block(index, block);
    }

    /// Clear a block. Returns `false` if there was nothing to remove.
    ///
    /// A tile left without any block is dropped.
    pub fn remove_block(&mut self, location: IVec3) -> bool {
        let (tile_location, index) = self.dims.split(location);
        let Some(&slot) = self.index.get(&tile_location) else {
            return false;
        };
        let tile = &mut self.tiles[slot];
        if tile.block(index).is_empty() {
            return false;
        }
        tile.set_block(index, Block::EMPTY);
        if tile.is_empty() {
            self.remove_tile(tile_location);
        }
        true
    }

    /// Block at a world coordinate; empty where no tile exists.
    pub fn get_block(&self, location: IVec3) -> Block {
        let (tile_location, index) = self.dims.split(location);
        self.get_tile(tile_location)
            .map_or(Block::EMPTY, |tile| tile.block(index))
    }

    /// Tile at a tile-grid location.
    pub fn get_tile(&self, tile_location: IVec3) -> Option<&Tile> {
        self.index.get(&tile_location).map(|&slot| &self.tiles[slot])
    }

    /// All tiles, in slot order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Slot of the tile at a tile-grid location.
    pub fn tile_id(&self, tile_location: IVec3) -> Option<usize> {
        self.index.get(&tile_location).copied()
    }

    /// Tile-grid location of the tile in a slot.
    pub fn tile_location(&self, slot: usize) -> Option<IVec3> {
        self.tiles.get(slot).map(|tile| tile.location)
    }

    /// Locations of tiles whose slot changed since the last call.
    pub fn take_relocated_tiles(&mut self) -> Vec<IVec3> {
        std::mem::take(&mut self.relocated)
    }

    /// Code of the neighbour face that looks back at `location` from
    /// `direction`.
    ///
    /// Open (`1`) when `direction` is not a unit axis or the neighbour is
    /// empty.
    pub fn check_visibility(&self, location: IVec3, direction: Vec3) -> i32 {
        let Some(direction) = Direction::from_vector(direction) else {
            return 1;
        };
        let neighbour = self.get_block(location + direction.offset());
        if neighbour.is_empty() {
            return 1;
        }
        visibility::code(
            neighbour.block_type,
            neighbour.rotation(),
            direction.opposite().face(),
        )
    }

    /// Own code of the face of `location` towards `direction`, or `-1` when
    /// the neighbour hides it.
    ///
    /// Slanted directions have no table face and count as open.
    pub fn check_visibility_direction(&self, location: IVec3, direction: Vec3) -> i32 {
        let neighbour = self.check_visibility(location, direction);
        if neighbour == 0 {
            return -1;
        }
        let own = match Direction::from_vector(direction) {
            Some(direction) => {
                let block = self.get_block(location);
                visibility::code(block.block_type, block.rotation(), direction.face())
            }
            None => 1,
        };
        if own + neighbour == 0 {
            -1
        } else {
            own
        }
    }

    /// Axis faces of the block at `location` that can be seen, in the order
    /// `+x, -x, +y, -y, +z, -z`.
    pub fn visible_faces(&self, location: IVec3) -> Vec<Direction> {
        let block = self.get_block(location);
        if block.is_empty() {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                let neighbour = self.check_visibility(location, direction.as_vec3());
                if neighbour == 0 {
                    return false;
                }
                let own = visibility::code(block.block_type, block.rotation(), direction.face());
                if direction.is_vertical() {
                    own + neighbour != 0
                } else {
                    (own + neighbour).abs() != 1 || own == 0
                }
            })
            .collect()
    }

    /// World block and face named by a pick id.
    pub fn resolve_pick(&self, id: u32) -> Option<PickHit> {
        let pick = picking::decode(id, self.pick_bits)?;
        let tile = self.tile_location(pick.tile_index)?;
        if pick.block_index >= self.dims.volume() {
            return None;
        }
        Some(PickHit {
            location: self.dims.world_location(tile, pick.block_index),
            normal: pick.normal,
        })
    }

    /// Entity world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The editor camera entity.
    #[inline]
    pub fn camera(&self) -> Entity {
        self.camera
    }

    /// Current camera location.
    pub fn camera_location(&self) -> Option<Vec3> {
        self.world
            .get::<&Spatial>(self.camera)
            .ok()
            .map(|spatial| spatial.location)
    }

    /// Point the camera orbits around.
    pub fn camera_target(&self) -> Option<Vec3> {
        self.world
            .get::<&OrbitCamera>(self.camera)
            .ok()
            .map(|camera| camera.target)
    }

    /// Swing the camera around its target.
    pub fn orbit_camera(&mut self, yaw: f32, pitch: f32) -> Option<Vec3> {
        match voxtile_entity::orbit(&mut self.world, self.camera, yaw, pitch) {
            Ok(location) => Some(location),
            Err(err) => {
                tracing::warn!("camera orbit failed: {}", err);
                None
            }
        }
    }

    /// Persist the scene.
    ///
    /// Saving has no file format yet; this only records the request.
    pub fn save(&self, path: &Path) -> Result<()> {
        tracing::info!(
            "scene save requested for {} ({} tiles); saving is not supported yet",
            path.display(),
            self.tiles.len()
        );
        Ok(())
    }
}
