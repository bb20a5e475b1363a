//! Mapping between world block coordinates, tile locations and in-tile indices.
//!
//! World block coordinates are plain `IVec3`s. A tile at tile location `t`
//! covers the blocks `t * dims .. (t + 1) * dims`, so the owning tile of a block
//! is found with floor division and the in-tile position with a euclidean
//! remainder. Both round toward negative infinity, which keeps `-1` in tile
//! `-1` rather than tile `0`.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;
use crate::error::{Error, Result};

/// Dimensions of a tile in blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileDims(IVec3);

impl TileDims {
    /// Create tile dimensions. Every axis must be at least one block.
    pub fn new(dims: IVec3) -> Result<Self> {
        if dims.cmplt(IVec3::ONE).any() {
            return Err(Error::InvalidTileDims(dims));
        }
        Ok(Self(dims))
    }

    /// Cubic tile dimensions.
    pub fn cube(size: i32) -> Result<Self> {
        Self::new(IVec3::splat(size))
    }

    /// Get the dimensions as a vector.
    #[inline]
    pub const fn as_ivec3(self) -> IVec3 {
        self.0
    }

    /// Number of blocks in one tile.
    #[inline]
    pub const fn volume(self) -> usize {
        (self.0.x * self.0.y * self.0.z) as usize
    }

    /// Tile location owning a world block coordinate.
    #[inline]
    pub fn tile_of(self, location: IVec3) -> IVec3 {
        location.div_euclid(self.0)
    }

    /// Position of a world block coordinate inside its tile.
    #[inline]
    pub fn local_of(self, location: IVec3) -> IVec3 {
        location.rem_euclid(self.0)
    }

    /// Flattened index of a local position.
    #[inline]
    pub const fn index_of_local(self, local: IVec3) -> usize {
        (local.x + local.y * self.0.x + local.z * self.0.x * self.0.y) as usize
    }

    /// Flattened in-tile index of a world block coordinate.
    #[inline]
    pub fn local_index(self, location: IVec3) -> usize {
        self.index_of_local(self.local_of(location))
    }

    /// Split a world block coordinate into tile location and in-tile index.
    #[inline]
    pub fn split(self, location: IVec3) -> (IVec3, usize) {
        (self.tile_of(location), self.local_index(location))
    }

    /// Local block position for a flattened index.
    #[inline]
    pub const fn block_location(self, index: usize) -> IVec3 {
        let index = index as i32;
        let layer = self.0.x * self.0.y;
        let z = index / layer;
        let y = (index - z * layer) / self.0.x;
        let x = index - z * layer - y * self.0.x;
        IVec3::new(x, y, z)
    }

    /// World block coordinate of an in-tile index.
    #[inline]
    pub fn world_location(self, tile: IVec3, index: usize) -> IVec3 {
        tile * self.0 + self.block_location(index)
    }

    /// Tile offsets of the neighbouring tiles that share a face with the block
    /// at `local`. Empty for blocks away from the tile border.
    pub fn border_neighbours(self, local: IVec3) -> impl Iterator<Item = IVec3> {
        let dims = self.0;
        let mut offsets = [None; 6];
        for axis in 0..3 {
            if local[axis] == 0 {
                let mut offset = IVec3::ZERO;
                offset[axis] = -1;
                offsets[axis * 2] = Some(offset);
            }
            if local[axis] == dims[axis] - 1 {
                let mut offset = IVec3::ZERO;
                offset[axis] = 1;
                offsets[axis * 2 + 1] = Some(offset);
            }
        }
        offsets.into_iter().flatten()
    }
}

impl Default for TileDims {
    fn default() -> Self {
        Self(IVec3::splat(TILE_SIZE))
    }
}

impl TryFrom<IVec3> for TileDims {
    type Error = Error;

    fn try_from(dims: IVec3) -> Result<Self> {
        Self::new(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_index_roundtrip() {
        let dims = TileDims::default();
        for index in 0..dims.volume() {
            let local = dims.block_location(index);
            assert_eq!(dims.index_of_local(local), index);
        }
    }

    #[test]
    fn negative_coordinates_floor() {
        let dims = TileDims::default();
        assert_eq!(dims.tile_of(IVec3::new(-1, -1, -1)), IVec3::splat(-1));
        assert_eq!(dims.local_of(IVec3::new(-1, -8, -9)), IVec3::new(7, 0, 7));
        assert_eq!(dims.tile_of(IVec3::new(-8, -9, 7)), IVec3::new(-1, -2, 0));
    }

    #[test]
    fn world_split_roundtrip() {
        let dims = TileDims::new(IVec3::new(8, 4, 5)).unwrap();
        for &location in &[
            IVec3::new(0, 0, 0),
            IVec3::new(-1, -1, -1),
            IVec3::new(17, -5, 3),
            IVec3::new(-16, 4, -11),
            IVec3::new(123, -77, 9),
        ] {
            let (tile, index) = dims.split(location);
            assert!(index < dims.volume());
            assert_eq!(dims.world_location(tile, index), location);
        }
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(TileDims::new(IVec3::new(8, 0, 8)).is_err());
        assert!(TileDims::cube(-2).is_err());
    }

    #[test]
    fn border_neighbours_of_corner() {
        let dims = TileDims::default();
        let offsets: Vec<_> = dims.border_neighbours(IVec3::new(0, 3, 7)).collect();
        assert_eq!(offsets, vec![IVec3::NEG_X, IVec3::Z]);
        assert_eq!(dims.border_neighbours(IVec3::splat(3)).count(), 0);
    }
}
