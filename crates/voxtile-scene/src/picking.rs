//! Colour-id picking.
//!
//! Every rendered triangle carries a colour that encodes the tile slot, the
//! block index inside the tile and the face it belongs to. Reading that
//! colour back under the cursor identifies the block and face that was hit.
//!
//! Layout of an id: the low `pick_bits` bits hold `block * 6 + face + 1`,
//! the bits above hold the tile slot. Zero is the background.

use glam::{IVec3, Vec3};

/// Face slot of a normal.
///
/// Matches the decode order `+x, -x, -y, -z, +y, +z`.
pub fn face_id(normal: Vec3) -> u32 {
    if normal.x < 0.0 {
        1
    } else if normal.y < 0.0 {
        2
    } else if normal.z < 0.0 {
        3
    } else if normal.y > 0.0 {
        4
    } else if normal.z > 0.0 {
        5
    } else {
        0
    }
}

const FACE_NORMALS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::NEG_Y,
    IVec3::NEG_Z,
    IVec3::Y,
    IVec3::Z,
];

/// Bits reserved for the block part of an id: `ceil(log2(volume * 6 + 1))`.
pub const fn pick_bits(volume: usize) -> u32 {
    let ids = volume * 6 + 1;
    usize::BITS - (ids - 1).leading_zeros()
}

/// Combined id for a face of a block in a tile slot.
#[inline]
pub fn encode(tile_index: usize, block_index: usize, normal: Vec3, pick_bits: u32) -> u32 {
    let block = (block_index as u32) * 6 + 1 + face_id(normal);
    block | ((tile_index as u32) << pick_bits)
}

/// Id as an RGB colour with components in `0..=1`.
#[inline]
pub fn to_colour(id: u32) -> Vec3 {
    let [_, r, g, b] = id.to_be_bytes();
    Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0
}

/// Id from the RGB bytes read back from a pick buffer.
#[inline]
pub fn from_rgb(rgb: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, rgb[0], rgb[1], rgb[2]])
}

/// A decoded pick id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pick {
    /// Slot of the tile in the scene's tile list
    pub tile_index: usize,
    /// Flattened block index inside the tile
    pub block_index: usize,
    /// Outward normal of the face that was hit
    pub normal: IVec3,
}

/// Decode an id. Returns `None` for the background.
pub fn decode(id: u32, pick_bits: u32) -> Option<Pick> {
    let mask = (1u32 << pick_bits) - 1;
    let block = (id & mask).checked_sub(1)?;
    Some(Pick {
        tile_index: (id >> pick_bits) as usize,
        block_index: (block / 6) as usize,
        normal: FACE_NORMALS[(block % 6) as usize],
    })
}
