//! Per-shape face visibility tables.
//!
//! Every block shape has, for each of its four rotations, one code per face
//! in the order front, right, back, left, bottom, top:
//!
//! - `0`: the face is solid and fully hides whatever touches it
//! - `1`: the face is open, so the neighbour behind it stays visible
//! - `NE`/`SE`/`SW`/`NW`: the face is a half-square triangle; opposite
//!   diagonals (`NE`/`SE`, `SW`/`NW`) sum to zero and cancel each other out

use voxtile_core::constants::FACES;
use voxtile_core::{BlockType, Face};

pub const NE: i32 = 3;
pub const SE: i32 = -3;
pub const SW: i32 = 4;
pub const NW: i32 = -4;

type Table = [[i32; FACES]; 4];

const CUBE: Table = [[0; FACES]; 4];

const SLOPE: Table = [
    [1, SE, 0, SW, 0, 1],
    [SW, 1, SE, 0, 0, 1],
    [0, SW, 1, SE, 0, 1],
    [SE, 0, SW, 1, 0, 1],
];

const RSLOPE: Table = [
    [1, NE, 0, NW, 1, 0],
    [NW, 1, NE, 0, 1, 0],
    [0, NW, 1, NE, 1, 0],
    [NE, 0, NW, 1, 1, 0],
];

const DIAGONAL: Table = [
    [1, 1, 0, 0, SW, NW],
    [0, 1, 1, 0, NW, SW],
    [0, 0, 1, 1, NE, SE],
    [1, 0, 0, 1, SE, NE],
];

const CORNER_SLOPE: Table = [
    [1, 1, SE, SW, SW, 1],
    [SW, 1, 1, SE, NW, 1],
    [SE, SW, 1, 1, NE, 1],
    [1, SE, SW, 1, SE, 1],
];

const RCORNER_SLOPE: Table = [
    [1, 1, NE, NW, 1, NW],
    [NW, 1, 1, NE, 1, SW],
    [NE, NW, 1, 1, 1, SE],
    [1, NE, NW, 1, 1, NE],
];

const INV_CORNER: Table = [
    [SW, SE, 0, 0, 0, NW],
    [0, SW, SE, 0, 0, SW],
    [0, 0, SW, SE, 0, SE],
    [SE, 0, 0, SW, 0, NE],
];

const RINV_CORNER: Table = [
    [NW, NE, 0, 0, SW, 0],
    [0, NW, NE, 0, NW, 0],
    [0, 0, NW, NE, NE, 0],
    [NE, 0, 0, NW, SE, 0],
];

/// Shapes without a table are treated as open on every face.
const OPEN: [i32; FACES] = [1; FACES];

/// All six face codes of a shape at a rotation.
pub const fn face_codes(shape: BlockType, rotation: u8) -> [i32; FACES] {
    let rotation = (rotation % 4) as usize;
    match shape {
        BlockType::Cube => CUBE[rotation],
        BlockType::Slope => SLOPE[rotation],
        BlockType::RSlope => RSLOPE[rotation],
        BlockType::Diagonal => DIAGONAL[rotation],
        BlockType::CornerSlope => CORNER_SLOPE[rotation],
        BlockType::RCornerSlope => RCORNER_SLOPE[rotation],
        BlockType::InvCorner => INV_CORNER[rotation],
        BlockType::RInvCorner => RINV_CORNER[rotation],
        BlockType::DiagonalCorner | BlockType::RDiagonalCorner | BlockType::Empty => OPEN,
    }
}

/// Code of one face of a shape at a rotation.
#[inline]
pub const fn code(shape: BlockType, rotation: u8, face: Face) -> i32 {
    face_codes(shape, rotation)[face.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLED: [BlockType; 8] = [
        BlockType::Cube,
        BlockType::Slope,
        BlockType::RSlope,
        BlockType::Diagonal,
        BlockType::CornerSlope,
        BlockType::RCornerSlope,
        BlockType::InvCorner,
        BlockType::RInvCorner,
    ];

    #[test]
    fn diagonal_codes_cancel_in_pairs() {
        assert_eq!(NE + SE, 0);
        assert_eq!(SW + NW, 0);
    }

    #[test]
    fn cube_is_solid() {
        for rotation in 0..4 {
            assert_eq!(face_codes(BlockType::Cube, rotation), [0; FACES]);
        }
    }

    #[test]
    fn slope_rotation_moves_solid_back() {
        assert_eq!(code(BlockType::Slope, 0, Face::Back), 0);
        assert_eq!(code(BlockType::Slope, 1, Face::Left), 0);
        assert_eq!(code(BlockType::Slope, 2, Face::Front), 0);
        assert_eq!(code(BlockType::Slope, 3, Face::Right), 0);
        assert_eq!(code(BlockType::Slope, 0, Face::Top), 1);
    }

    #[test]
    fn rotation_wraps() {
        for shape in TABLED {
            assert_eq!(face_codes(shape, 5), face_codes(shape, 1));
        }
    }

    #[test]
    fn side_faces_rotate_with_the_block() {
        // A quarter turn shifts the four side faces by one slot.
        for shape in TABLED {
            for rotation in 0..4u8 {
                let here = face_codes(shape, rotation);
                let next = face_codes(shape, rotation + 1);
                for side in 0..4 {
                    let turned = next[(side + 1) % 4];
                    assert_eq!(here[side].abs() > 0, turned.abs() > 0, "{shape:?} r{rotation} f{side}");
                }
            }
        }
    }

    /// Every tabled row, written out with raw code values.
    const FIXTURE: [(BlockType, u8, [i32; FACES]); 28] = [
        (BlockType::Slope, 0, [1, -3, 0, 4, 0, 1]),
        (BlockType::Slope, 1, [4, 1, -3, 0, 0, 1]),
        (BlockType::Slope, 2, [0, 4, 1, -3, 0, 1]),
        (BlockType::Slope, 3, [-3, 0, 4, 1, 0, 1]),
        (BlockType::RSlope, 0, [1, 3, 0, -4, 1, 0]),
        (BlockType::RSlope, 1, [-4, 1, 3, 0, 1, 0]),
        (BlockType::RSlope, 2, [0, -4, 1, 3, 1, 0]),
        (BlockType::RSlope, 3, [3, 0, -4, 1, 1, 0]),
        (BlockType::Diagonal, 0, [1, 1, 0, 0, 4, -4]),
        (BlockType::Diagonal, 1, [0, 1, 1, 0, -4, 4]),
        (BlockType::Diagonal, 2, [0, 0, 1, 1, 3, -3]),
        (BlockType::Diagonal, 3, [1, 0, 0, 1, -3, 3]),
        (BlockType::CornerSlope, 0, [1, 1, -3, 4, 4, 1]),
        (BlockType::CornerSlope, 1, [4, 1, 1, -3, -4, 1]),
        (BlockType::CornerSlope, 2, [-3, 4, 1, 1, 3, 1]),
        (BlockType::CornerSlope, 3, [1, -3, 4, 1, -3, 1]),
        (BlockType::RCornerSlope, 0, [1, 1, 3, -4, 1, -4]),
        (BlockType::RCornerSlope, 1, [-4, 1, 1, 3, 1, 4]),
        (BlockType::RCornerSlope, 2, [3, -4, 1, 1, 1, -3]),
        (BlockType::RCornerSlope, 3, [1, 3, -4, 1, 1, 3]),
        (BlockType::InvCorner, 0, [4, -3, 0, 0, 0, -4]),
        (BlockType::InvCorner, 1, [0, 4, -3, 0, 0, 4]),
        (BlockType::InvCorner, 2, [0, 0, 4, -3, 0, -3]),
        (BlockType::InvCorner, 3, [-3, 0, 0, 4, 0, 3]),
        (BlockType::RInvCorner, 0, [-4, 3, 0, 0, 4, 0]),
        (BlockType::RInvCorner, 1, [0, -4, 3, 0, -4, 0]),
        (BlockType::RInvCorner, 2, [0, 0, -4, 3, 3, 0]),
        (BlockType::RInvCorner, 3, [3, 0, 0, -4, -3, 0]),
    ];

    #[test]
    fn tables_match_fixture() {
        for (shape, rotation, codes) in FIXTURE {
            assert_eq!(face_codes(shape, rotation), codes, "{shape:?} rotation {rotation}");
        }
    }

    #[test]
    fn untabled_shapes_are_open() {
        assert_eq!(face_codes(BlockType::DiagonalCorner, 2), [1; FACES]);
        assert_eq!(face_codes(BlockType::RDiagonalCorner, 0), [1; FACES]);
    }
}
