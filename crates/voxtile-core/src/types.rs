//! Block shapes and the per-cell block value.

use serde::{Deserialize, Serialize};

use crate::constants::ROTATIONS;

/// Shape of a block.
///
/// `Empty` is the zero value and marks a cell without geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    Cube,
    Slope,
    RSlope,
    CornerSlope,
    RCornerSlope,
    InvCorner,
    RInvCorner,
    Diagonal,
    DiagonalCorner,
    RDiagonalCorner,
    #[default]
    Empty,
}

impl BlockType {
    /// Every shape that carries geometry.
    pub const SHAPES: [Self; 10] = [
        Self::Cube,
        Self::Slope,
        Self::RSlope,
        Self::CornerSlope,
        Self::RCornerSlope,
        Self::InvCorner,
        Self::RInvCorner,
        Self::Diagonal,
        Self::DiagonalCorner,
        Self::RDiagonalCorner,
    ];

    /// Returns true for the empty sentinel
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Name of the model file describing this shape, if the shape has one.
    pub const fn model_name(self) -> Option<&'static str> {
        match self {
            Self::Cube => Some("cube"),
            Self::Slope => Some("slope"),
            Self::RSlope => Some("rslope"),
            Self::Diagonal => Some("diagonal"),
            Self::CornerSlope => Some("cornerSlope"),
            Self::RCornerSlope => Some("rcornerSlope"),
            Self::InvCorner => Some("invCorner"),
            Self::RInvCorner => Some("rInvCorner"),
            Self::DiagonalCorner | Self::RDiagonalCorner | Self::Empty => None,
        }
    }
}

/// One voxel cell: shape, quarter-turn rotation about +Y and flip state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Quarter turns about the vertical axis, always below 4
    rotation: u8,
    /// Upside-down variant
    pub flipped: bool,
    /// Shape of the block
    pub block_type: BlockType,
}

impl Block {
    /// Empty cell
    pub const EMPTY: Self = Self {
        rotation: 0,
        flipped: false,
        block_type: BlockType::Empty,
    };

    /// Create a block; the rotation wraps into `0..4`.
    #[inline]
    pub const fn new(block_type: BlockType, rotation: u8) -> Self {
        Self {
            rotation: rotation % ROTATIONS,
            flipped: false,
            block_type,
        }
    }

    /// Same block, flipped upside down or not.
    #[inline]
    #[must_use]
    pub const fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    /// Quarter turns about the vertical axis.
    #[inline]
    pub const fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Returns true if this cell is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.block_type.is_empty()
    }
}
