//! Axis directions and block face naming.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Tolerance used when snapping float vectors onto axes.
const AXIS_EPSILON: f32 = 1.0e-4;

/// One of the six unit axis directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    /// All directions, in the order faces are reported by visibility queries.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Interpret a float vector as an axis direction.
    ///
    /// Returns `None` unless exactly one component is ±1 and the others are 0.
    pub fn from_vector(v: Vec3) -> Option<Self> {
        let abs = v.abs();
        if (abs.x + abs.y + abs.z - 1.0).abs() > AXIS_EPSILON {
            return None;
        }
        let near_one = |c: f32| (c.abs() - 1.0).abs() <= AXIS_EPSILON;
        if near_one(v.x) {
            Some(if v.x > 0.0 { Self::PosX } else { Self::NegX })
        } else if near_one(v.y) {
            Some(if v.y > 0.0 { Self::PosY } else { Self::NegY })
        } else if near_one(v.z) {
            Some(if v.z > 0.0 { Self::PosZ } else { Self::NegZ })
        } else {
            None
        }
    }

    /// Interpret an integer vector as an axis direction.
    pub fn from_ivec3(v: IVec3) -> Option<Self> {
        match v.to_array() {
            [1, 0, 0] => Some(Self::PosX),
            [-1, 0, 0] => Some(Self::NegX),
            [0, 1, 0] => Some(Self::PosY),
            [0, -1, 0] => Some(Self::NegY),
            [0, 0, 1] => Some(Self::PosZ),
            [0, 0, -1] => Some(Self::NegZ),
            _ => None,
        }
    }

    /// Unit offset to the neighbouring block.
    #[inline]
    pub const fn offset(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Unit vector of this direction.
    #[inline]
    pub fn as_vec3(self) -> Vec3 {
        self.offset().as_vec3()
    }

    /// Direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// The block face that looks along this direction.
    #[inline]
    pub const fn face(self) -> Face {
        match self {
            Self::NegZ => Face::Front,
            Self::NegX => Face::Right,
            Self::PosZ => Face::Back,
            Self::PosX => Face::Left,
            Self::NegY => Face::Bottom,
            Self::PosY => Face::Top,
        }
    }

    /// Whether this direction is along the vertical axis.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::PosY | Self::NegY)
    }
}

/// Block face, in the column order of the visibility tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Face {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
    Bottom = 4,
    Top = 5,
}

impl Face {
    /// Column index into a visibility table row.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
