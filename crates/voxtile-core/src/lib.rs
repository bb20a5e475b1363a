//! Core types and coordinate maths for the voxtile editor.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Block shapes and the per-cell block value
//! - Tile/block coordinate mapping (including negative coordinates)
//! - Axis directions and the face naming used by visibility tables
//! - Editor configuration and the common error type

pub mod config;
pub mod coords;
pub mod direction;
pub mod error;
pub mod math;
pub mod types;

pub use config::EditorConfig;
pub use coords::TileDims;
pub use direction::{Direction, Face};
pub use error::{Error, Result};
pub use types::{Block, BlockType};

/// Workspace-wide constants
pub mod constants {
    /// Default tile edge length in blocks
    pub const TILE_SIZE: i32 = 8;
    /// Number of quarter-turn rotations a block can take
    pub const ROTATIONS: u8 = 4;
    /// Number of axis-aligned faces on a block
    pub const FACES: usize = 6;
}
