//! Tiled block scene for the voxtile editor.
//!
//! This crate provides:
//! - Per-shape face visibility tables and neighbour queries
//! - Dense tiles of blocks with lazy creation and removal
//! - Colour-id picking
//! - Culled tile meshes for rendering
//! - Whole-scene export through decimation to OBJ

pub mod error;
pub mod export;
pub mod picking;
pub mod scene;
pub mod tile;
pub mod tile_mesh;
pub mod visibility;

pub use error::{Result, SceneError};
pub use export::{export_scene, ExportOptions, ExportSummary};
pub use scene::{PickHit, Scene};
pub use tile::Tile;
pub use tile_mesh::{build_tile, TileMesh, TriangleSink};
