//! Scene error type.

use thiserror::Error;
use voxtile_core::BlockType;

/// Errors raised while building or exporting scene geometry.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A block mesh contained a run of same-normal vertices that is neither
    /// a triangle nor a quad.
    #[error("block shape {shape:?} has an unsupported face of {size} vertices")]
    UnsupportedFaceGroup { shape: BlockType, size: usize },

    #[error(transparent)]
    Mesh(#[from] voxtile_mesh::MeshError),

    #[error(transparent)]
    Core(#[from] voxtile_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `SceneError`.
pub type Result<T> = std::result::Result<T, SceneError>;
