//! Error type for mesh loading, topology building and export.

use std::path::PathBuf;

use thiserror::Error;

use crate::arena::FaceId;

/// Mesh error type.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Reading a model file failed
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a raw model
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A face references a vertex that does not exist
    #[error("face {face} references vertex {index}, but the mesh has {count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        count: usize,
    },

    /// A face has no matching normal
    #[error("face {face} has no normal ({normals} normals for {faces} faces)")]
    MissingNormal {
        face: usize,
        normals: usize,
        faces: usize,
    },

    /// Broken half-edge structure
    #[error("invalid topology: {0}")]
    Topology(String),

    /// A face ring is neither a triangle nor a quad
    #[error("face {face:?} has a ring of {len} edges")]
    DegenerateFace { face: FaceId, len: usize },
}

/// Result type alias for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
