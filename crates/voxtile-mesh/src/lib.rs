//! Block meshes and half-edge topology for the voxtile editor.
//!
//! This crate provides:
//! - Plain `Mesh`/`BasicMesh` containers and the `.rawmodel` parser
//! - An arena-backed half-edge structure built from indexed polygons
//! - Crease-preserving edge-collapse decimation
//! - Flattening back to triangles and Wavefront OBJ output
//! - The per-shape, per-rotation block mesh library

pub mod arena;
pub mod decimate;
pub mod error;
pub mod half_edge;
pub mod library;
pub mod mesh;
pub mod obj;
pub mod raw_model;

pub use arena::{EdgeId, FaceId, VertexId};
pub use decimate::DecimationStats;
pub use error::{MeshError, Result};
pub use half_edge::{Edge, Face, HalfEdgeMesh, Vertex};
pub use library::MeshLibrary;
pub use mesh::{BasicMesh, Mesh, Polygon};
pub use obj::{export_obj, write_obj};
