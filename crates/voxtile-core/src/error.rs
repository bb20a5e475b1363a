//! Errors raised while setting up tiles and editor configuration.

use glam::IVec3;
use thiserror::Error;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A tile axis smaller than one block
    #[error("tile dimensions must be positive, got {0}")]
    InvalidTileDims(IVec3),

    /// A config value out of its allowed range
    #[error("invalid {field}: {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
