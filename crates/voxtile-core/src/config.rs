//! Editor configuration.

use std::path::PathBuf;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::coords::TileDims;
use crate::error::{Error, Result};

/// Settings shared by the scene, the editor loop and the exporter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Size of one tile in blocks.
    pub tile_dims: TileDims,
    /// Directory holding the `.rawmodel` block meshes.
    pub model_dir: PathBuf,
    /// Pixels of cursor travel per radian of camera orbit.
    pub rotate_sensitivity: f32,
    /// Distance from the camera to its target at spawn.
    pub camera_distance: f32,
    /// Fill the origin tile with cubes when the scene is created.
    pub fill_start_tile: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_dims: TileDims::default(),
            model_dir: PathBuf::from("assets/models"),
            rotate_sensitivity: 50.0,
            camera_distance: 30.0,
            fill_start_tile: false,
        }
    }
}

impl EditorConfig {
    /// Create a config loading models from the given directory.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Set the tile dimensions.
    pub fn with_tile_dims(mut self, dims: TileDims) -> Self {
        self.tile_dims = dims;
        self
    }

    /// Set the orbit sensitivity.
    pub fn with_rotate_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotate_sensitivity = sensitivity;
        self
    }

    /// Set the camera spawn distance.
    pub fn with_camera_distance(mut self, distance: f32) -> Self {
        self.camera_distance = distance;
        self
    }

    /// Start with the origin tile filled with cubes.
    pub fn with_start_tile(mut self, fill: bool) -> Self {
        self.fill_start_tile = fill;
        self
    }

    /// Check values a deserialized config could get wrong.
    pub fn validate(&self) -> Result<()> {
        TileDims::new(self.tile_dims.as_ivec3())?;
        for (field, value) in [
            ("rotate sensitivity", self.rotate_sensitivity),
            ("camera distance", self.camera_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig { field, value });
            }
        }
        Ok(())
    }

    /// Point the camera targets on spawn: the centre of the origin tile.
    pub fn camera_target(&self) -> Vec3 {
        (self.tile_dims.as_ivec3() / IVec3::splat(2)).as_vec3() - Vec3::splat(0.5)
    }
}
