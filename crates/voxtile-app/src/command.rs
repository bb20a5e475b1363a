//! Commands the editor accepts and the events it reports back.

use std::path::PathBuf;

use glam::{IVec2, IVec3, Vec2, Vec3};
use voxtile_core::BlockType;
use voxtile_scene::ExportSummary;

/// What a modify stroke does to the blocks it passes over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolMode {
    /// Place the selected block against the hit face
    #[default]
    Add,
    /// Clear the hit block
    Remove,
    /// Recolour the hit block; accepted but has no effect on geometry
    Paint,
}

/// Input for the editor, drained once per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    /// Begin a stroke on the block and face under the cursor.
    StartModifying { location: IVec3, normal: Vec3 },
    /// End the current stroke.
    StopModifying,
    /// Cursor moved over a block face, or just moved while orbiting.
    Modify {
        location: IVec3,
        normal: Vec3,
        cursor: Vec2,
    },
    /// Begin orbiting the camera from a cursor position.
    StartRotating { cursor: Vec2 },
    StopRotating,
    SetMode(ToolMode),
    /// Choose the shape placed in add mode.
    SelectBlock(BlockType),
    /// Turn the shape placed in add mode by a quarter.
    RotateBlock,
    ToggleWireframe,
    /// Write the whole scene to an OBJ file.
    Export(PathBuf),
}

/// Notifications for whoever drives the editor's user interface.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// The placement rotation changed.
    RotationChanged(u8),
    WireframeToggled(bool),
    Exported {
        path: PathBuf,
        summary: ExportSummary,
    },
    ExportFailed {
        path: PathBuf,
        reason: String,
    },
}

impl EditorCommand {
    /// Stroke start from a pick result.
    pub fn start_at(location: IVec3, normal: IVec3) -> Self {
        Self::StartModifying {
            location,
            normal: normal.as_vec3(),
        }
    }

    /// Stroke step from a pick result and the cursor in pixels.
    pub fn modify_at(location: IVec3, normal: IVec3, cursor: IVec2) -> Self {
        Self::Modify {
            location,
            normal: normal.as_vec3(),
            cursor: cursor.as_vec2(),
        }
    }
}
