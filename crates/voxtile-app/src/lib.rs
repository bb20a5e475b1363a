//! Interactive editing loop for the voxtile block editor.
//!
//! Input code sends [`EditorCommand`]s over a channel; once per frame
//! [`Editor::update`] applies them to the scene and hands rebuilt tile
//! meshes to a [`TileRenderer`].
//!
//! # Example
//!
//! ```no_run
//! use voxtile_app::{Editor, EditorCommand, TileRenderer};
//! use voxtile_core::EditorConfig;
//!
//! struct Headless;
//!
//! impl TileRenderer for Headless {
//!     fn upload(&mut self, _mesh: voxtile_scene::TileMesh) {}
//!     fn remove(&mut self, _tile: glam::IVec3) {}
//! }
//!
//! fn main() -> voxtile_scene::Result<()> {
//!     let mut editor = Editor::load(EditorConfig::default())?;
//!     editor.commands().send(EditorCommand::RotateBlock).ok();
//!     editor.update(&mut Headless)
//! }
//! ```

mod command;
mod editor;
mod queue;

pub use command::{EditorCommand, EditorEvent, ToolMode};
pub use editor::{Editor, TileRenderer};
pub use queue::{CommandQueue, EventQueue};
