//! Per-frame editor update.

use glam::{IVec3, Vec2, Vec3};
use hashbrown::HashSet;
use voxtile_core::math::{close_enough, snap_to_axis};
use voxtile_core::{BlockType, EditorConfig};
use voxtile_mesh::MeshLibrary;
use voxtile_scene::picking;
use voxtile_scene::{build_tile, export_scene, ExportOptions, PickHit, Result, Scene, TileMesh};

use crate::command::{EditorCommand, EditorEvent, ToolMode};
use crate::queue::{CommandQueue, EventQueue};

/// Threshold above which a normal component names an axis of the stroke plane.
const PLANE_AXIS_EPSILON: f32 = 1.0e-3;
/// Decimal places compared when matching stroke normals.
const NORMAL_DECIMALS: i32 = 5;

/// Receiver of rebuilt tile geometry.
pub trait TileRenderer {
    /// Replace whatever is drawn for the mesh's tile.
    fn upload(&mut self, mesh: TileMesh);
    /// Stop drawing a tile.
    fn remove(&mut self, tile_location: IVec3);
}

/// Editor state: the scene, the active tool, and pending tile rebuilds.
pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    library: MeshLibrary,
    commands: CommandQueue,
    events: EventQueue,

    mode: ToolMode,
    current_block: BlockType,
    current_rotation: u8,
    wireframe: bool,

    modifying: bool,
    rotating: bool,
    initial_location: IVec3,
    initial_normal: Vec3,
    prev_cursor: Vec2,

    dirty: Vec<IVec3>,
    dirty_set: HashSet<IVec3>,
}

impl Editor {
    /// Create an editor over a fresh scene.
    pub fn new(config: EditorConfig, library: MeshLibrary) -> Result<Self> {
        config.validate()?;
        let scene = Scene::new(&config);
        let mut editor = Self {
            config,
            scene,
            library,
            commands: CommandQueue::new(),
            events: EventQueue::new(),
            mode: ToolMode::default(),
            current_block: BlockType::Cube,
            current_rotation: 0,
            wireframe: false,
            modifying: false,
            rotating: false,
            initial_location: IVec3::ZERO,
            initial_normal: Vec3::ZERO,
            prev_cursor: Vec2::ZERO,
            dirty: Vec::new(),
            dirty_set: HashSet::new(),
        };
        let tiles: Vec<IVec3> = editor.scene.tiles().iter().map(|t| t.location).collect();
        for tile in tiles {
            editor.queue_tile(tile);
        }
        Ok(editor)
    }

    /// Create an editor with block models loaded from the configured
    /// directory.
    pub fn load(config: EditorConfig) -> Result<Self> {
        let library = MeshLibrary::load(&config.model_dir);
        Self::new(config, library)
    }

    /// Sender for feeding commands in from input handling.
    pub fn commands(&self) -> crossbeam::channel::Sender<EditorCommand> {
        self.commands.sender()
    }

    /// Receiver for editor notifications.
    pub fn events(&self) -> crossbeam::channel::Receiver<EditorEvent> {
        self.events.receiver()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access. Edits made here are not queued for rebuild;
    /// call [`Editor::mark_block`] for each changed block.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn library(&self) -> &MeshLibrary {
        &self.library
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn current_block(&self) -> BlockType {
        self.current_block
    }

    pub fn current_rotation(&self) -> u8 {
        self.current_rotation
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Block and face under a pixel of the pick buffer.
    pub fn pick(&self, rgb: [u8; 3]) -> Option<PickHit> {
        self.scene.resolve_pick(picking::from_rgb(rgb))
    }

    /// Apply all pending commands, then rebuild the tiles they touched.
    ///
    /// Every queued tile is attempted; the first build failure is returned
    /// after the others have been handed to the renderer.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn update<R: TileRenderer>(&mut self, renderer: &mut R) -> Result<()> {
        for command in self.commands.drain() {
            self.apply(command);
        }
        self.rebuild(renderer)
    }

    fn apply(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::StartModifying { location, normal } => {
                self.initial_location = location;
                self.initial_normal = normal;
                self.modifying = true;
            }
            EditorCommand::StopModifying => self.modifying = false,
            EditorCommand::Modify {
                location,
                normal,
                cursor,
            } => {
                if self.rotating {
                    self.orbit(cursor);
                } else if self.modifying {
                    self.modify_block(location, normal);
                }
            }
            EditorCommand::StartRotating { cursor } => {
                self.rotating = true;
                self.prev_cursor = cursor;
            }
            EditorCommand::StopRotating => self.rotating = false,
            EditorCommand::SetMode(mode) => self.mode = mode,
            EditorCommand::SelectBlock(block_type) => {
                if block_type.is_empty() {
                    tracing::warn!("ignoring selection of the empty block type");
                } else {
                    if self.library.get(block_type, 0).is_none() {
                        tracing::warn!(
                            "no model loaded for {:?}, placed blocks will not render",
                            block_type
                        );
                    }
                    self.current_block = block_type;
                }
            }
            EditorCommand::RotateBlock => {
                self.current_rotation = (self.current_rotation + 1) % 4;
                self.events
                    .send(EditorEvent::RotationChanged(self.current_rotation));
            }
            EditorCommand::ToggleWireframe => {
                self.wireframe = !self.wireframe;
                self.events.send(EditorEvent::WireframeToggled(self.wireframe));
            }
            EditorCommand::Export(path) => {
                let event = match export_scene(&self.scene, &self.library, ExportOptions::default(), &path) {
                    Ok(summary) => EditorEvent::Exported { path, summary },
                    Err(err) => {
                        tracing::warn!("export to {} failed: {}", path.display(), err);
                        EditorEvent::ExportFailed {
                            path,
                            reason: err.to_string(),
                        }
                    }
                };
                self.events.send(event);
            }
        }
    }

    fn orbit(&mut self, cursor: Vec2) {
        let displacement = cursor - self.prev_cursor;
        let sensitivity = self.config.rotate_sensitivity;
        self.scene
            .orbit_camera(-displacement.x / sensitivity, displacement.y / sensitivity);
        self.prev_cursor = cursor;
    }

    /// Whether a hit lies on the face plane the current stroke started on.
    fn on_stroke_plane(&self, location: IVec3, normal: Vec3) -> bool {
        if !close_enough(normal, self.initial_normal, NORMAL_DECIMALS) {
            return false;
        }
        (0..3).all(|axis| {
            self.initial_normal[axis].abs() <= PLANE_AXIS_EPSILON
                || location[axis] == self.initial_location[axis]
        })
    }

    fn modify_block(&mut self, location: IVec3, normal: Vec3) {
        if !self.on_stroke_plane(location, normal) {
            return;
        }
        match self.mode {
            ToolMode::Add => {
                let target = location + snap_to_axis(normal);
                self.scene
                    .add_block(target, self.current_block, self.current_rotation, false);
                tracing::debug!("added {:?} at {}", self.current_block, target);
                self.mark_block(target);
            }
            ToolMode::Remove => {
                if self.scene.remove_block(location) {
                    tracing::debug!("removed block at {}", location);
                    self.mark_block(location);
                }
            }
            ToolMode::Paint => {}
        }
    }

    /// Queue the tile of a changed block, plus neighbouring tiles whose
    /// faces may have been uncovered or hidden by it.
    pub fn mark_block(&mut self, location: IVec3) {
        let dims = self.scene.dims();
        let tile = dims.tile_of(location);
        self.queue_tile(tile);
        for offset in dims.border_neighbours(dims.local_of(location)) {
            let neighbour = tile + offset;
            if self.scene.get_tile(neighbour).is_some() {
                self.queue_tile(neighbour);
            }
        }
    }

    fn queue_tile(&mut self, tile_location: IVec3) {
        if self.dirty_set.insert(tile_location) {
            self.dirty.push(tile_location);
        }
    }

    /// Tiles waiting to be rebuilt, in the order they were touched.
    pub fn pending_tiles(&self) -> &[IVec3] {
        &self.dirty
    }

    fn rebuild<R: TileRenderer>(&mut self, renderer: &mut R) -> Result<()> {
        // Tiles that changed slot carry stale pick colours.
        for tile in self.scene.take_relocated_tiles() {
            self.queue_tile(tile);
        }
        self.dirty_set.clear();
        // A tile that fails to build must not hold back the rest of the queue.
        let mut first_error = None;
        for tile_location in std::mem::take(&mut self.dirty) {
            match build_tile(&self.scene, &self.library, tile_location) {
                Ok(Some(mesh)) if !mesh.is_empty() => renderer.upload(mesh),
                Ok(_) => renderer.remove(tile_location),
                Err(err) => {
                    tracing::warn!("failed to build tile {}: {}", tile_location, err);
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
