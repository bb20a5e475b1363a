//! Entity components for the voxtile editor.
//!
//! Uses hecs as the ECS backend. The scene owns one world holding the
//! orbiting editor camera.

use std::f32::consts::{PI, TAU};

use glam::{Vec3, Vec4};
pub use hecs::{Entity, World};
use voxtile_core::EditorConfig;

/// Largest pitch the orbit camera may reach, either way.
pub const MAX_PITCH: f32 = PI / 2.1;

/// Placement of an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spatial {
    pub location: Vec3,
    /// Rotation about the y axis, in radians
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for Spatial {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Spatial {
    /// Spatial at a location with no rotation.
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }
}

/// Camera circling a fixed target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at and orbits around
    pub target: Vec3,
    /// Viewport as x, y, width, height fractions of the screen
    pub screen_area: Vec4,
}

impl OrbitCamera {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            screen_area: Vec4::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// Rotate `location` around `target` by `yaw` radians about the vertical
/// axis and `pitch` radians towards the pole, keeping the distance.
///
/// Pitch is clamped to `±MAX_PITCH` so the camera never flips over the top.
pub fn swivel(target: Vec3, location: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let direction = location - target;
    let radius = direction.length();
    if radius <= f32::EPSILON {
        return location;
    }

    let elevation = (direction.y / radius).clamp(-1.0, 1.0).asin();
    let theta = (elevation + pitch).clamp(-MAX_PITCH, MAX_PITCH);

    let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
    let mut phi = flat.x.clamp(-1.0, 1.0).acos();
    if flat == Vec3::ZERO {
        phi = 0.0;
    } else if direction.z > 0.0 {
        phi = TAU - phi;
    }
    phi += yaw;

    target
        + Vec3::new(
            phi.cos() * theta.cos(),
            theta.sin(),
            -phi.sin() * theta.cos(),
        ) * radius
}

/// Spawn the editor camera looking at the centre of the origin tile.
pub fn spawn_orbit_camera(world: &mut World, config: &EditorConfig) -> Entity {
    let target = config.camera_target();
    let location = target - Vec3::new(0.0, 0.0, config.camera_distance);
    world.spawn((Spatial::at(location), OrbitCamera::new(target)))
}

/// Orbit a camera entity around its target.
pub fn orbit(
    world: &mut World,
    camera: Entity,
    yaw: f32,
    pitch: f32,
) -> Result<Vec3, hecs::QueryOneError> {
    let (spatial, orbit) = world.query_one_mut::<(&mut Spatial, &OrbitCamera)>(camera)?;
    spatial.location = swivel(orbit.target, spatial.location, yaw, pitch);
    Ok(spatial.location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn swivel_keeps_distance() {
        let target = Vec3::new(3.5, 3.5, 3.5);
        let start = target - Vec3::new(0.0, 0.0, 30.0);
        let moved = swivel(target, start, 0.4, -0.2);
        assert_relative_eq!((moved - target).length(), 30.0, epsilon = 1e-3);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let target = Vec3::ZERO;
        for start in [
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::new(3.0, 1.0, 4.0),
            Vec3::new(-2.0, -1.0, 0.5),
        ] {
            let moved = swivel(target, start, 0.0, 0.0);
            assert_relative_eq!(moved.x, start.x, epsilon = 1e-4);
            assert_relative_eq!(moved.y, start.y, epsilon = 1e-4);
            assert_relative_eq!(moved.z, start.z, epsilon = 1e-4);
        }
    }

    #[test]
    fn quarter_yaw_moves_to_side() {
        let moved = swivel(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), PI / 2.0, 0.0);
        assert_relative_eq!(moved.x, -10.0, epsilon = 1e-3);
        assert_relative_eq!(moved.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let moved = swivel(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 0.0, 10.0);
        let elevation = (moved.y / moved.length()).asin();
        assert_relative_eq!(elevation, MAX_PITCH, epsilon = 1e-4);
    }

    #[test]
    fn camera_spawns_behind_target() {
        let mut world = World::new();
        let camera = spawn_orbit_camera(&mut world, &EditorConfig::default());
        let spatial = *world.get::<&Spatial>(camera).unwrap();
        let orbit_camera = *world.get::<&OrbitCamera>(camera).unwrap();
        assert_eq!(orbit_camera.target, Vec3::splat(3.5));
        assert_eq!(spatial.location, Vec3::new(3.5, 3.5, -26.5));

        let moved = orbit(&mut world, camera, 0.1, 0.1).unwrap();
        assert_eq!(world.get::<&Spatial>(camera).unwrap().location, moved);
    }
}
