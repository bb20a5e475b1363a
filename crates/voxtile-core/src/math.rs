//! Math utilities and helpers.

use std::f32::consts::FRAC_PI_2;

use glam::{IVec3, Mat3, Vec3};

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| Self {
            min: aabb.min.min(p),
            max: aabb.max.max(p),
        }))
    }

    /// Get the size of the AABB
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Compare two vectors after rounding each component to `decimals` places.
pub fn close_enough(a: Vec3, b: Vec3, decimals: i32) -> bool {
    let scale = 10f32.powi(decimals);
    (a * scale).round() == (b * scale).round()
}

/// Round every component to the nearest multiple of `step`.
#[inline]
pub fn round_to_step(v: Vec3, step: f32) -> Vec3 {
    (v / step).round() * step
}

/// Snap a vector to the unit axis it points along most strongly.
///
/// Ties favour x over y over z. The zero vector maps to zero.
pub fn snap_to_axis(v: Vec3) -> IVec3 {
    let abs = v.abs();
    if abs.max_element() == 0.0 {
        return IVec3::ZERO;
    }
    let sign = |c: f32| if c < 0.0 { -1 } else { 1 };
    if abs.x >= abs.y && abs.x >= abs.z {
        IVec3::new(sign(v.x), 0, 0)
    } else if abs.y >= abs.z {
        IVec3::new(0, sign(v.y), 0)
    } else {
        IVec3::new(0, 0, sign(v.z))
    }
}

/// Rotation about +Y by a number of quarter turns.
#[inline]
pub fn y_rotation(quarter_turns: u8) -> Mat3 {
    Mat3::from_rotation_y(FRAC_PI_2 * f32::from(quarter_turns % 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn close_enough_ignores_noise() {
        assert!(close_enough(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.000_001, 0.999_999, 0.0),
            5
        ));
        assert!(!close_enough(Vec3::Y, Vec3::X, 5));
    }

    #[test]
    fn snap_picks_dominant_axis() {
        assert_eq!(snap_to_axis(Vec3::new(0.1, -0.9, 0.2)), IVec3::NEG_Y);
        assert_eq!(snap_to_axis(Vec3::new(0.0, 0.0, 0.3)), IVec3::Z);
        assert_eq!(snap_to_axis(Vec3::ZERO), IVec3::ZERO);
    }

    #[test]
    fn quarter_turn_maps_x_to_neg_z() {
        let rotated = y_rotation(1) * Vec3::X;
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-6);
        let full = y_rotation(4) * Vec3::X;
        assert_relative_eq!(full.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn round_to_tenth() {
        let v = round_to_step(Vec3::new(0.499_999_9, -0.500_000_1, 0.04), 0.1);
        assert_relative_eq!(v.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(v.y, -0.5, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn aabb_from_points() {
        let aabb = Aabb::from_points([Vec3::ONE, -Vec3::ONE, Vec3::ZERO]).unwrap();
        assert_eq!(aabb.size(), Vec3::splat(2.0));
        assert_eq!(aabb.min, -Vec3::ONE);
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
