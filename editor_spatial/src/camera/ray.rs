/// Ray — world-space picking ray.
///
/// Built by `Camera::screen_ray()` from a mouse position, or directly by the
/// caller. Construction rejects zero-length and non-finite directions, so
/// every `Ray` handed to the octree has a usable direction.

use glam::Vec3;
use crate::error::Result;
use crate::engine_err;
use crate::scene::BoundingVolume;

/// A ray defined by an origin and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized.
    ///
    /// # Errors
    ///
    /// `Error::InvalidRay` if the origin is not finite or the direction is
    /// zero-length or not finite.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self> {
        if !origin.is_finite() {
            return Err(engine_err!("editor3d::Ray", InvalidRay,
                "non-finite origin {:?}", origin));
        }
        let unit = direction.try_normalize().ok_or_else(|| engine_err!("editor3d::Ray", InvalidRay,
            "direction {:?} cannot be normalized", direction))?;

        Ok(Self { origin, direction: unit })
    }

    /// Ray from `origin` through `target`.
    pub fn through(origin: Vec3, target: Vec3) -> Result<Self> {
        Self::new(origin, target - origin)
    }

    /// Ray origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point along the ray at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first point inside `bounds`.
    ///
    /// 0 when the origin is inside, `None` when the box is missed or lies
    /// entirely behind the origin. Unlike the broad-phase slab test, an axis
    /// the ray runs parallel to still rejects when the origin is outside
    /// that slab.
    pub fn entry_distance(&self, bounds: &BoundingVolume) -> Option<f32> {
        for axis in 0..3 {
            let outside = self.origin[axis] < bounds.min[axis] || self.origin[axis] > bounds.max[axis];
            if self.direction[axis] == 0.0 && outside {
                return None;
            }
        }

        let hit = bounds.ray_intersect(self.origin, self.direction);
        if !hit.hit || hit.t_max < 0.0 {
            return None;
        }
        Some(hit.t_min.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(ray.direction(), Vec3::Z);
        assert_eq!(ray.at(2.5), Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO).is_err());
        assert!(Ray::through(Vec3::ONE, Vec3::ONE).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X).is_err());
        assert!(Ray::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_entry_distance() {
        let bounds = BoundingVolume::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z).unwrap();
        assert!((ray.entry_distance(&bounds).unwrap() - 9.0).abs() < 1e-5);

        let inside = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(inside.entry_distance(&bounds), Some(0.0));

        let behind = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z).unwrap();
        assert_eq!(behind.entry_distance(&bounds), None);

        let miss = Ray::new(Vec3::new(5.0, 5.0, -10.0), Vec3::Z).unwrap();
        assert_eq!(miss.entry_distance(&bounds), None);
    }

    #[test]
    fn test_entry_distance_parallel_outside_slab() {
        let bounds = BoundingVolume::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Broad phase skips the X slab, the narrow phase does not
        assert!(bounds.ray_intersect(Vec3::new(5.0, 0.0, -10.0), Vec3::Z).hit);
        let ray = Ray::new(Vec3::new(5.0, 0.0, -10.0), Vec3::Z).unwrap();
        assert_eq!(ray.entry_distance(&bounds), None);

        let grazing = Ray::new(Vec3::new(1.0, 0.0, -10.0), Vec3::Z).unwrap();
        assert!(grazing.entry_distance(&bounds).is_some());
    }
}
