/// BoundingVolume — world-space axis-aligned bounding box.
///
/// The only geometric capability the octree needs from a scene object.
/// Invariant: componentwise `min <= max`. The core never builds a
/// degenerate box itself; callers normalize (`from_corners`) or check
/// (`is_valid`) before handing a box to the octree.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box defined by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

/// Result of a ray/box slab test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Whether the ray's supporting line crosses the box
    pub hit: bool,
    /// Entry parameter along the ray
    pub t_min: f32,
    /// Exit parameter along the ray
    pub t_max: f32,
}

impl BoundingVolume {
    /// Box from min and max corners, taken as given.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box spanning two arbitrary corners (normalized so min <= max).
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Box from a center point and half extents.
    pub fn from_center_extent(center: Vec3, extent: Vec3) -> Self {
        let extent = extent.abs();
        Self { min: center - extent, max: center + extent }
    }

    /// Smallest box containing every point (None for an empty slice).
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self { min: *first, max: *first };
        for p in rest {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    /// Finite corners with `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// `(min + max) / 2`
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half size: `(max - min) / 2`
    pub fn extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size: `max - min`
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Test if this box fully contains another box (touching faces count).
    pub fn contains(&self, other: &BoundingVolume) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Test if a point lies inside or on the surface of the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// Test if two boxes intersect on all three axes (touching counts).
    ///
    /// This is the acceptance test of `OctreeNode::insert`.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        self.min.x <= other.max.x && other.min.x <= self.max.x
        && self.min.y <= other.max.y && other.min.y <= self.max.y
        && self.min.z <= other.max.z && other.min.z <= self.max.z
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingVolume) -> BoundingVolume {
        BoundingVolume { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Box grown by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> BoundingVolume {
        BoundingVolume { min: self.min - Vec3::splat(amount), max: self.max + Vec3::splat(amount) }
    }

    /// Corner farthest along `normal`.
    ///
    /// Per axis: `max` if `normal[axis] >= 0`, else `min`.
    pub fn positive_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.max.x } else { self.min.x },
            if normal.y >= 0.0 { self.max.y } else { self.min.y },
            if normal.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }

    /// Corner farthest against `normal` (mirror of `positive_vertex`).
    pub fn negative_vertex(&self, normal: Vec3) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { self.min.x } else { self.max.x },
            if normal.y >= 0.0 { self.min.y } else { self.max.y },
            if normal.z >= 0.0 { self.min.z } else { self.max.z },
        )
    }

    /// The 8 corners; bit0 = X, bit1 = Y, bit2 = Z (0 = min, 1 = max).
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| Vec3::new(
            if i & 1 == 0 { self.min.x } else { self.max.x },
            if i & 2 == 0 { self.min.y } else { self.max.y },
            if i & 4 == 0 { self.min.z } else { self.max.z },
        ))
    }

    /// Compute the bound of octant `index` (0–7).
    ///
    /// Each of the 3 low bits picks `+half` (set) or `-half` (clear) around
    /// the center on one axis: bit0 = X, bit1 = Y, bit2 = Z. The 8 octants
    /// tile the parent exactly.
    pub fn octant(&self, index: u8) -> BoundingVolume {
        let center = self.center();
        let half = self.extent() * 0.5;
        let offset = Vec3::new(
            if index & 1 != 0 { half.x } else { -half.x },
            if index & 2 != 0 { half.y } else { -half.y },
            if index & 4 != 0 { half.z } else { -half.z },
        );
        let child_center = center + offset;
        BoundingVolume { min: child_center - half, max: child_center + half }
    }

    /// Slab test of the line `origin + t * direction` against the box.
    ///
    /// Axes whose direction component is zero are skipped: the ray is
    /// parallel to that pair of planes and is not culled by it. An all-zero
    /// direction therefore always "hits" with an unbounded interval; callers
    /// reject such rays before querying.
    pub fn ray_intersect(&self, origin: Vec3, direction: Vec3) -> RayHit {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let d = direction[axis];
            if d == 0.0 {
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (self.min[axis] - origin[axis]) * inv;
            let mut t1 = (self.max[axis] - origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);

            if t_max < t_min {
                return RayHit { hit: false, t_min, t_max };
            }
        }

        RayHit { hit: true, t_min, t_max }
    }

    /// Transform this box by a matrix, returning the enclosing world box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingVolume {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        BoundingVolume { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "bounding_volume_tests.rs"]
mod tests;
