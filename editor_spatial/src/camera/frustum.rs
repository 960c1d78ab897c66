/// Frustum — six clipping planes for visibility culling.
///
/// Each plane stores a unit normal and a distance term `d`:
/// - the normal points inward (toward the visible volume)
/// - a point P is inside the frustum if `dot(normal, P) + d >= 0` for all planes
///
/// Two constructors: `from_camera()` is closed-form from camera parameters
/// (no graphics backend involved), `from_view_projection()` extracts the
/// planes from a combined matrix. Both yield inward normals.
///
/// A Frustum is immutable once built and is `Copy + Send + Sync`; the
/// threaded cull shares one by reference across worker threads.

use glam::{Mat4, Vec3, Vec4};
use crate::scene::BoundingVolume;

/// Result of a 3-way frustum/box classification.
///
/// Used by the octree for hierarchical culling:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all objects without further testing
/// - `Partial` → test individual objects and recurse into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Box is entirely outside the frustum
    Outside,
    /// Box is entirely inside the frustum
    Inside,
    /// Box partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_TOP: usize = 2;
pub const PLANE_BOTTOM: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Distance (world units) a box may sit outside a plane and still be kept.
///
/// Keeps objects from popping in and out when they graze a frustum edge.
pub const DEFAULT_CULL_TOLERANCE: f32 = 0.2;

/// Oriented plane: `dot(normal, p) + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Distance term
    pub d: f32,
}

impl Plane {
    /// Plane from a unit normal and distance term.
    pub const fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane with unit `normal` passing through `point`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { normal, d: -normal.dot(point) }
    }

    /// Plane from raw (A, B, C, D) coefficients, normalized so |(A, B, C)| = 1.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self { normal: normal / len, d: coefficients.w / len }
        } else {
            Self { normal, d: coefficients.w }
        }
    }

    /// Signed distance of `point` (positive on the normal side).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Same plane facing the other way.
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, d: -self.d }
    }

    /// Intersection point of three planes, `None` if two are parallel.
    pub fn intersect_three(p1: &Plane, p2: &Plane, p3: &Plane) -> Option<Vec3> {
        let n2_x_n3 = p2.normal.cross(p3.normal);
        let det = p1.normal.dot(n2_x_n3);
        if det.abs() < 1e-6 {
            return None;
        }

        let point = (n2_x_n3 * -p1.d
            + p3.normal.cross(p1.normal) * -p2.d
            + p1.normal.cross(p2.normal) * -p3.d) / det;
        Some(point)
    }
}

/// Six frustum planes for culling.
///
/// Plane order: left, right, top, bottom, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes, indexed by the PLANE_* constants
    pub planes: [Plane; 6],
    /// Outside-distance allowed before a box is rejected
    tolerance: f32,
}

impl Frustum {
    /// Frustum from planes already in {left, right, top, bottom, near, far} order.
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Self { planes, tolerance: DEFAULT_CULL_TOLERANCE }
    }

    /// Build the frustum of a perspective camera in closed form.
    ///
    /// # Arguments
    ///
    /// * `position` - Camera eye position
    /// * `forward`, `up`, `right` - Camera basis (orthonormal)
    /// * `fov_degrees` - Vertical field of view
    /// * `near_z`, `far_z` - Clip distances along `forward`
    /// * `aspect_ratio` - Width / height
    ///
    /// Side planes pass through the eye; their normals are the normalized cross
    /// products of the basis vectors with the near-to-far edge directions. The
    /// result does not depend on the handedness of the basis: every plane is
    /// oriented so that a point on the view axis between near and far lies on
    /// its positive side.
    #[allow(clippy::too_many_arguments)]
    pub fn from_camera(
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        right: Vec3,
        fov_degrees: f32,
        near_z: f32,
        far_z: f32,
        aspect_ratio: f32,
    ) -> Self {
        let forward = forward.normalize_or_zero();

        let tan_half_fov = (fov_degrees.to_radians() * 0.5).tan();
        let near_height = tan_half_fov * near_z;
        let near_width = near_height * aspect_ratio;
        let far_height = tan_half_fov * far_z;
        let far_width = far_height * aspect_ratio;

        let fwd_delta = forward * (far_z - near_z);
        let width_diff = far_width - near_width;
        let height_diff = far_height - near_height;

        let left_dir = fwd_delta - right * width_diff;
        let right_dir = fwd_delta + right * width_diff;
        let up_dir = fwd_delta + up * height_diff;
        let down_dir = fwd_delta - up * height_diff;

        let near_point = position + forward * near_z;
        let far_point = position + forward * far_z;

        let mut planes = [
            Plane::from_point_normal(position, up.cross(left_dir).normalize_or_zero()),
            Plane::from_point_normal(position, right_dir.cross(up).normalize_or_zero()),
            Plane::from_point_normal(position, right.cross(up_dir).normalize_or_zero()),
            Plane::from_point_normal(position, down_dir.cross(right).normalize_or_zero()),
            Plane::from_point_normal(near_point, forward),
            Plane::from_point_normal(far_point, -forward),
        ];

        let interior = position + forward * ((near_z + far_z) * 0.5);
        for plane in &mut planes {
            if plane.signed_distance(interior) < 0.0 {
                *plane = plane.flipped();
            }
        }

        Self::from_planes(planes)
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections. The near plane is taken as
    /// `row3 + row2`, which is exact for a [-1, 1] depth range and
    /// slightly conservative (extends behind the eye) for [0, 1].
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();
        let row = |i: usize| Vec4::new(m[0][i], m[1][i], m[2][i], m[3][i]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Self::from_planes([
            Plane::from_coefficients(r3 + r0), // Left
            Plane::from_coefficients(r3 - r0), // Right
            Plane::from_coefficients(r3 - r1), // Top
            Plane::from_coefficients(r3 + r1), // Bottom
            Plane::from_coefficients(r3 + r2), // Near
            Plane::from_coefficients(r3 - r2), // Far
        ])
    }

    /// Same planes with a different outside tolerance (0 = exact plane test).
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Outside distance allowed before rejection.
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Plane by PLANE_* index.
    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    /// Test if a point is inside all six planes (no tolerance).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) >= 0.0)
    }

    /// Test if a box intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the box corner
    /// most in the direction of the plane normal. If that corner is farther
    /// outside than the tolerance, the box is fully outside.
    ///
    /// Conservative: may return false positives, never false negatives.
    pub fn intersects(&self, aabb: &BoundingVolume) -> bool {
        for plane in &self.planes {
            let p_vertex = aabb.positive_vertex(plane.normal);
            if plane.signed_distance(p_vertex) < -self.tolerance {
                return false;
            }
        }

        true
    }

    /// Classify a box against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane (beyond tolerance) → `Outside`
    /// - n-vertex outside any plane → at least `Partial`
    /// - all n-vertices inside all planes → `Inside`
    pub fn classify(&self, aabb: &BoundingVolume) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let p_vertex = aabb.positive_vertex(plane.normal);
            if plane.signed_distance(p_vertex) < -self.tolerance {
                return FrustumTest::Outside;
            }

            let n_vertex = aabb.negative_vertex(plane.normal);
            if plane.signed_distance(n_vertex) < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// The 8 frustum corners for debug drawing.
    ///
    /// Order: near bottom-left, near top-left, near bottom-right, near top-right,
    /// then the same four on the far plane. `None` if any plane triple is
    /// degenerate (parallel planes).
    pub fn corners(&self) -> Option<[Vec3; 8]> {
        let p = &self.planes;
        let (l, r, t, b) = (&p[PLANE_LEFT], &p[PLANE_RIGHT], &p[PLANE_TOP], &p[PLANE_BOTTOM]);
        let (n, f) = (&p[PLANE_NEAR], &p[PLANE_FAR]);

        Some([
            Plane::intersect_three(l, b, n)?,
            Plane::intersect_three(l, t, n)?,
            Plane::intersect_three(r, b, n)?,
            Plane::intersect_three(r, t, n)?,
            Plane::intersect_three(l, b, f)?,
            Plane::intersect_three(l, t, f)?,
            Plane::intersect_three(r, b, f)?,
            Plane::intersect_three(r, t, f)?,
        ])
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
