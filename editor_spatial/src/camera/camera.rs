/// Camera — editor viewport camera.
///
/// Holds the high-level parameters the editor manipulates (position,
/// orientation, vertical FOV, clip distances, aspect ratio) and derives
/// everything the culling and picking code needs from them: basis vectors,
/// view and projection matrices, the frustum, and screen-space picking rays.
///
/// Conventions: right-handed, the camera looks down its local -Z axis with
/// +Y up. The projection maps depth to the [-1, 1] NDC range.
///
/// The scene does NOT store cameras. They are owned and driven by the caller
/// and snapshotted into a `RenderView` when culled.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::error::Result;
use crate::engine_err;
use super::frustum::Frustum;
use super::ray::Ray;

/// Screen rectangle a camera renders into, in pixels.
///
/// `(x, y)` is the top-left corner; screen Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport anchored at the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    /// Width / height (1.0 for an empty viewport).
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }

    /// Map a pixel position to normalized device coordinates (Y up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x - self.x) / self.width * 2.0 - 1.0,
            1.0 - (y - self.y) / self.height * 2.0,
        )
    }
}

/// Perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    rotation: Quat,
    fov_degrees: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, 60.0, 0.1, 1000.0, 16.0 / 9.0)
    }
}

impl Camera {
    /// Create a camera.
    ///
    /// # Arguments
    ///
    /// * `position` - Eye position in world space
    /// * `rotation` - Orientation; identity looks down -Z
    /// * `fov_degrees` - Vertical field of view
    /// * `near`, `far` - Clip distances (0 < near < far)
    /// * `aspect_ratio` - Width / height
    pub fn new(
        position: Vec3,
        rotation: Quat,
        fov_degrees: f32,
        near: f32,
        far: f32,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            fov_degrees,
            near,
            far,
            aspect_ratio,
        }
    }

    /// Orientation looking from `position` toward `target`.
    ///
    /// Falls back to world X as the right axis when `forward` is parallel
    /// to `up`.
    pub fn look_rotation(position: Vec3, target: Vec3, up: Vec3) -> Quat {
        let forward = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(up).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Unit up vector.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Unit right vector.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    // ===== DERIVED =====

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Perspective projection, depth mapped to [-1, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Frustum planes for culling, built in closed form.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_camera(
            self.position,
            self.forward(),
            self.up(),
            self.right(),
            self.fov_degrees,
            self.near,
            self.far,
            self.aspect_ratio,
        )
    }

    /// World-space picking ray through pixel `(x, y)` of `viewport`.
    ///
    /// The ray starts at the eye and passes through the matching point on
    /// the far plane, so hit distances are measured from the camera
    /// position.
    ///
    /// # Errors
    ///
    /// `Error::InvalidRay` for an empty viewport or a camera whose
    /// view-projection matrix cannot be inverted.
    pub fn screen_ray(&self, x: f32, y: f32, viewport: &Viewport) -> Result<Ray> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(engine_err!("editor3d::Camera", InvalidRay,
                "viewport {}x{} has no area", viewport.width, viewport.height));
        }

        let view_projection = self.view_projection_matrix();
        if view_projection.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return Err(engine_err!("editor3d::Camera", InvalidRay,
                "view-projection matrix is singular"));
        }
        let inverse = view_projection.inverse();

        let ndc = viewport.to_ndc(x, y);
        let far_point = inverse.project_point3(ndc.extend(1.0));

        Ray::through(self.position, far_point)
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Orient the camera toward `target`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.rotation = Self::look_rotation(self.position, target, up);
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
    }

    /// Set near and far clip distances.
    pub fn set_clip(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
