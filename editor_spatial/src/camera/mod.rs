//! Camera module — camera, frustum, picking ray, and render view.
//!
//! Cameras are tools owned and driven by the caller; the scene never
//! stores them.

mod camera;
mod frustum;
mod ray;
mod render_view;

pub use camera::{Camera, Viewport};
pub use frustum::{
    Frustum, FrustumTest, Plane, DEFAULT_CULL_TOLERANCE,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use ray::Ray;
pub use render_view::RenderView;
