/// RenderView — result of camera culling.
///
/// Created by a `CameraCuller`. Contains a snapshot of the camera at culling
/// time and the keys of the objects that survived.
///
/// Ephemeral: lives for one frame. No Arc, no Mutex.
/// Shareable: the caller can hand the same RenderView to several passes.

use crate::scene::SceneObjectKey;
use super::camera::Camera;
use super::frustum::Frustum;

/// Result of culling. Ephemeral, lives for one frame.
#[derive(Debug, Clone)]
pub struct RenderView {
    camera: Camera,
    frustum: Frustum,
    visible_objects: Vec<SceneObjectKey>,
}

impl RenderView {
    /// Create a new RenderView (crate-internal: only cullers create these).
    pub(crate) fn new(camera: Camera, frustum: Frustum, visible_objects: Vec<SceneObjectKey>) -> Self {
        Self {
            camera,
            frustum,
            visible_objects,
        }
    }

    /// Camera snapshot at the time of culling.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Frustum the objects were culled against.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Keys of visible objects in the Scene.
    pub fn visible_objects(&self) -> &[SceneObjectKey] {
        &self.visible_objects
    }

    /// Number of visible objects.
    pub fn visible_count(&self) -> usize {
        self.visible_objects.len()
    }

    pub fn is_visible(&self, key: SceneObjectKey) -> bool {
        self.visible_objects.contains(&key)
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
