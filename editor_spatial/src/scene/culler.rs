/// Camera culling strategies.
///
/// A CameraCuller determines which scene objects are visible from a given
/// camera. Implementations range from brute-force (return all) to the
/// octree query, sequential or fanned out across threads.

use crate::camera::{Camera, RenderView};
use super::scene::Scene;
use super::scene_object::{ObjectFlags, SceneObjectKey};

/// Strategy for determining visible objects from a camera.
///
/// Called once per frame before drawing. The returned RenderView is
/// ephemeral.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait CameraCuller: Send + Sync {
    /// Cull the scene against the camera and return the visible objects.
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView;
}

/// Brute-force culler: returns every visible indexed object, no frustum test.
///
/// Baseline for comparison and fallback for tiny scenes.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView {
        let visible: Vec<SceneObjectKey> = scene.objects()
            .filter(|(_, object)| object.is_indexed() && object.flags().contains(ObjectFlags::VISIBLE))
            .map(|(key, _)| key)
            .collect();
        RenderView::new(camera.clone(), camera.frustum(), visible)
    }
}

/// Frustum culler: queries the scene octree with the camera frustum.
#[derive(Debug, Default)]
pub struct FrustumCuller {
    threaded: bool,
}

impl FrustumCuller {
    /// Sequential octree traversal.
    pub fn new() -> Self {
        Self { threaded: false }
    }

    /// Root children culled concurrently.
    pub fn threaded() -> Self {
        Self { threaded: true }
    }

    pub fn is_threaded(&self) -> bool {
        self.threaded
    }
}

impl CameraCuller for FrustumCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView {
        let frustum = camera.frustum();
        let visible = scene.frustum_cull(&frustum, self.threaded);
        RenderView::new(camera.clone(), frustum, visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
