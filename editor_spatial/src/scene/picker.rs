/// Picker — mouse selection against the scene.
///
/// Two phases: the octree ray query yields candidates (broad phase), then
/// each candidate's `RayHitTest` gives an exact distance (narrow phase). The
/// nearest hit beyond a minimum distance wins; hits closer than that sit
/// inside the camera's near clip and cannot be what the user clicked.

use crate::camera::{Camera, Ray, Viewport};
use crate::error::Result;
use crate::engine_debug;
use super::scene::Scene;
use super::scene_object::{ObjectFlags, RayHitTest, SceneObjectKey};

/// The object a pick selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub key: SceneObjectKey,
    /// Distance along the ray to the hit
    pub distance: f32,
}

/// Nearest-hit ray picking.
#[derive(Debug, Default)]
pub struct Picker;

impl Picker {
    pub fn new() -> Self {
        Self
    }

    /// Nearest pickable object hit by `ray`.
    ///
    /// Hits at or closer than `near_clip * pick_min_distance_factor` (from
    /// the scene config) are ignored. Ties keep the first candidate.
    pub fn pick(&self, scene: &Scene, ray: &Ray, near_clip: f32) -> Option<PickHit> {
        let min_distance = near_clip * scene.config().pick_min_distance_factor;
        let candidates = scene.query_by_ray(ray);
        let candidate_count = candidates.len();

        let mut best: Option<PickHit> = None;
        for key in candidates {
            let Some(object) = scene.object(key) else { continue };
            if !object.flags().contains(ObjectFlags::PICKABLE) {
                continue;
            }

            let Some(distance) = object.ray_hit_distance(ray) else { continue };
            if distance <= min_distance {
                continue;
            }
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(PickHit { key, distance });
            }
        }

        engine_debug!("editor3d::Picker", "Pick: {} candidates, hit {:?}", candidate_count, best);
        best
    }

    /// Pick through pixel `(x, y)` of `viewport` as seen by `camera`.
    ///
    /// # Errors
    ///
    /// Whatever `Camera::screen_ray` reports.
    pub fn pick_at_screen(
        &self,
        scene: &Scene,
        camera: &Camera,
        x: f32,
        y: f32,
        viewport: &Viewport,
    ) -> Result<Option<PickHit>> {
        let ray = camera.screen_ray(x, y, viewport)?;
        Ok(self.pick(scene, &ray, camera.near()))
    }
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
