/// Scene — the editor's placed objects and the octree indexing them.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. The octree holds
/// `ObjectHandle`s (key + world-bounds snapshot), never the objects.
///
/// Adding an object inserts it into the octree immediately. Removing or
/// moving an object only marks the scene dirty: the octree has no
/// incremental removal, so it is rebuilt by `commit_changes()` (once per
/// frame, typically). Until then queries see the last committed layout;
/// keys of removed objects are filtered out of every result.

use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::camera::{Frustum, Ray};
use crate::config::SceneConfig;
use crate::error::Result;
use crate::engine_err;
use crate::{engine_debug, engine_info, engine_warn};
use super::bounding_volume::BoundingVolume;
use super::octree::{Octree, OctreeStats};
use super::scene_object::{
    HasWorldBounds, ObjectFlags, ObjectHandle, SceneObject, SceneObjectKey, Transform,
};

/// An editable scene with a spatial index.
pub struct Scene {
    /// Spatial settings, validated at construction
    config: SceneConfig,
    /// Placed objects stored in a slot map for O(1) insert/remove
    objects: SlotMap<SceneObjectKey, SceneObject>,
    /// Spatial index over every non-gizmo object
    octree: Octree<ObjectHandle>,
    /// Objects moved or removed since the last rebuild
    dirty_objects: FxHashSet<SceneObjectKey>,
    /// Indexed objects without `CULLABLE`, drawn whenever visible
    uncullable_objects: FxHashSet<SceneObjectKey>,
}

impl Scene {
    /// Create an empty scene.
    ///
    /// # Errors
    ///
    /// Whatever `SceneConfig::validate` reports.
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let octree = Octree::new(config.world_bounds, config.octree)?;
        engine_info!("editor3d::Scene",
            "Created scene: world bounds {:?}..{:?}, {} objects per leaf, max depth {}",
            config.world_bounds.min, config.world_bounds.max,
            config.octree.capacity_per_leaf, config.octree.max_depth);

        Ok(Self {
            config,
            objects: SlotMap::with_key(),
            octree,
            dirty_objects: FxHashSet::default(),
            uncullable_objects: FxHashSet::default(),
        })
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Get an object by key.
    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Iterate over all objects.
    pub fn objects(&self) -> impl Iterator<Item = (SceneObjectKey, &SceneObject)> + '_ {
        self.objects.iter()
    }

    /// Iterate over all object keys.
    pub fn object_keys(&self) -> impl Iterator<Item = SceneObjectKey> + '_ {
        self.objects.keys()
    }

    pub fn contains(&self, key: SceneObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The spatial index (last committed layout).
    pub fn octree(&self) -> &Octree<ObjectHandle> {
        &self.octree
    }

    pub fn octree_stats(&self) -> OctreeStats {
        self.octree.stats()
    }

    /// Whether moved or removed objects are waiting for `commit_changes`.
    pub fn is_dirty(&self) -> bool {
        !self.dirty_objects.is_empty()
    }

    // ===== MUTATION =====

    /// Add an object and index it.
    ///
    /// An object outside the current root grows the root (see
    /// `rebuild_octree`). Gizmos are stored but never indexed.
    ///
    /// # Errors
    ///
    /// `Error::InvalidBounds` if the object's world bounds are degenerate.
    pub fn add_object(&mut self, object: SceneObject) -> Result<SceneObjectKey> {
        let bounds = object.world_bounds();
        if !bounds.is_valid() {
            return Err(engine_err!("editor3d::Scene", InvalidBounds,
                "cannot add object with bounds {:?}..{:?}", bounds.min, bounds.max));
        }

        let indexed = object.is_indexed();
        let cullable = object.flags().contains(ObjectFlags::CULLABLE);
        let key = self.objects.insert(object);
        if indexed && !cullable {
            self.uncullable_objects.insert(key);
        }

        if indexed && !self.octree.insert(&ObjectHandle::new(key, bounds)) {
            self.rebuild_octree()?;
        }
        Ok(key)
    }

    /// Remove an object. The octree drops it on the next commit.
    ///
    /// # Errors
    ///
    /// `Error::ObjectNotFound` for a stale key.
    pub fn remove_object(&mut self, key: SceneObjectKey) -> Result<SceneObject> {
        let object = self.objects.remove(key).ok_or_else(|| engine_err!("editor3d::Scene", ObjectNotFound,
            "cannot remove {:?}", key))?;

        if object.is_indexed() {
            self.dirty_objects.insert(key);
        }
        self.uncullable_objects.remove(&key);
        Ok(object)
    }

    /// Move an object. The octree picks up the new bounds on the next commit.
    ///
    /// # Errors
    ///
    /// `Error::ObjectNotFound` for a stale key, `Error::InvalidBounds` if the
    /// transform produces degenerate world bounds (the object is unchanged).
    pub fn set_transform(&mut self, key: SceneObjectKey, transform: Transform) -> Result<()> {
        let object = self.objects.get_mut(key).ok_or_else(|| engine_err!("editor3d::Scene", ObjectNotFound,
            "cannot move {:?}", key))?;

        let previous = *object.transform();
        object.set_transform(transform);
        let bounds = object.world_bounds();
        if !bounds.is_valid() {
            object.set_transform(previous);
            return Err(engine_err!("editor3d::Scene", InvalidBounds,
                "transform of {:?} yields bounds {:?}..{:?}", key, bounds.min, bounds.max));
        }

        if object.is_indexed() {
            self.dirty_objects.insert(key);
        }
        Ok(())
    }

    /// Replace an object's flags. Takes effect immediately.
    ///
    /// # Errors
    ///
    /// `Error::ObjectNotFound` for a stale key.
    pub fn set_flags(&mut self, key: SceneObjectKey, flags: ObjectFlags) -> Result<()> {
        let object = self.objects.get_mut(key).ok_or_else(|| engine_err!("editor3d::Scene", ObjectNotFound,
            "cannot set flags of {:?}", key))?;
        object.set_flags(flags);

        if object.is_indexed() && !flags.contains(ObjectFlags::CULLABLE) {
            self.uncullable_objects.insert(key);
        } else {
            self.uncullable_objects.remove(&key);
        }
        Ok(())
    }

    /// Rebuild the octree if any object moved or was removed.
    ///
    /// Returns whether a rebuild happened.
    pub fn commit_changes(&mut self) -> Result<bool> {
        if self.dirty_objects.is_empty() {
            return Ok(false);
        }

        engine_debug!("editor3d::Scene", "Committing {} changed objects", self.dirty_objects.len());
        self.rebuild_octree()?;
        Ok(true)
    }

    /// Discard the octree and rebuild it from every indexed object.
    ///
    /// The root keeps its current bound unless some object lies entirely
    /// outside it; the root then grows to the union with that object's
    /// bounds, padded by `root_growth_padding`. The root never shrinks.
    pub fn rebuild_octree(&mut self) -> Result<()> {
        let handles: Vec<ObjectHandle> = self.objects
            .iter()
            .filter(|(_, object)| object.is_indexed())
            .map(|(key, object)| ObjectHandle::new(key, object.world_bounds()))
            .collect();

        let current = *self.octree.bound();
        let bound = grown_root(current, &handles, self.config.root_growth_padding);
        if bound != current {
            engine_warn!("editor3d::Scene",
                "Objects outside the octree root: growing {:?}..{:?} to {:?}..{:?}",
                current.min, current.max, bound.min, bound.max);
        }

        let (octree, rejected) = Octree::build(bound, self.config.octree, &handles)?;
        if rejected > 0 {
            engine_warn!("editor3d::Scene", "{} objects could not be indexed", rejected);
        }

        self.octree = octree;
        self.dirty_objects.clear();
        Ok(())
    }

    // ===== QUERIES =====

    /// Keys of the visible objects inside `frustum`.
    ///
    /// The scene's `cull_tolerance` replaces the frustum's own. Objects
    /// without `VISIBLE` are dropped; visible objects without `CULLABLE`
    /// are always included, after the culled ones.
    pub fn frustum_cull(&self, frustum: &Frustum, threaded: bool) -> Vec<SceneObjectKey> {
        let frustum = frustum.with_tolerance(self.config.cull_tolerance);
        let handles = if threaded {
            self.octree.frustum_cull_threaded(&frustum)
        } else {
            self.octree.frustum_cull(&frustum)
        };

        let mut visible: Vec<SceneObjectKey> = handles
            .into_iter()
            .filter(|handle| self.objects.get(handle.key).is_some_and(|object| {
                object.flags().contains(ObjectFlags::VISIBLE | ObjectFlags::CULLABLE)
            }))
            .map(|handle| handle.key)
            .collect();

        visible.extend(self.uncullable_objects
            .iter()
            .copied()
            .filter(|key| self.objects.get(*key).is_some_and(|object| {
                object.flags().contains(ObjectFlags::VISIBLE)
            })));

        visible
    }

    /// Broad-phase pick candidates: keys of objects whose octree node the
    /// ray passes through.
    pub fn query_by_ray(&self, ray: &Ray) -> Vec<SceneObjectKey> {
        self.octree
            .query_by_ray(ray.origin(), ray.direction())
            .into_iter()
            .filter(|handle| self.objects.contains_key(handle.key))
            .map(|handle| handle.key)
            .collect()
    }
}

/// Root bound enlarged to reach every handle lying entirely outside it.
fn grown_root(root: BoundingVolume, handles: &[ObjectHandle], padding: f32) -> BoundingVolume {
    handles.iter().fold(root, |bound, handle| {
        if bound.overlaps(&handle.bounds) {
            bound
        } else {
            bound.union(&handle.bounds.expanded(padding))
        }
    })
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
