/// Scene object types for the editor's spatial layer.
///
/// A SceneObject is what the user places in the level: a static mesh, a
/// light or an editor gizmo. The spatial layer only cares about its world
/// bounds; the kind payload is kept so the editor can tell objects apart
/// without runtime type inspection.

use glam::{Mat4, Quat, Vec3};
use slotmap::new_key_type;
use bitflags::bitflags;
use crate::camera::Ray;
use super::bounding_volume::BoundingVolume;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneObject within a Scene.
    ///
    /// Keys remain valid even after other objects are removed.
    /// A key becomes invalid only when its own object is removed.
    pub struct SceneObjectKey;
}

// ===== CAPABILITIES =====

/// Anything that can report a world-space bounding box.
///
/// This is the only thing the octree asks of the objects it indexes.
pub trait HasWorldBounds {
    fn world_bounds(&self) -> BoundingVolume;
}

impl HasWorldBounds for BoundingVolume {
    fn world_bounds(&self) -> BoundingVolume {
        *self
    }
}

/// Narrow-phase ray test used by picking.
///
/// The default implementation reports the entry distance into the world
/// bounds. Objects with real geometry override it with a per-triangle test.
pub trait RayHitTest: HasWorldBounds {
    /// Distance along `ray` to the first hit, `None` on a miss.
    fn ray_hit_distance(&self, ray: &Ray) -> Option<f32> {
        ray.entry_distance(&self.world_bounds())
    }
}

// ===== FLAGS =====

bitflags! {
    /// Per-object editor flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u32 {
        /// Drawn at all
        const VISIBLE = 1 << 0;
        /// Selectable with the mouse
        const PICKABLE = 1 << 1;
        /// Subject to frustum culling (otherwise always drawn when visible)
        const CULLABLE = 1 << 2;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE | Self::CULLABLE
    }
}

// ===== TRANSFORM =====

/// Location, rotation and scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        location: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    pub fn from_location(location: Vec3) -> Self {
        Self { location, ..Self::IDENTITY }
    }

    /// Local-to-world matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.location)
    }
}

// ===== OBJECT KIND =====

/// What a scene object is.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Mesh placed in the level, identified by its asset name
    StaticMesh { mesh: String },
    /// Point light; its bounds cover its range
    Light { intensity: f32, range: f32 },
    /// Editor helper (translation/rotation/scale handle). Never indexed.
    Gizmo,
}

// ===== SCENE OBJECT =====

/// An object placed in the scene.
///
/// World bounds are cached and recomputed whenever the transform or the
/// local bounds change.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    kind: ObjectKind,
    transform: Transform,
    local_bounds: BoundingVolume,
    world_bounds: BoundingVolume,
    flags: ObjectFlags,
}

impl SceneObject {
    /// Create an object with identity transform and default flags.
    pub fn new(kind: ObjectKind, local_bounds: BoundingVolume) -> Self {
        let flags = match kind {
            ObjectKind::Gizmo => ObjectFlags::VISIBLE | ObjectFlags::PICKABLE,
            _ => ObjectFlags::default(),
        };
        Self {
            kind,
            transform: Transform::IDENTITY,
            local_bounds,
            world_bounds: local_bounds,
            flags,
        }
    }

    /// Static mesh with the given local-space bounds.
    pub fn static_mesh(mesh: impl Into<String>, local_bounds: BoundingVolume) -> Self {
        Self::new(ObjectKind::StaticMesh { mesh: mesh.into() }, local_bounds)
    }

    /// Point light bounded by a cube of half size `range`.
    pub fn light(intensity: f32, range: f32) -> Self {
        let bounds = BoundingVolume::from_center_extent(Vec3::ZERO, Vec3::splat(range));
        Self::new(ObjectKind::Light { intensity, range }, bounds)
    }

    /// Editor gizmo with the given local-space bounds.
    pub fn gizmo(local_bounds: BoundingVolume) -> Self {
        Self::new(ObjectKind::Gizmo, local_bounds)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn local_bounds(&self) -> &BoundingVolume {
        &self.local_bounds
    }

    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    pub fn is_gizmo(&self) -> bool {
        matches!(self.kind, ObjectKind::Gizmo)
    }

    /// Whether the object belongs in the octree.
    pub fn is_indexed(&self) -> bool {
        !self.is_gizmo()
    }

    // ===== MUTATORS =====

    /// Replace the transform and refresh the cached world bounds.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh_world_bounds();
    }

    /// Replace the local bounds and refresh the cached world bounds.
    pub fn set_local_bounds(&mut self, bounds: BoundingVolume) {
        self.local_bounds = bounds;
        self.refresh_world_bounds();
    }

    pub fn set_flags(&mut self, flags: ObjectFlags) {
        self.flags = flags;
    }

    fn refresh_world_bounds(&mut self) {
        self.world_bounds = self.local_bounds.transformed(&self.transform.matrix());
    }
}

impl HasWorldBounds for SceneObject {
    fn world_bounds(&self) -> BoundingVolume {
        self.world_bounds
    }
}

impl RayHitTest for SceneObject {}

// ===== HANDLE =====

/// Non-owning reference to a scene object, as stored in the octree.
///
/// Carries a snapshot of the object's world bounds taken at insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectHandle {
    pub key: SceneObjectKey,
    pub bounds: BoundingVolume,
}

impl ObjectHandle {
    pub fn new(key: SceneObjectKey, bounds: BoundingVolume) -> Self {
        Self { key, bounds }
    }
}

impl HasWorldBounds for ObjectHandle {
    fn world_bounds(&self) -> BoundingVolume {
        self.bounds
    }
}

#[cfg(test)]
#[path = "scene_object_tests.rs"]
mod tests;
