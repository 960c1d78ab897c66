//! Scene module — placed objects, the octree spatial index, and the
//! culling and picking strategies built on it.

mod bounding_volume;
mod scene_object;
mod octree;
mod scene;
mod culler;
mod picker;

pub use bounding_volume::{BoundingVolume, RayHit};
pub use scene_object::{
    HasWorldBounds, RayHitTest, ObjectFlags, ObjectHandle, ObjectKind,
    SceneObject, SceneObjectKey, Transform,
};
pub use octree::{Octree, OctreeNode, OctreeStats};
pub use scene::Scene;
pub use culler::{CameraCuller, BruteForceCuller, FrustumCuller};
pub use picker::{Picker, PickHit};
