/*!
# Editor Spatial

Spatial culling and picking core of an interactive level editor.

Answers the two questions the editor asks every frame over tens of
thousands of placed objects: which objects the camera can see, and which
single object a mouse ray hits first.

## Architecture

- **BoundingVolume**: world-space AABB with overlap, containment, slab ray test
- **Frustum**: six inward-facing planes, built from camera parameters or
  extracted from a view-projection matrix
- **Octree**: dynamic 8-way partition with frustum culling (sequential or
  fanned out across threads) and broad-phase ray queries
- **Scene**: slotmap-backed object store that keeps the octree up to date
- **CameraCuller / Picker**: per-frame visibility and mouse selection

All public types live under the `editor3d` namespace.
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod camera;
pub mod scene;

// Main editor3d namespace module
pub mod editor3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{OctreeConfig, PlacementPolicy, SceneConfig, MAX_OCTREE_DEPTH};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Camera sub-module: camera, frustum, ray, render view
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module: objects, octree, culling, picking
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
