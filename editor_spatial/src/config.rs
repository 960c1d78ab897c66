/// Configuration for the octree and the scene that owns it.
///
/// Plain value types with `Default` and builder-style `with_*` setters.
/// `validate()` is called once when a scene or octree is created; the hot
/// paths assume a validated configuration.

use glam::Vec3;
use crate::error::Result;
use crate::engine_err;
use crate::camera::DEFAULT_CULL_TOLERANCE;
use crate::scene::BoundingVolume;

/// Deepest subdivision level accepted by `OctreeConfig::validate`.
pub const MAX_OCTREE_DEPTH: u32 = 32;

/// Where an object goes when it reaches an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Descend into the first child (index 0..7) whose bound overlaps the
    /// object. Straddling objects end up in a single, arbitrary octant.
    FirstOverlap,
    /// Descend only into a child that fully contains the object. Straddling
    /// objects stay in the internal node's residual list.
    #[default]
    Containment,
}

/// Octree subdivision parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// A leaf splits once it holds more than this many objects
    pub capacity_per_leaf: usize,
    /// Nodes at this depth never split (root = depth 0)
    pub max_depth: u32,
    /// Child selection at internal nodes
    pub placement: PlacementPolicy,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            capacity_per_leaf: 8,
            max_depth: 24,
            placement: PlacementPolicy::Containment,
        }
    }
}

impl OctreeConfig {
    pub fn with_capacity_per_leaf(mut self, capacity: usize) -> Self {
        self.capacity_per_leaf = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `capacity_per_leaf` is 0 or `max_depth`
    /// exceeds `MAX_OCTREE_DEPTH`.
    pub fn validate(&self) -> Result<()> {
        if self.capacity_per_leaf == 0 {
            return Err(engine_err!("editor3d::Config", InvalidConfig,
                "capacity_per_leaf must be at least 1"));
        }
        if self.max_depth > MAX_OCTREE_DEPTH {
            return Err(engine_err!("editor3d::Config", InvalidConfig,
                "max_depth {} exceeds the limit of {}", self.max_depth, MAX_OCTREE_DEPTH));
        }
        Ok(())
    }
}

/// Scene-level spatial settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Octree parameters
    pub octree: OctreeConfig,
    /// Initial root bound of the octree
    pub world_bounds: BoundingVolume,
    /// Margin added around the union when the root has to grow
    pub root_growth_padding: f32,
    /// Frustum tolerance applied by `Scene::frustum_cull`
    pub cull_tolerance: f32,
    /// Picks closer than `near_clip * factor` are ignored
    pub pick_min_distance_factor: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            octree: OctreeConfig::default(),
            world_bounds: BoundingVolume::new(Vec3::splat(-1000.0), Vec3::splat(1000.0)),
            root_growth_padding: 1.0,
            cull_tolerance: DEFAULT_CULL_TOLERANCE,
            pick_min_distance_factor: 1.1,
        }
    }
}

impl SceneConfig {
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    pub fn with_world_bounds(mut self, bounds: BoundingVolume) -> Self {
        self.world_bounds = bounds;
        self
    }

    pub fn with_root_growth_padding(mut self, padding: f32) -> Self {
        self.root_growth_padding = padding;
        self
    }

    pub fn with_cull_tolerance(mut self, tolerance: f32) -> Self {
        self.cull_tolerance = tolerance;
        self
    }

    pub fn with_pick_min_distance_factor(mut self, factor: f32) -> Self {
        self.pick_min_distance_factor = factor;
        self
    }

    /// Check the octree parameters, the world bound and the scalar settings.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` for a bad octree config or a negative or
    /// non-finite scalar; `Error::InvalidBounds` for a degenerate world bound.
    pub fn validate(&self) -> Result<()> {
        self.octree.validate()?;

        if !self.world_bounds.is_valid() {
            return Err(engine_err!("editor3d::Config", InvalidBounds,
                "world bounds {:?}..{:?} are degenerate",
                self.world_bounds.min, self.world_bounds.max));
        }

        let scalars = [
            ("root_growth_padding", self.root_growth_padding),
            ("cull_tolerance", self.cull_tolerance),
            ("pick_min_distance_factor", self.pick_min_distance_factor),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(engine_err!("editor3d::Config", InvalidConfig,
                    "{} must be a finite non-negative number, got {}", name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
