/// Octree — dynamic spatial index for frustum culling and ray picking.
///
/// Each node covers a fixed axis-aligned bound and is either a leaf (holds
/// objects directly) or internal (exactly 8 children tiling its bound). A leaf
/// turns internal exactly once, when it holds more than `capacity_per_leaf`
/// objects and sits above `max_depth`. There is no incremental removal: the
/// owner discards the tree and rebuilds it.
///
/// Objects are stored by value as small handles (`ObjectHandle` in the scene),
/// never as references into the scene. Each stored object lives in exactly
/// one node:
/// - leaves hold what was inserted into them
/// - internal nodes hold *residual* objects that no child accepted under the
///   configured `PlacementPolicy`
///
/// Residual objects take part in every query.

use rayon::prelude::*;
use glam::Vec3;
use crate::camera::{Frustum, FrustumTest};
use crate::config::{OctreeConfig, PlacementPolicy};
use crate::error::Result;
use crate::engine_err;
use crate::{engine_debug, engine_trace};
use super::bounding_volume::BoundingVolume;
use super::scene_object::HasWorldBounds;

/// A single node in the octree.
#[derive(Debug, Clone)]
pub struct OctreeNode<T> {
    /// Fixed at construction
    bound: BoundingVolume,
    /// Leaf contents, or residual objects of an internal node
    objects: Vec<T>,
    /// All-or-nothing: `None` for a leaf, eight octants otherwise
    children: Option<Box<[OctreeNode<T>; 8]>>,
}

impl<T: HasWorldBounds + Clone> OctreeNode<T> {
    /// Create an empty leaf covering `bound`.
    pub fn new(bound: BoundingVolume) -> Self {
        Self {
            bound,
            objects: Vec::new(),
            children: None,
        }
    }

    // ===== ACCESSORS =====

    pub fn bound(&self) -> &BoundingVolume {
        &self.bound
    }

    /// Objects stored at this node (not its descendants).
    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    /// The eight children of an internal node, indexed by octant.
    pub fn children(&self) -> Option<&[OctreeNode<T>; 8]> {
        self.children.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    // ===== INSERTION =====

    /// Insert an object at this node, which sits at `depth` (root = 0).
    ///
    /// Returns `false` without touching the tree when the node's bound does
    /// not overlap the object's world bounds; the caller decides whether to
    /// try elsewhere or grow the root.
    ///
    /// Internal node: the object descends into the child chosen by
    /// `config.placement`, or stays here as a residual. Leaf: the object is
    /// appended; once the leaf holds more than `capacity_per_leaf` objects
    /// and `depth < max_depth` it subdivides and re-homes its objects with
    /// the same rule.
    pub fn insert(&mut self, object: &T, depth: u32, config: &OctreeConfig) -> bool {
        let bounds = object.world_bounds();
        if !self.bound.overlaps(&bounds) {
            return false;
        }

        self.place(object.clone(), &bounds, depth, config);
        true
    }

    fn place(&mut self, object: T, bounds: &BoundingVolume, depth: u32, config: &OctreeConfig) {
        if let Some(children) = self.children.as_mut() {
            match select_child(children, bounds, config.placement) {
                Some(index) => children[index].place(object, bounds, depth + 1, config),
                None => self.objects.push(object),
            }
            return;
        }

        self.objects.push(object);
        if self.objects.len() > config.capacity_per_leaf && depth < config.max_depth {
            self.subdivide();
            self.redistribute(depth, config);
        }
    }

    /// Re-home the objects held before a split. Objects no child accepts
    /// stay here as residuals.
    fn redistribute(&mut self, depth: u32, config: &OctreeConfig) {
        let held = std::mem::take(&mut self.objects);
        let Some(children) = self.children.as_mut() else {
            self.objects = held;
            return;
        };

        let count = held.len();
        for object in held {
            let bounds = object.world_bounds();
            match select_child(children, &bounds, config.placement) {
                Some(index) => children[index].place(object, &bounds, depth + 1, config),
                None => self.objects.push(object),
            }
        }

        engine_trace!("editor3d::Octree",
            "Subdivided node at depth {} ({} objects, {} residual)",
            depth, count, self.objects.len());
    }

    /// Split a leaf into 8 octant children. No-op on an internal node.
    ///
    /// Child `i` covers `bound.octant(i)`: bit0 = X, bit1 = Y, bit2 = Z,
    /// set = upper half. Objects are not moved; `insert` does that.
    pub fn subdivide(&mut self) {
        if self.children.is_some() {
            return;
        }

        let bound = self.bound;
        self.children = Some(Box::new(std::array::from_fn(|i| OctreeNode::new(bound.octant(i as u8)))));
    }

    // ===== QUERIES =====

    /// Append every object whose bounds pass the frustum test.
    ///
    /// Subtrees outside the frustum are skipped; subtrees fully inside are
    /// collected without per-object tests.
    pub fn frustum_cull(&self, frustum: &Frustum, out: &mut Vec<T>) {
        match frustum.classify(&self.bound) {
            FrustumTest::Outside => {}
            FrustumTest::Inside => self.collect_all(out),
            FrustumTest::Partial => {
                self.cull_objects(frustum, out);
                if let Some(children) = &self.children {
                    for child in children.iter() {
                        child.frustum_cull(frustum, out);
                    }
                }
            }
        }
    }

    /// Same result as `frustum_cull`, with the eight children of this node
    /// culled concurrently.
    ///
    /// Fan-out happens at this level only; each child subtree is traversed
    /// sequentially into a private buffer. Buffers are appended in child
    /// index order after this node's own objects, so the output order is
    /// identical to `frustum_cull`.
    pub fn frustum_cull_threaded(&self, frustum: &Frustum, out: &mut Vec<T>)
    where
        T: Send + Sync,
    {
        match frustum.classify(&self.bound) {
            FrustumTest::Outside => {}
            FrustumTest::Inside => self.collect_all(out),
            FrustumTest::Partial => {
                self.cull_objects(frustum, out);
                if let Some(children) = &self.children {
                    let buffers: Vec<Vec<T>> = children
                        .as_slice()
                        .par_iter()
                        .map(|child| {
                            let mut visible = Vec::new();
                            child.frustum_cull(frustum, &mut visible);
                            visible
                        })
                        .collect();

                    for buffer in buffers {
                        out.extend(buffer);
                    }
                }
            }
        }
    }

    /// Broad-phase ray query: append every object stored in a node whose
    /// bound the ray passes through.
    ///
    /// Nodes lying entirely behind `origin` are pruned. `direction` must not
    /// be all zero (see `BoundingVolume::ray_intersect`).
    pub fn query_by_ray(&self, origin: Vec3, direction: Vec3, out: &mut Vec<T>) {
        let hit = self.bound.ray_intersect(origin, direction);
        if !hit.hit || hit.t_max < 0.0 {
            return;
        }

        out.extend_from_slice(&self.objects);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_by_ray(origin, direction, out);
            }
        }
    }

    /// Number of objects stored at this node and all its descendants.
    pub fn count_all_components(&self) -> usize {
        let below = self.children
            .as_ref()
            .map_or(0, |children| children.iter().map(OctreeNode::count_all_components).sum());
        self.objects.len() + below
    }

    fn cull_objects(&self, frustum: &Frustum, out: &mut Vec<T>) {
        for object in &self.objects {
            if frustum.intersects(&object.world_bounds()) {
                out.push(object.clone());
            }
        }
    }

    /// Collect all objects from this node and its entire subtree (no test).
    fn collect_all(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.objects);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_all(out);
            }
        }
    }

    fn accumulate_stats(&self, depth: u32, stats: &mut OctreeStats) {
        stats.node_count += 1;
        stats.object_count += self.objects.len();
        stats.max_depth = stats.max_depth.max(depth);

        match &self.children {
            None => stats.leaf_count += 1,
            Some(children) => {
                for child in children.iter() {
                    child.accumulate_stats(depth + 1, stats);
                }
            }
        }
    }
}

/// Child an object descends into, `None` to keep it at the parent.
fn select_child<T>(
    children: &[OctreeNode<T>; 8],
    bounds: &BoundingVolume,
    placement: PlacementPolicy,
) -> Option<usize> {
    match placement {
        PlacementPolicy::FirstOverlap => children.iter().position(|c| c.bound.overlaps(bounds)),
        PlacementPolicy::Containment => children.iter().position(|c| c.bound.contains(bounds)),
    }
}

// ===== OCTREE =====

/// Shape of an octree, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Depth of the deepest node (root = 0)
    pub max_depth: u32,
    pub object_count: usize,
}

/// Root node plus the configuration every insertion uses.
#[derive(Debug, Clone)]
pub struct Octree<T> {
    root: OctreeNode<T>,
    config: OctreeConfig,
}

impl<T: HasWorldBounds + Clone> Octree<T> {
    /// Create an empty octree covering `bound`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidBounds` for a degenerate bound, `Error::InvalidConfig`
    /// for a configuration that fails `OctreeConfig::validate`.
    pub fn new(bound: BoundingVolume, config: OctreeConfig) -> Result<Self> {
        config.validate()?;
        if !bound.is_valid() {
            return Err(engine_err!("editor3d::Octree", InvalidBounds,
                "root bound {:?}..{:?} is degenerate", bound.min, bound.max));
        }

        Ok(Self {
            root: OctreeNode::new(bound),
            config,
        })
    }

    /// Build an octree over `objects`. Objects outside `bound` are skipped
    /// and counted in the second tuple field.
    pub fn build<'a, I>(bound: BoundingVolume, config: OctreeConfig, objects: I) -> Result<(Self, usize)>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut octree = Self::new(bound, config)?;
        let mut rejected = 0;
        for object in objects {
            if !octree.insert(object) {
                rejected += 1;
            }
        }

        let stats = octree.stats();
        engine_debug!("editor3d::Octree",
            "Built octree: {} objects, {} nodes, {} leaves, depth {}, {} rejected",
            stats.object_count, stats.node_count, stats.leaf_count, stats.max_depth, rejected);

        Ok((octree, rejected))
    }

    pub fn root(&self) -> &OctreeNode<T> {
        &self.root
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    pub fn bound(&self) -> &BoundingVolume {
        self.root.bound()
    }

    /// Insert at the root. `false` if the object lies outside the root bound.
    pub fn insert(&mut self, object: &T) -> bool {
        self.root.insert(object, 0, &self.config)
    }

    /// Drop every node and object, keeping the root bound.
    pub fn clear(&mut self) {
        self.root = OctreeNode::new(self.root.bound);
    }

    /// Total number of stored objects.
    pub fn len(&self) -> usize {
        self.root.count_all_components()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objects passing the frustum test, in traversal order.
    pub fn frustum_cull(&self, frustum: &Frustum) -> Vec<T> {
        let mut visible = Vec::new();
        self.root.frustum_cull(frustum, &mut visible);
        visible
    }

    /// `frustum_cull` with the root's children culled concurrently.
    pub fn frustum_cull_threaded(&self, frustum: &Frustum) -> Vec<T>
    where
        T: Send + Sync,
    {
        let mut visible = Vec::new();
        self.root.frustum_cull_threaded(frustum, &mut visible);
        visible
    }

    /// Broad-phase ray candidates.
    pub fn query_by_ray(&self, origin: Vec3, direction: Vec3) -> Vec<T> {
        let mut candidates = Vec::new();
        self.root.query_by_ray(origin, direction, &mut candidates);
        candidates
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        self.root.accumulate_stats(0, &mut stats);
        stats
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
