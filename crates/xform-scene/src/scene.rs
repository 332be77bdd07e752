//! Scene arena owning the node tree.
//!
//! Nodes live in a map keyed by [`NodeId`]; each node stores its parent id
//! and its ordered child ids. The scene is the only thing that edits those
//! links, so parent and child always agree.
//!
//! World matrices are refreshed explicitly with
//! [`Scene::update_world_matrix`] or [`Scene::update_matrix_world`]. Both
//! walk the tree with an explicit stack, parents before children.
//!
//! Tree mutation and world updates need `&mut Scene`; sharing a scene across
//! threads takes external locking.
//!
//! # Example
//!
//! ```rust
//! use xform_math::{Matrix4, Vector3};
//! use xform_scene::{Object3D, Scene};
//!
//! let mut scene = Scene::new();
//! let root = scene.add_node(Object3D::named("root"));
//! let arm = scene.add(Some(root), Object3D::new().with_position(Vector3::new(1.0, 0.0, 0.0)))?;
//! let hand = scene.add(Some(arm), Object3D::new().with_position(Vector3::new(0.0, 1.0, 0.0)))?;
//!
//! scene.update_matrix_world();
//! assert_eq!(scene.get(hand).unwrap().matrix_world, Matrix4::make_translation(1.0, 1.0, 0.0));
//! # Ok::<(), xform_scene::SceneError>(())
//! ```

use crate::{LookAtMode, NodeId, Object3D, Result, SceneError};
use std::collections::HashMap;
use tracing::{debug, trace, warn};
use xform_math::{MathError, Matrix4, Quaternion, Vector3};

/// Owner of a forest of [`Object3D`] nodes.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Object3D>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: NodeId) -> Result<&Object3D> {
        self.nodes.get(&id).ok_or(SceneError::not_found(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Object3D> {
        self.nodes.get_mut(&id).ok_or(SceneError::not_found(id))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Adds a node as a new root and returns its id.
    pub fn add_node(&mut self, mut node: Object3D) -> NodeId {
        let id = node.id();
        node.parent = None;
        node.children.clear();
        self.nodes.insert(id, node);
        self.roots.push(id);
        id
    }

    /// Adds a node under `parent`, or as a root when `parent` is `None`.
    ///
    /// Nothing is inserted if the parent is missing.
    pub fn add(&mut self, parent: Option<NodeId>, node: Object3D) -> Result<NodeId> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let id = self.add_node(node);
        if let Some(parent) = parent {
            self.add_child(parent, id)?;
        }
        Ok(id)
    }

    /// Makes `child` the last child of `parent`, detaching it from its
    /// previous parent. The child's local transform is kept, so its world
    /// transform changes with the new parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_reparent(parent, child)?;
        self.unlink(child);

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        trace!("scene: {child} added under {parent}");
        Ok(())
    }

    /// Like [`Scene::add_child`] but keeps the child's world transform by
    /// folding the change of parent into its local transform.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_reparent(parent, child)?;

        self.update_world_matrix(parent, true, false)?;
        let mut m = self.node(parent)?.matrix_world.invert();

        if let Some(old_parent) = self.node(child)?.parent {
            self.update_world_matrix(old_parent, true, false)?;
            m = m.multiply(&self.node(old_parent)?.matrix_world);
        }

        self.node_mut(child)?.apply_matrix4(&m);
        self.add_child(parent, child)?;
        self.update_world_matrix(child, false, true)
    }

    /// Makes `child` a root. Its local transform is kept. A node that is
    /// already a root keeps its place in the root order.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        if self.node(child)?.parent.is_none() {
            return Ok(());
        }
        self.unlink(child);
        self.roots.push(child);
        Ok(())
    }

    /// Removes a node and its whole subtree. Returns the number of nodes
    /// dropped, 0 if `id` is not in the scene.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if !self.nodes.contains_key(&id) {
            warn!("scene: remove of unknown node {id}");
            return 0;
        }
        self.unlink(id);

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        debug!("scene: removed {removed} node(s) under {id}");
        removed
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }

    fn check_reparent(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child {
            return Err(SceneError::SelfParent { id: child });
        }
        self.node(parent)?;
        self.node(child)?;
        if self.ancestors(parent).contains(&child) {
            return Err(SceneError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Removes `id` from its parent's children or from the roots.
    fn unlink(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(&id).and_then(|n| n.parent.take());
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(p) => p.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Node by id.
    pub fn get(&self, id: NodeId) -> Option<&Object3D> {
        self.nodes.get(&id)
    }

    /// Mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Object3D> {
        self.nodes.get_mut(&id)
    }

    /// Whether `id` is in the scene.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children of `id` in insertion order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    /// `id` and its descendants, depth-first, parents before children.
    pub fn traverse(&self, id: NodeId) -> Vec<NodeId> {
        self.collect_subtree(id, false)
    }

    /// Like [`Scene::traverse`] but skips invisible nodes and everything
    /// below them.
    pub fn traverse_visible(&self, id: NodeId) -> Vec<NodeId> {
        self.collect_subtree(id, true)
    }

    /// Every node, root by root, in traversal order.
    pub fn traverse_all(&self) -> Vec<NodeId> {
        self.roots.iter().flat_map(|&r| self.traverse(r)).collect()
    }

    fn collect_subtree(&self, id: NodeId, visible_only: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            if visible_only && !node.visible {
                continue;
            }
            out.push(current);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// First node with this name in traversal order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.traverse_all()
            .into_iter()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    // ========================================================================
    // World matrices
    // ========================================================================

    /// Refreshes world matrices of every tree, roots first.
    pub fn update_matrix_world(&mut self) {
        let roots = self.roots.clone();
        for root in roots {
            // Roots come from the map, so the id is always present.
            let _ = self.update_world_matrix(root, false, true);
        }
    }

    /// Refreshes the world matrix of `id`.
    ///
    /// With `parents`, every ancestor is refreshed first, from the root
    /// down. With `children`, the whole subtree is refreshed after the
    /// node, depth-first.
    pub fn update_world_matrix(&mut self, id: NodeId, parents: bool, children: bool) -> Result<()> {
        if parents {
            for ancestor in self.ancestors(id).into_iter().rev() {
                self.refresh_node(ancestor)?;
            }
        }

        self.refresh_node(id)?;

        if children {
            let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
            while let Some(current) = stack.pop() {
                self.refresh_node(current)?;
                stack.extend(self.node(current)?.children.iter().rev());
            }
        }
        Ok(())
    }

    /// Recomposes the local matrix if enabled, then sets
    /// `matrix_world = parent.matrix_world * matrix`.
    fn refresh_node(&mut self, id: NodeId) -> Result<()> {
        let parent_world = match self.node(id)?.parent {
            Some(p) => Some(self.node(p)?.matrix_world),
            None => None,
        };

        let node = self.node_mut(id)?;
        if node.matrix_auto_update {
            node.update_matrix();
        }
        if node.matrix_world_auto_update {
            node.matrix_world = match parent_world {
                Some(pw) => pw.multiply(&node.matrix),
                None => node.matrix,
            };
        }
        trace!("scene: refreshed world matrix of {id}");
        Ok(())
    }

    // ========================================================================
    // Coordinates
    // ========================================================================

    /// Transforms a local point of `id` to world space using the current
    /// world matrix.
    pub fn local_to_world(&self, id: NodeId, v: Vector3) -> Result<Vector3> {
        Ok(self.node(id)?.local_to_world(v))
    }

    /// Transforms a world point into the local space of `id` using the
    /// current world matrix.
    pub fn world_to_local(&self, id: NodeId, v: Vector3) -> Result<Vector3> {
        Ok(self.node(id)?.world_to_local(v))
    }

    /// World matrix of `id` after bringing it and its ancestors current.
    fn fresh_world(&mut self, id: NodeId) -> Result<Matrix4> {
        self.update_world_matrix(id, true, false)?;
        Ok(self.node(id)?.matrix_world)
    }

    /// World-space position.
    pub fn world_position(&mut self, id: NodeId) -> Result<Vector3> {
        Ok(self.fresh_world(id)?.position())
    }

    /// World-space rotation.
    pub fn world_quaternion(&mut self, id: NodeId) -> Result<Quaternion> {
        Ok(self.fresh_world(id)?.decompose().1)
    }

    /// World-space scale.
    pub fn world_scale(&mut self, id: NodeId) -> Result<Vector3> {
        Ok(self.fresh_world(id)?.decompose().2)
    }

    /// Unit world-space direction the node faces: `+Z`, or `-Z` for
    /// [`LookAtMode::Camera`] nodes.
    pub fn world_direction(&mut self, id: NodeId) -> Result<Vector3> {
        let world = self.fresh_world(id)?;
        let z = Vector3::from_matrix_column(&world, 2).normalize();
        Ok(match self.node(id)?.look_at_mode {
            LookAtMode::Object => z,
            LookAtMode::Camera => -z,
        })
    }

    /// Rotates `id` to face a world-space `target`.
    ///
    /// The node's `up` vector and [`LookAtMode`] pick the facing
    /// convention. Parent rotation is compensated, so the result holds in
    /// world space.
    pub fn look_at(&mut self, id: NodeId, target: Vector3) -> Result<()> {
        let world = self.fresh_world(id)?;
        let position = world.position();
        let node = self.node(id)?;

        if position == target {
            debug!("scene: look_at target coincides with {id}");
        }

        let look = match node.look_at_mode {
            LookAtMode::Camera => Matrix4::IDENTITY.look_at(position, target, node.up),
            LookAtMode::Object => Matrix4::IDENTITY.look_at(target, position, node.up),
        };
        let mut q = Quaternion::from_rotation_matrix(&look);

        if let Some(parent) = node.parent {
            let parent_rotation = self.node(parent)?.matrix_world.extract_rotation();
            q = q.premultiply(Quaternion::from_rotation_matrix(&parent_rotation).invert());
        }

        self.node_mut(id)?.set_quaternion(q);
        Ok(())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Writes every world matrix, in [`Scene::traverse_all`] order, as 16
    /// column-major floats starting at `offset`. Returns the node count.
    ///
    /// World matrices are written as they are; call
    /// [`Scene::update_matrix_world`] first.
    pub fn pack_world_matrices(&self, out: &mut [f64], offset: usize) -> Result<usize> {
        let order = self.traverse_all();
        let needed = order.len() * Matrix4::LEN;
        if offset.checked_add(needed).filter(|end| *end <= out.len()).is_none() {
            return Err(MathError::array_too_short(needed, offset, out.len()).into());
        }
        for (i, id) in order.iter().enumerate() {
            self.node(*id)?.matrix_world.write_to_slice(out, offset + i * Matrix4::LEN)?;
        }
        Ok(order.len())
    }
}
