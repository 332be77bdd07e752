//! Cameras: a scene node plus projection parameters.
//!
//! A [`Camera`] does not own a node; it refers to one in a [`Scene`] and
//! caches the matrices a renderer needs:
//!
//! - `projection_matrix` and its inverse, rebuilt from a [`Projection`]
//! - `matrix_world_inverse`, the view matrix, copied from the node
//!
//! Camera nodes use [`LookAtMode::Camera`], so they look down their local
//! `-Z` axis.
//!
//! # Example
//!
//! ```rust
//! use xform_math::Vector3;
//! use xform_scene::{Camera, PerspectiveProjection, Scene};
//!
//! let mut scene = Scene::new();
//! let mut camera = Camera::new(&mut scene, PerspectiveProjection::new(50f64.to_radians(), 16.0 / 9.0, 0.1, 100.0));
//! scene.get_mut(camera.node()).unwrap().position = Vector3::new(0.0, 0.0, 10.0);
//! camera.update_world_matrix(&mut scene, true, false)?;
//!
//! let ndc = camera.project(Vector3::ZERO);
//! assert!(ndc.x.abs() < 1e-12 && ndc.y.abs() < 1e-12);
//! # Ok::<(), xform_scene::SceneError>(())
//! ```

use crate::{LookAtMode, NodeId, Object3D, Result, Scene, SceneError};
use tracing::trace;
use xform_math::{Matrix4, Vector3};

/// Source of a projection matrix.
pub trait Projection {
    /// Builds the projection matrix from the current parameters.
    fn projection_matrix(&self) -> Matrix4;

    /// Whether [`Camera::update_projection_matrix`] should rebuild the
    /// matrix. Projections that never change can return `false`.
    fn updates_projection(&self) -> bool {
        true
    }
}

/// Sub-rectangle of a larger view, for tiled or multi-monitor rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOffset {
    /// Whether the offset is applied
    pub enabled: bool,
    /// Full view width
    pub full_width: f64,
    /// Full view height
    pub full_height: f64,
    /// Sub-view left edge
    pub offset_x: f64,
    /// Sub-view top edge
    pub offset_y: f64,
    /// Sub-view width
    pub width: f64,
    /// Sub-view height
    pub height: f64,
}

/// Box projection with zoom and optional view offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    /// Left plane
    pub left: f64,
    /// Right plane
    pub right: f64,
    /// Top plane
    pub top: f64,
    /// Bottom plane
    pub bottom: f64,
    /// Near plane
    pub near: f64,
    /// Far plane
    pub far: f64,
    /// Zoom factor; 2.0 shows half the box
    pub zoom: f64,
    /// Optional sub-view
    pub view: Option<ViewOffset>,
}

impl OrthographicProjection {
    /// Creates an orthographic projection with zoom 1 and no view offset.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Self {
        Self { left, right, top, bottom, near, far, zoom: 1.0, view: None }
    }

    /// Enables a view offset.
    pub fn set_view_offset(
        &mut self,
        full_width: f64,
        full_height: f64,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) {
        self.view = Some(ViewOffset {
            enabled: true,
            full_width,
            full_height,
            offset_x,
            offset_y,
            width,
            height,
        });
    }

    /// Disables the view offset, keeping its values.
    pub fn clear_view_offset(&mut self) {
        if let Some(view) = &mut self.view {
            view.enabled = false;
        }
    }
}

impl Default for OrthographicProjection {
    fn default() -> Self {
        Self::new(-1.0, 1.0, 1.0, -1.0, 0.1, 2000.0)
    }
}

impl Projection for OrthographicProjection {
    fn projection_matrix(&self) -> Matrix4 {
        let dx = (self.right - self.left) / (2.0 * self.zoom);
        let dy = (self.top - self.bottom) / (2.0 * self.zoom);
        let cx = (self.right + self.left) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;

        let mut left = cx - dx;
        let mut right = cx + dx;
        let mut top = cy + dy;
        let mut bottom = cy - dy;

        if let Some(view) = self.view.filter(|v| v.enabled) {
            let scale_w = (self.right - self.left) / view.full_width / self.zoom;
            let scale_h = (self.top - self.bottom) / view.full_height / self.zoom;

            left += scale_w * view.offset_x;
            right = left + scale_w * view.width;
            top -= scale_h * view.offset_y;
            bottom = top - scale_h * view.height;
        }

        Matrix4::make_orthographic(left, right, top, bottom, self.near, self.far)
    }
}

/// Symmetric perspective frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view in radians
    pub fov: f64,
    /// Width over height
    pub aspect: f64,
    /// Near plane
    pub near: f64,
    /// Far plane
    pub far: f64,
}

impl PerspectiveProjection {
    /// Creates a perspective projection.
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self { fov, aspect, near, far }
    }
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self::new(50f64.to_radians(), 1.0, 0.1, 2000.0)
    }
}

impl Projection for PerspectiveProjection {
    fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

/// A camera bound to a scene node.
#[derive(Debug, Clone)]
pub struct Camera<P> {
    node: NodeId,
    /// Projection parameters; call [`Camera::update_projection_matrix`]
    /// after editing them
    pub projection: P,
    projection_matrix: Matrix4,
    projection_matrix_inverse: Matrix4,
    matrix_world_inverse: Matrix4,
}

impl<P: Projection> Camera<P> {
    /// Creates a camera node as a new root of `scene`.
    pub fn new(scene: &mut Scene, projection: P) -> Self {
        let node = scene.add_node(Object3D::named("camera").with_look_at_mode(LookAtMode::Camera));
        Self::bind(node, projection)
    }

    /// Turns an existing node into a camera, switching it to
    /// [`LookAtMode::Camera`].
    pub fn with_node(scene: &mut Scene, node: NodeId, projection: P) -> Result<Self> {
        let obj = scene.get_mut(node).ok_or(SceneError::not_found(node))?;
        obj.look_at_mode = LookAtMode::Camera;
        let mut camera = Self::bind(node, projection);
        camera.sync_world(scene)?;
        Ok(camera)
    }

    fn bind(node: NodeId, projection: P) -> Self {
        let projection_matrix = projection.projection_matrix();
        Self {
            node,
            projection,
            projection_matrix,
            projection_matrix_inverse: projection_matrix.invert(),
            matrix_world_inverse: Matrix4::IDENTITY,
        }
    }

    /// Id of the camera node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current projection matrix.
    #[inline]
    pub fn projection_matrix(&self) -> &Matrix4 {
        &self.projection_matrix
    }

    /// Inverse of the projection matrix.
    #[inline]
    pub fn projection_matrix_inverse(&self) -> &Matrix4 {
        &self.projection_matrix_inverse
    }

    /// View matrix: inverse of the node's world matrix at the last sync.
    #[inline]
    pub fn matrix_world_inverse(&self) -> &Matrix4 {
        &self.matrix_world_inverse
    }

    /// Rebuilds the projection matrix and its inverse from `projection`.
    pub fn update_projection_matrix(&mut self) {
        if !self.projection.updates_projection() {
            return;
        }
        self.projection_matrix = self.projection.projection_matrix();
        self.projection_matrix_inverse = self.projection_matrix.invert();
        trace!("camera {}: projection rebuilt", self.node);
    }

    /// Refreshes the node's world matrix in `scene`, then syncs the view
    /// matrix.
    pub fn update_world_matrix(&mut self, scene: &mut Scene, parents: bool, children: bool) -> Result<()> {
        scene.update_world_matrix(self.node, parents, children)?;
        self.sync_world(scene)
    }

    /// Copies the node's current world matrix and stores its inverse as
    /// the view matrix.
    pub fn sync_world(&mut self, scene: &Scene) -> Result<()> {
        let node = scene.get(self.node).ok_or(SceneError::not_found(self.node))?;
        self.matrix_world_inverse = node.matrix_world.invert();
        Ok(())
    }

    /// World-space view direction (`-Z` of the node).
    pub fn world_direction(&self, scene: &mut Scene) -> Result<Vector3> {
        scene.world_direction(self.node)
    }

    /// Maps a world point to normalized device coordinates.
    pub fn project(&self, v: Vector3) -> Vector3 {
        v.apply_matrix4(&self.matrix_world_inverse).apply_matrix4(&self.projection_matrix)
    }

    /// Maps normalized device coordinates back to a world point.
    ///
    /// Uses the inverse of the view matrix cached at the last sync.
    pub fn unproject(&self, v: Vector3) -> Vector3 {
        v.apply_matrix4(&self.projection_matrix_inverse)
            .apply_matrix4(&self.matrix_world_inverse.invert())
    }
}

impl Camera<OrthographicProjection> {
    /// Sets a view offset and rebuilds the projection.
    pub fn set_view_offset(
        &mut self,
        full_width: f64,
        full_height: f64,
        offset_x: f64,
        offset_y: f64,
        width: f64,
        height: f64,
    ) {
        self.projection.set_view_offset(full_width, full_height, offset_x, offset_y, width, height);
        self.update_projection_matrix();
    }

    /// Disables the view offset and rebuilds the projection.
    pub fn clear_view_offset(&mut self) {
        self.projection.clear_view_offset();
        self.update_projection_matrix();
    }
}
