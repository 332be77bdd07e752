//! Transformable scene node.
//!
//! [`Object3D`] holds a local transform as position, rotation and scale,
//! the matrices derived from it, and the flags that drive world matrix
//! propagation. Rotation is stored twice, as an [`Euler`] and a
//! [`Quaternion`], and the two are kept equal by a [`Binding`]: change
//! either through its setter and the other follows.
//!
//! Everything here is node-local. Operations that need the parent chain
//! (world matrices, `look_at`, coordinate conversion) live on
//! [`crate::Scene`], which owns the nodes.
//!
//! # Example
//!
//! ```rust
//! use xform_math::{Euler, RotationOrder, Vector3};
//! use xform_scene::Object3D;
//!
//! let mut node = Object3D::new().with_position(Vector3::new(1.0, 0.0, 0.0));
//! node.set_rotation(Euler::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0, RotationOrder::XYZ));
//!
//! let q = node.quaternion();
//! assert!((q.x - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
//! ```

use crate::Binding;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;
use xform_math::{Euler, Matrix3, Matrix4, Quaternion, Vector3};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique node identifier.
///
/// Ids come from a monotonic counter and are never reused, so a stale id
/// held after [`crate::Scene::remove`] can't alias a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw id value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which way a node faces after [`crate::Scene::look_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookAtMode {
    /// `+Z` points at the target.
    #[default]
    Object,
    /// `-Z` points at the target.
    Camera,
}

fn euler_to_quaternion(e: &Euler, _: &Quaternion) -> Quaternion {
    Quaternion::from_euler(*e)
}

fn quaternion_to_euler(q: &Quaternion, old: &Euler) -> Euler {
    Euler::from_quaternion(*q, old.order)
}

/// A node with a local transform.
///
/// Not `Clone`: a copy would share the id. Use [`Object3D::duplicate`].
#[derive(Debug)]
pub struct Object3D {
    id: NodeId,
    uuid: Uuid,
    /// Free-form name, not required to be unique
    pub name: String,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    /// Up direction used by `look_at`
    pub up: Vector3,
    /// Local translation
    pub position: Vector3,
    rotation: Binding<Euler, Quaternion>,
    /// Local scale
    pub scale: Vector3,

    /// Local transform, composed from position, rotation and scale
    pub matrix: Matrix4,
    /// Local-to-world transform
    pub matrix_world: Matrix4,
    /// `view * matrix_world`, see [`Object3D::update_model_view`]
    pub model_view_matrix: Matrix4,
    /// Normal matrix of `model_view_matrix`
    pub normal_matrix: Matrix3,

    /// Recompose `matrix` on every world update
    pub matrix_auto_update: bool,
    /// Recompute `matrix_world` on every world update
    pub matrix_world_auto_update: bool,
    /// Set by [`Object3D::update_matrix`]; never read by this crate
    pub matrix_world_needs_update: bool,
    /// Visibility flag for renderers and [`crate::Scene::traverse_visible`]
    pub visible: bool,
    /// Facing convention for `look_at`
    pub look_at_mode: LookAtMode,
}

impl Object3D {
    /// Default up direction, `+Y`.
    pub const DEFAULT_UP: Vector3 = Vector3::Y;

    /// Creates a node at the origin with identity rotation and unit scale.
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            uuid: Uuid::new_v4(),
            name: String::new(),
            parent: None,
            children: Vec::new(),
            up: Self::DEFAULT_UP,
            position: Vector3::ZERO,
            rotation: Binding::new(Euler::default(), euler_to_quaternion, quaternion_to_euler),
            scale: Vector3::ONE,
            matrix: Matrix4::IDENTITY,
            matrix_world: Matrix4::IDENTITY,
            model_view_matrix: Matrix4::IDENTITY,
            normal_matrix: Matrix3::IDENTITY,
            matrix_auto_update: true,
            matrix_world_auto_update: true,
            matrix_world_needs_update: false,
            visible: true,
            look_at_mode: LookAtMode::Object,
        }
    }

    /// Creates a named node.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    /// Copies transform, matrices and flags into a new node with a fresh
    /// id and UUID. Tree links are not copied.
    pub fn duplicate(&self) -> Self {
        Self {
            id: NodeId::next(),
            uuid: Uuid::new_v4(),
            name: self.name.clone(),
            parent: None,
            children: Vec::new(),
            up: self.up,
            position: self.position,
            rotation: self.rotation.clone(),
            scale: self.scale,
            matrix: self.matrix,
            matrix_world: self.matrix_world,
            model_view_matrix: self.model_view_matrix,
            normal_matrix: self.normal_matrix,
            matrix_auto_update: self.matrix_auto_update,
            matrix_world_auto_update: self.matrix_world_auto_update,
            matrix_world_needs_update: self.matrix_world_needs_update,
            visible: self.visible,
            look_at_mode: self.look_at_mode,
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the position.
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation from Euler angles.
    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Sets the rotation from a quaternion.
    pub fn with_quaternion(mut self, quaternion: Quaternion) -> Self {
        self.set_quaternion(quaternion);
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the facing convention.
    pub fn with_look_at_mode(mut self, mode: LookAtMode) -> Self {
        self.look_at_mode = mode;
        self
    }

    // ========================================================================
    // Identity and tree links
    // ========================================================================

    /// Node id, also its key in the owning [`crate::Scene`].
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Random v4 UUID.
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Parent id, `None` for roots and unattached nodes.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// Rotation as Euler angles.
    #[inline]
    pub fn rotation(&self) -> Euler {
        *self.rotation.a()
    }

    /// Rotation as a quaternion.
    #[inline]
    pub fn quaternion(&self) -> Quaternion {
        *self.rotation.b()
    }

    /// Sets the Euler rotation; the quaternion follows.
    ///
    /// Returns `false` if the value was already current.
    pub fn set_rotation(&mut self, rotation: Euler) -> bool {
        self.rotation.set_a(rotation)
    }

    /// Sets the quaternion; the Euler rotation follows, keeping its order.
    ///
    /// Returns `false` if the value was already current.
    pub fn set_quaternion(&mut self, quaternion: Quaternion) -> bool {
        self.rotation.set_b(quaternion)
    }

    /// Edits the Euler rotation in place, e.g. `node.update_rotation(|r| r.x = 1.0)`.
    pub fn update_rotation(&mut self, f: impl FnOnce(&mut Euler)) -> bool {
        self.rotation.update_a(f)
    }

    /// Edits the quaternion in place.
    pub fn update_quaternion(&mut self, f: impl FnOnce(&mut Quaternion)) -> bool {
        self.rotation.update_b(f)
    }

    /// Sets the rotation to `angle` radians around a unit `axis`.
    pub fn set_rotation_from_axis_angle(&mut self, axis: Vector3, angle: f64) {
        self.set_quaternion(Quaternion::from_axis_angle(axis, angle));
    }

    /// Sets the rotation from Euler angles.
    pub fn set_rotation_from_euler(&mut self, euler: Euler) {
        self.set_quaternion(Quaternion::from_euler(euler));
    }

    /// Sets the rotation from the upper 3x3 of a pure rotation matrix.
    pub fn set_rotation_from_matrix(&mut self, m: &Matrix4) {
        self.set_quaternion(Quaternion::from_rotation_matrix(m));
    }

    /// Sets the rotation from a unit quaternion.
    pub fn set_rotation_from_quaternion(&mut self, q: Quaternion) {
        self.set_quaternion(q);
    }

    /// Rotates around a unit axis in local space.
    pub fn rotate_on_axis(&mut self, axis: Vector3, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(axis, angle);
        self.set_quaternion(self.quaternion().multiply(q));
        self
    }

    /// Rotates around a unit axis in world space.
    ///
    /// Assumes the parent has no rotation.
    pub fn rotate_on_world_axis(&mut self, axis: Vector3, angle: f64) -> &mut Self {
        let q = Quaternion::from_axis_angle(axis, angle);
        self.set_quaternion(self.quaternion().premultiply(q));
        self
    }

    /// Rotates around local X.
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        self.rotate_on_axis(Vector3::X, angle)
    }

    /// Rotates around local Y.
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        self.rotate_on_axis(Vector3::Y, angle)
    }

    /// Rotates around local Z.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        self.rotate_on_axis(Vector3::Z, angle)
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// Moves `distance` along a unit axis given in local space.
    pub fn translate_on_axis(&mut self, axis: Vector3, distance: f64) -> &mut Self {
        let offset = axis.apply_quaternion(self.quaternion()) * distance;
        self.position += offset;
        self
    }

    /// Moves along local X.
    pub fn translate_x(&mut self, distance: f64) -> &mut Self {
        self.translate_on_axis(Vector3::X, distance)
    }

    /// Moves along local Y.
    pub fn translate_y(&mut self, distance: f64) -> &mut Self {
        self.translate_on_axis(Vector3::Y, distance)
    }

    /// Moves along local Z.
    pub fn translate_z(&mut self, distance: f64) -> &mut Self {
        self.translate_on_axis(Vector3::Z, distance)
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// Recomposes `matrix` from position, rotation and scale and raises
    /// `matrix_world_needs_update`.
    pub fn update_matrix(&mut self) {
        self.matrix = Matrix4::compose(self.position, self.quaternion(), self.scale);
        self.matrix_world_needs_update = true;
    }

    /// Applies `m` on top of the local transform and absorbs the result
    /// back into position, rotation and scale.
    pub fn apply_matrix4(&mut self, m: &Matrix4) {
        if self.matrix_auto_update {
            self.update_matrix();
        }
        self.matrix = self.matrix.premultiply(m);

        let (position, quaternion, scale) = self.matrix.decompose();
        self.position = position;
        self.set_quaternion(quaternion);
        self.scale = scale;
    }

    /// Applies a rotation on top of the current one.
    pub fn apply_quaternion(&mut self, q: Quaternion) {
        self.set_quaternion(self.quaternion().premultiply(q));
    }

    /// Stores `view * matrix_world` and its normal matrix.
    ///
    /// `matrix_world` must be current.
    pub fn update_model_view(&mut self, view: &Matrix4) {
        self.model_view_matrix = view.multiply(&self.matrix_world);
        self.normal_matrix = Matrix3::normal_matrix(&self.model_view_matrix);
    }

    /// Transforms a point by `matrix_world`. The world matrix is not refreshed.
    #[inline]
    pub fn local_to_world(&self, v: Vector3) -> Vector3 {
        v.apply_matrix4(&self.matrix_world)
    }

    /// Transforms a point by the inverse of `matrix_world`.
    #[inline]
    pub fn world_to_local(&self, v: Vector3) -> Vector3 {
        v.apply_matrix4(&self.matrix_world.invert())
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self::new()
    }
}
