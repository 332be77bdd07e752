//! End-to-end scene graph behavior: rotation sync, propagation through
//! deep trees, reparenting and cameras.

use approx::assert_abs_diff_eq;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use xform_math::{Euler, Matrix4, Quaternion, RotationOrder, Vector3};
use xform_scene::{Camera, NodeId, Object3D, OrthographicProjection, Scene, SceneError};

#[test]
fn rotation_x_quarter_turn_updates_quaternion() {
    let mut node = Object3D::new();
    node.update_rotation(|r| r.x = FRAC_PI_2);

    let q = node.quaternion();
    assert_abs_diff_eq!(q, Quaternion::new(FRAC_PI_4.sin(), 0.0, 0.0, FRAC_PI_4.cos()), epsilon = 1e-12);
    assert_eq!(node.rotation().order, RotationOrder::XYZ);
}

#[test]
fn three_level_translation_chain() {
    let mut scene = Scene::new();
    let r = scene.add_node(Object3D::named("R"));
    let a = scene
        .add(Some(r), Object3D::named("A").with_position(Vector3::new(1.0, 0.0, 0.0)))
        .unwrap();
    let b = scene
        .add(Some(a), Object3D::named("B").with_position(Vector3::new(0.0, 1.0, 0.0)))
        .unwrap();

    scene.update_world_matrix(r, false, true).unwrap();

    let world_b = scene.get(b).unwrap().matrix_world;
    assert_eq!(world_b, Matrix4::make_translation(1.0, 1.0, 0.0));
    assert_eq!(world_b * Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0));
}

#[test]
fn deep_chain_does_not_recurse() {
    let mut scene = Scene::new();
    let mut parent = scene.add_node(Object3D::new());
    let root = parent;
    for _ in 0..5_000 {
        parent = scene
            .add(Some(parent), Object3D::new().with_position(Vector3::new(0.0, 0.0, 1.0)))
            .unwrap();
    }

    scene.update_world_matrix(root, false, true).unwrap();
    assert_eq!(scene.get(parent).unwrap().matrix_world.position(), Vector3::new(0.0, 0.0, 5_000.0));
    assert_eq!(scene.remove(root), 5_001);
}

#[test]
fn rotated_parent_with_scaled_child() {
    let mut scene = Scene::new();
    let parent = scene.add_node(
        Object3D::new()
            .with_position(Vector3::new(0.0, 0.0, -5.0))
            .with_rotation(Euler::new(0.0, FRAC_PI_2, 0.0, RotationOrder::XYZ)),
    );
    let child = scene
        .add(
            Some(parent),
            Object3D::new()
                .with_position(Vector3::new(0.0, 0.0, 2.0))
                .with_scale(Vector3::splat(3.0)),
        )
        .unwrap();

    scene.update_matrix_world();

    // Local +Z of the parent is world +X.
    assert_abs_diff_eq!(scene.world_position(child).unwrap(), Vector3::new(2.0, 0.0, -5.0), epsilon = 1e-12);
    assert_abs_diff_eq!(scene.world_scale(child).unwrap(), Vector3::splat(3.0), epsilon = 1e-12);

    let corner = scene.local_to_world(child, Vector3::new(0.0, 0.0, 1.0)).unwrap();
    assert_abs_diff_eq!(corner, Vector3::new(5.0, 0.0, -5.0), epsilon = 1e-12);
}

#[test]
fn attach_then_detach_round_trip() {
    let mut scene = Scene::new();
    let left = scene.add_node(Object3D::new().with_position(Vector3::new(-3.0, 0.0, 0.0)));
    let right = scene.add_node(
        Object3D::new()
            .with_position(Vector3::new(3.0, 1.0, 0.0))
            .with_scale(Vector3::new(2.0, 2.0, 2.0)),
    );
    let item = scene
        .add(Some(left), Object3D::new().with_position(Vector3::new(1.0, 0.0, 0.0)))
        .unwrap();

    scene.update_matrix_world();
    let world_before = scene.world_position(item).unwrap();

    scene.attach(right, item).unwrap();
    assert_eq!(scene.parent(item), Some(right));
    assert_abs_diff_eq!(scene.world_position(item).unwrap(), world_before, epsilon = 1e-12);
    assert_abs_diff_eq!(scene.get(item).unwrap().scale, Vector3::splat(0.5), epsilon = 1e-12);

    // detach keeps the local transform, so the world position changes.
    scene.detach(item).unwrap();
    assert!(scene.roots().contains(&item));
    assert_abs_diff_eq!(scene.world_position(item).unwrap(), Vector3::new(-2.5, -0.5, 0.0), epsilon = 1e-12);
}

#[test]
fn cycles_are_rejected() {
    let mut scene = Scene::new();
    let a = scene.add_node(Object3D::new());
    let b = scene.add(Some(a), Object3D::new()).unwrap();
    let c = scene.add(Some(b), Object3D::new()).unwrap();

    let err = scene.add_child(c, a).unwrap_err();
    assert_eq!(err, SceneError::Cycle { parent: c, child: a });
    assert!(err.is_hierarchy_error());

    let err = scene.attach(b, a).unwrap_err();
    assert!(err.is_hierarchy_error());
    assert_eq!(scene.traverse(a), vec![a, b, c]);
}

#[test]
fn removed_ids_stay_dead() {
    let mut scene = Scene::new();
    let a = scene.add_node(Object3D::new());
    scene.remove(a);

    let b = scene.add_node(Object3D::new());
    assert_ne!(a, b);
    assert!(scene.world_position(a).unwrap_err().is_not_found());
    assert!(scene.get(a).is_none());
    assert_eq!(scene.remove(NodeId::from_raw(u64::MAX)), 0);
}

#[test]
fn camera_looks_at_target() {
    let mut scene = Scene::new();
    let target = Vector3::new(4.0, 0.0, 0.0);
    let mut camera = Camera::new(&mut scene, OrthographicProjection::new(-2.0, 2.0, 2.0, -2.0, 0.1, 100.0));
    scene.get_mut(camera.node()).unwrap().position = Vector3::new(0.0, 0.0, 0.0);

    scene.look_at(camera.node(), target).unwrap();
    camera.update_world_matrix(&mut scene, true, false).unwrap();

    assert_abs_diff_eq!(camera.world_direction(&mut scene).unwrap(), Vector3::X, epsilon = 1e-12);

    // The target sits on the view axis, so it lands at the center of NDC.
    let ndc = camera.project(target);
    assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-12);
}

#[test]
fn packed_matrices_follow_traversal() {
    let mut scene = Scene::new();
    let a = scene.add_node(Object3D::new().with_position(Vector3::new(1.0, 0.0, 0.0)));
    scene.add(Some(a), Object3D::new().with_position(Vector3::new(0.0, 2.0, 0.0))).unwrap();
    scene.add_node(Object3D::new().with_position(Vector3::new(0.0, 0.0, 3.0)));
    scene.update_matrix_world();

    let mut out = vec![0.0; 48];
    assert_eq!(scene.pack_world_matrices(&mut out, 0).unwrap(), 3);
    let translations: Vec<&[f64]> = out.chunks(16).map(|m| &m[12..15]).collect();
    assert_eq!(translations, vec![&[1.0, 0.0, 0.0][..], &[1.0, 2.0, 0.0][..], &[0.0, 0.0, 3.0][..]]);
}

#[test]
fn manual_world_matrix_is_kept_and_inherited() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Object3D::new().with_position(Vector3::new(1.0, 0.0, 0.0)));
    let child = scene
        .add(Some(parent), Object3D::new().with_position(Vector3::new(0.0, 1.0, 0.0)))
        .unwrap();

    let manual = Matrix4::make_translation(9.0, 9.0, 9.0);
    {
        let node = scene.get_mut(parent).unwrap();
        node.matrix_world_auto_update = false;
        node.matrix_world = manual;
    }

    scene.update_matrix_world();

    assert_eq!(scene.get(parent).unwrap().matrix_world, manual);
    assert_eq!(scene.world_position(child).unwrap(), Vector3::new(9.0, 10.0, 9.0));
}
