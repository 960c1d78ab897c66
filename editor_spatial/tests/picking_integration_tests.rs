//! Integration tests for mouse picking through the public API
//!
//! Run with: cargo test --test picking_integration_tests

use editor_spatial::editor3d::{Error, SceneConfig};
use editor_spatial::editor3d::camera::{Camera, Ray, Viewport};
use editor_spatial::editor3d::scene::{
    BoundingVolume, ObjectFlags, Picker, Scene, SceneObject, SceneObjectKey, Transform,
};
use editor_spatial::glam::{Quat, Vec3};

fn unit_box() -> BoundingVolume {
    BoundingVolume::new(Vec3::splat(-0.5), Vec3::splat(0.5))
}

fn add_mesh(scene: &mut Scene, location: Vec3) -> SceneObjectKey {
    let object = SceneObject::static_mesh("cube", unit_box()).with_transform(Transform::from_location(location));
    scene.add_object(object).unwrap()
}

/// Row of cubes along -Z, one every 5 units, starting 5 units from the origin.
fn corridor_scene(count: usize) -> (Scene, Vec<SceneObjectKey>) {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let keys = (1..=count)
        .map(|i| add_mesh(&mut scene, Vec3::new(0.0, 0.0, -5.0 * i as f32)))
        .collect();
    (scene, keys)
}

fn camera_looking_at(position: Vec3, target: Vec3) -> Camera {
    let rotation = Camera::look_rotation(position, target, Vec3::Y);
    Camera::new(position, rotation, 60.0, 0.1, 1000.0, 1.0)
}

// ============================================================================
// Nearest hit along a ray
// ============================================================================

#[test]
fn test_pick_first_cube_in_corridor() {
    let (scene, keys) = corridor_scene(50);
    let ray = Ray::new(Vec3::new(0.1, 0.1, 0.0), Vec3::NEG_Z).unwrap();

    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_eq!(hit.key, keys[0]);
    assert!((hit.distance - 4.5).abs() < 1e-4);
}

#[test]
fn test_pick_reaches_next_cube_after_removal() {
    let (mut scene, keys) = corridor_scene(50);
    scene.remove_object(keys[0]).unwrap();
    let ray = Ray::new(Vec3::new(0.1, 0.1, 0.0), Vec3::NEG_Z).unwrap();

    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_eq!(hit.key, keys[1]);

    // Same answer once the octree is rebuilt
    scene.commit_changes().unwrap();
    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_eq!(hit.key, keys[1]);
}

#[test]
fn test_pick_from_inside_the_row() {
    let (scene, keys) = corridor_scene(20);

    // Start between cubes 9 and 10 (z = -47.5), looking back toward the origin
    let ray = Ray::new(Vec3::new(0.0, 0.2, -47.5), Vec3::Z).unwrap();
    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_eq!(hit.key, keys[8]);
    assert!((hit.distance - 2.0).abs() < 1e-4);
}

#[test]
fn test_pick_skips_unpickable_and_hidden_kinds() {
    let (mut scene, keys) = corridor_scene(5);
    scene.set_flags(keys[0], ObjectFlags::VISIBLE).unwrap();
    let gizmo = scene.add_object(SceneObject::gizmo(unit_box())
        .with_transform(Transform::from_location(Vec3::new(0.0, 0.0, -2.0))))
        .unwrap();
    let ray = Ray::new(Vec3::new(0.1, 0.1, 0.0), Vec3::NEG_Z).unwrap();

    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_ne!(hit.key, gizmo);
    assert_eq!(hit.key, keys[1]);
}

#[test]
fn test_pick_beyond_world_bounds_after_growth() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let distant = add_mesh(&mut scene, Vec3::new(0.0, 0.0, -5000.0));
    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();

    let hit = Picker::new().pick(&scene, &ray, 0.1).unwrap();
    assert_eq!(hit.key, distant);
    assert!((hit.distance - 4999.5).abs() < 1e-2);
}

#[test]
fn test_pick_miss_returns_none() {
    let (scene, _) = corridor_scene(10);
    let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Z).unwrap();
    assert!(Picker::new().pick(&scene, &ray, 0.1).is_none());
}

// ============================================================================
// Screen-space picking
// ============================================================================

#[test]
fn test_pick_at_screen_center_and_offset() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let center = add_mesh(&mut scene, Vec3::ZERO);
    let side = add_mesh(&mut scene, Vec3::new(4.0, 0.0, 0.0));

    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO);
    let viewport = Viewport::new(800.0, 800.0);
    let picker = Picker::new();

    let hit = picker.pick_at_screen(&scene, &camera, 400.0, 400.0, &viewport).unwrap().unwrap();
    assert_eq!(hit.key, center);

    // Project the side cube's center to find its pixel
    let ndc = camera.view_projection_matrix().project_point3(Vec3::new(4.0, 0.0, 0.0));
    let x = (ndc.x + 1.0) * 0.5 * viewport.width;
    let y = (1.0 - ndc.y) * 0.5 * viewport.height;
    let hit = picker.pick_at_screen(&scene, &camera, x, y, &viewport).unwrap().unwrap();
    assert_eq!(hit.key, side);
}

#[test]
fn test_pick_at_screen_just_beyond_near_plane() {
    let mut scene = Scene::new(SceneConfig::default()).unwrap();
    let close = add_mesh(&mut scene, Vec3::new(0.0, 0.0, -2.0));

    let camera = Camera::new(Vec3::ZERO, Quat::IDENTITY, 60.0, 1.0, 1000.0, 1.0);
    let viewport = Viewport::new(200.0, 200.0);
    assert_eq!(scene.frustum_cull(&camera.frustum(), false), vec![close]);

    // Eye distance 1.5, past the 1.1 cutoff
    let hit = Picker::new().pick_at_screen(&scene, &camera, 100.0, 100.0, &viewport).unwrap().unwrap();
    assert_eq!(hit.key, close);
    assert!((hit.distance - 1.5).abs() < 1e-3);
}

#[test]
fn test_pick_at_screen_rejects_empty_viewport() {
    let scene = Scene::new(SceneConfig::default()).unwrap();
    let camera = Camera::new(Vec3::ZERO, Quat::IDENTITY, 60.0, 0.1, 1000.0, 1.0);

    let result = Picker::new().pick_at_screen(&scene, &camera, 1.0, 1.0, &Viewport::new(0.0, 10.0));
    assert!(matches!(result, Err(Error::InvalidRay(_))));
}
