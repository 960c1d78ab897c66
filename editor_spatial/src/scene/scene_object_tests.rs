use glam::{Quat, Vec3};
use slotmap::SlotMap;
use super::*;

fn unit_box() -> BoundingVolume {
    BoundingVolume::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_static_mesh_defaults() {
    let object = SceneObject::static_mesh("cube", unit_box());
    assert_eq!(object.kind(), &ObjectKind::StaticMesh { mesh: "cube".to_string() });
    assert_eq!(object.flags(), ObjectFlags::VISIBLE | ObjectFlags::PICKABLE | ObjectFlags::CULLABLE);
    assert_eq!(object.world_bounds(), unit_box());
    assert!(object.is_indexed());
}

#[test]
fn test_light_bounds_cover_range() {
    let light = SceneObject::light(2.0, 5.0);
    assert_eq!(light.local_bounds().min, Vec3::splat(-5.0));
    assert_eq!(light.local_bounds().max, Vec3::splat(5.0));
}

#[test]
fn test_gizmo_is_not_indexed() {
    let gizmo = SceneObject::gizmo(unit_box());
    assert!(gizmo.is_gizmo());
    assert!(!gizmo.is_indexed());
    assert!(!gizmo.flags().contains(ObjectFlags::CULLABLE));
}

#[test]
fn test_with_flags() {
    let object = SceneObject::static_mesh("floor", unit_box()).with_flags(ObjectFlags::VISIBLE);
    assert!(!object.flags().contains(ObjectFlags::PICKABLE));
}

// ============================================================================
// World bounds
// ============================================================================

#[test]
fn test_transform_updates_world_bounds() {
    let mut object = SceneObject::static_mesh("cube", unit_box());
    object.set_transform(Transform::from_location(Vec3::new(10.0, 0.0, 0.0)));

    let world = object.world_bounds();
    assert_eq!(world.min, Vec3::new(9.0, -1.0, -1.0));
    assert_eq!(world.max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn test_scaled_rotated_bounds() {
    let transform = Transform {
        location: Vec3::ZERO,
        rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
        scale: Vec3::new(2.0, 1.0, 1.0),
    };
    let object = SceneObject::static_mesh("beam", unit_box()).with_transform(transform);
    let world = object.world_bounds();

    // Scaled X edge rotated 45° reaches (2 + 1) / sqrt(2) on both X and Y
    let reach = 3.0 / 2.0_f32.sqrt();
    assert!((world.max.x - reach).abs() < 1e-4);
    assert!((world.max.y - reach).abs() < 1e-4);
    assert!((world.max.z - 1.0).abs() < 1e-6);
}

#[test]
fn test_local_bounds_change_updates_world_bounds() {
    let mut object = SceneObject::static_mesh("cube", unit_box())
        .with_transform(Transform::from_location(Vec3::Y));
    object.set_local_bounds(BoundingVolume::new(Vec3::ZERO, Vec3::ONE));

    assert_eq!(object.world_bounds().min, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(object.world_bounds().max, Vec3::new(1.0, 2.0, 1.0));
}

// ============================================================================
// Ray hit test
// ============================================================================

#[test]
fn test_default_ray_hit_distance() {
    let object = SceneObject::static_mesh("cube", unit_box())
        .with_transform(Transform::from_location(Vec3::new(0.0, 0.0, -10.0)));
    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();

    let distance = object.ray_hit_distance(&ray).unwrap();
    assert!((distance - 9.0).abs() < 1e-5);

    let away = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
    assert!(object.ray_hit_distance(&away).is_none());
}

// ============================================================================
// Handles
// ============================================================================

#[test]
fn test_handle_reports_snapshot_bounds() {
    let mut objects: SlotMap<SceneObjectKey, SceneObject> = SlotMap::with_key();
    let key = objects.insert(SceneObject::static_mesh("cube", unit_box()));

    let handle = ObjectHandle::new(key, objects[key].world_bounds());
    objects[key].set_transform(Transform::from_location(Vec3::splat(50.0)));

    assert_eq!(handle.key, key);
    assert_eq!(handle.world_bounds(), unit_box());
}

#[test]
fn test_transform_identity_matrix() {
    assert_eq!(Transform::default().matrix(), glam::Mat4::IDENTITY);
}
