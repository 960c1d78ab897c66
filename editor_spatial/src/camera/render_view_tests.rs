use glam::Vec3;
use slotmap::SlotMap;
use crate::scene::SceneObjectKey;
use super::*;

fn create_test_camera() -> Camera {
    let mut camera = Camera::default();
    camera.set_position(Vec3::new(0.0, 5.0, 10.0));
    camera
}

fn create_keys(count: usize) -> Vec<SceneObjectKey> {
    let mut map: SlotMap<SceneObjectKey, ()> = SlotMap::with_key();
    (0..count).map(|_| map.insert(())).collect()
}

// ============================================================================
// Construction (via pub(crate) new)
// ============================================================================

#[test]
fn test_render_view_new_empty() {
    let camera = create_test_camera();
    let frustum = camera.frustum();
    let view = RenderView::new(camera, frustum, Vec::new());

    assert_eq!(view.visible_count(), 0);
    assert!(view.visible_objects().is_empty());
}

// ============================================================================
// Accessors
// ============================================================================

#[test]
fn test_render_view_camera_snapshot() {
    let mut camera = create_test_camera();
    let view = RenderView::new(camera.clone(), camera.frustum(), Vec::new());

    // Later camera edits do not reach the snapshot
    camera.set_position(Vec3::ZERO);
    assert_eq!(view.camera().position(), Vec3::new(0.0, 5.0, 10.0));
    assert_eq!(*view.frustum(), view.camera().frustum());
}

#[test]
fn test_render_view_visible_objects() {
    let keys = create_keys(3);
    let camera = create_test_camera();
    let view = RenderView::new(camera.clone(), camera.frustum(), keys[..2].to_vec());

    assert_eq!(view.visible_count(), 2);
    assert_eq!(view.visible_objects(), &keys[..2]);
    assert!(view.is_visible(keys[0]));
    assert!(!view.is_visible(keys[2]));
}
