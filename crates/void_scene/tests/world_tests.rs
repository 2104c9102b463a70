//! Integration tests for void_scene

use std::sync::Arc;
use void_property::{PropertyValue, Vector3};
use void_scene::*;

fn world_in(dir: &std::path::Path) -> SceneWorld {
    SceneWorld::new(Arc::new(BehaviorRegistry::with_builtin()), dir)
}

#[test]
fn test_save_then_open_restores_graph() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = world_in(dir.path());

    let player = world.create_node("Player", None).unwrap();
    let arm = world.create_node("Arm", Some(player)).unwrap();
    world.attach_behavior(arm, "Attachment").unwrap();
    world
        .behavior_mut(arm, "Attachment")
        .unwrap()
        .set("offset", Vector3::new(1.0, 2.0, 3.0).into())
        .unwrap();

    let info = world.save_scene(Some("scenes/main.json")).unwrap();
    assert_eq!(info.scene_path.as_deref(), Some("scenes/main.json"));

    let mut reopened = world_in(dir.path());
    reopened.open_scene("scenes/main.json").unwrap();

    let arm = resolve_path(&reopened, "Player/Arm").unwrap();
    let offset = reopened
        .node(arm)
        .and_then(|n| n.behavior("Attachment"))
        .and_then(|b| b.get("offset"))
        .cloned();
    assert_eq!(offset, Some(PropertyValue::Vector3(Vector3::new(1.0, 2.0, 3.0))));
    assert_eq!(reopened.scene_info().scene_name, "Untitled");
}

#[test]
fn test_save_without_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = world_in(dir.path());
    assert!(matches!(world.save_scene(None), Err(SceneError::NoScenePath)));
}

#[test]
fn test_open_missing_scene_keeps_graph() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = world_in(dir.path());
    world.create_node("Keep", None).unwrap();

    let err = world.open_scene("nope.json").unwrap_err();
    assert!(matches!(err, SceneError::SceneFileNotFound(_)));
    assert!(resolve_path(&world, "Keep").is_ok());
}

#[test]
fn test_build_list_requires_existing_scene() {
    let dir = tempfile::tempdir().unwrap();
    let builds = BuildList::load(dir.path().join("build_scenes.json")).unwrap();
    let mut world = world_in(dir.path()).with_build_list(builds);

    assert!(matches!(
        world.add_build_scene("scenes/a.json"),
        Err(SceneError::SceneFileNotFound(_))
    ));

    SceneFile::empty("A").save(&dir.path().join("scenes/a.json")).unwrap();
    let entry = world.add_build_scene("scenes/a.json").unwrap();
    assert_eq!(world.build_scenes(), &[entry.clone()]);
    assert!(matches!(
        world.add_build_scene("scenes/a.json"),
        Err(SceneError::AlreadyInBuild(_))
    ));

    assert_eq!(world.remove_build_scene("scenes/a.json").unwrap(), entry);
    assert!(world.build_scenes().is_empty());
}

#[test]
fn test_snapshot_and_find_on_world() {
    let dir = tempfile::tempdir().unwrap();
    let mut world = world_in(dir.path());
    let root = world.create_node("Level", None).unwrap();
    world.create_node("Enemy", Some(root)).unwrap();
    world.create_node("enemy spawner", Some(root)).unwrap();

    let snapshot = snapshot(&world, world.scene_info());
    assert_eq!(snapshot.total_objects, 3);
    assert_eq!(find_nodes(&world, "ENEMY"), vec!["Level/Enemy", "Level/enemy spawner"]);
}
