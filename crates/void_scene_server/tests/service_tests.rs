//! Integration tests for void_scene_server: the service over a live world
//!
//! Requests are submitted from the test thread and the world is drained by
//! hand, which keeps ordering deterministic without an owner loop.

use serde_json::json;
use std::sync::Arc;
use void_dispatch::CommandDispatcher;
use void_scene::{resolve_path, BehaviorRegistry, SceneHost, SceneRead, SceneWorld};
use void_scene_server::service::flatten;
use void_scene_server::{ApiError, SceneRequest, SceneResponse, SceneService};

struct Fixture {
    world: SceneWorld,
    service: SceneService<SceneWorld>,
    _dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let world = SceneWorld::new(Arc::new(BehaviorRegistry::with_builtin()), dir.path());
        let service = SceneService::new(Arc::new(CommandDispatcher::new()));
        Self {
            world,
            service,
            _dir: dir,
        }
    }

    /// Fixture with `Player` and its child `Arm`
    fn with_player() -> Self {
        let mut fixture = Self::new();
        let player = fixture.world.create_node("Player", None).unwrap();
        fixture.world.create_node("Arm", Some(player)).unwrap();
        fixture
    }

    fn request(&mut self, request: SceneRequest) -> SceneResponse {
        let ticket = self.service.submit(request);
        self.service.dispatcher().drain_and_run_all(&mut self.world);
        flatten(ticket.wait()).unwrap_or_else(SceneResponse::from)
    }
}

fn set_properties(path: &str, behavior: &str, properties: serde_json::Value) -> SceneRequest {
    SceneRequest::SetProperties {
        path: path.into(),
        behavior_type: behavior.into(),
        properties: properties.as_object().cloned().unwrap(),
    }
}

fn add_behavior(path: &str, behavior: &str) -> SceneRequest {
    SceneRequest::AddBehavior {
        path: path.into(),
        behavior_type: behavior.into(),
    }
}

fn property_value(response: &SceneResponse, behavior: &str, property: &str) -> serde_json::Value {
    let components = response.data_field("components").unwrap().as_array().unwrap();
    let component = components.iter().find(|c| c["name"] == json!(behavior)).unwrap();
    let entry = component["properties"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == json!(property))
        .unwrap();
    entry["value"].clone()
}

#[test]
fn test_set_vector_then_list() {
    let mut fixture = Fixture::with_player();
    assert!(fixture.request(add_behavior("Player/Arm", "Attachment")).success);

    let response = fixture.request(set_properties(
        "Player/Arm",
        "Attachment",
        json!({ "offset": { "x": 1, "y": 2, "z": 3 } }),
    ));
    assert!(response.success);
    assert_eq!(response.data_field("applied"), Some(&json!(["offset"])));

    let listed = fixture.request(SceneRequest::ListBehaviors {
        path: "Player/Arm".into(),
    });
    assert_eq!(
        property_value(&listed, "Attachment", "offset"),
        json!({ "x": 1.0, "y": 2.0, "z": 3.0 })
    );
}

#[test]
fn test_one_malformed_property_among_three() {
    let mut fixture = Fixture::with_player();
    fixture.request(add_behavior("Player/Arm", "Attachment"));

    let response = fixture.request(set_properties(
        "Player/Arm",
        "Attachment",
        json!({
            "offset": { "x": "oops", "y": 0, "z": 0 },
            "socket": "hand_r",
            "slots": 4,
        }),
    ));

    assert!(response.success);
    assert_eq!(response.data_field("applied"), Some(&json!(["slots", "socket"])));
    let errors = response.data_field("errors").unwrap();
    assert_eq!(errors["offset"]["error"], json!("MalformedValue"));
    assert!(errors.get("socket").is_none());

    let listed = fixture.request(SceneRequest::ListBehaviors {
        path: "Player/Arm".into(),
    });
    assert_eq!(property_value(&listed, "Attachment", "socket"), json!("hand_r"));
    assert_eq!(
        property_value(&listed, "Attachment", "offset"),
        json!({ "x": 0.0, "y": 0.0, "z": 0.0 })
    );
}

#[test]
fn test_duplicate_behavior_leaves_node_unchanged() {
    let mut fixture = Fixture::with_player();
    fixture.request(add_behavior("Player", "Light"));
    fixture.request(set_properties("Player", "Light", json!({ "intensity": 4.0 })));

    let response = fixture.request(add_behavior("Player", "Light"));
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("DuplicateBehavior"));

    let player = resolve_path(&fixture.world, "Player").unwrap();
    let node = fixture.world.node(player).unwrap();
    assert_eq!(node.behaviors().len(), 2);
    assert_eq!(
        node.behavior("Light").and_then(|b| b.get("intensity")),
        Some(&void_property::PropertyValue::Float(4.0))
    );
}

#[test]
fn test_unknown_paths_are_not_found() {
    let mut fixture = Fixture::with_player();

    for request in [
        SceneRequest::DeleteNode { path: "Player/Leg".into() },
        SceneRequest::ListBehaviors { path: "".into() },
        add_behavior("Ghost", "Light"),
        SceneRequest::CreateNode {
            name: "Hand".into(),
            parent_path: Some("Player/Leg".into()),
        },
    ] {
        let response = fixture.request(request);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("NotFound"));
    }
    assert_eq!(fixture.world.graph().len(), 2);
}

#[test]
fn test_first_match_resolution() {
    let mut fixture = Fixture::new();
    let first = fixture.world.create_node("A", None).unwrap();
    fixture.world.create_node("A", None).unwrap();

    let response = fixture.request(SceneRequest::CreateNode {
        name: "Child".into(),
        parent_path: Some("A".into()),
    });
    assert_eq!(response.data_field("path"), Some(&json!("A/Child")));
    assert_eq!(fixture.world.child_nodes(first).map(|c| c.len()), Some(1));
}

#[test]
fn test_save_open_and_build_list() {
    let mut fixture = Fixture::with_player();

    let response = fixture.request(SceneRequest::SaveScene { scene_path: None });
    assert_eq!(response.error.as_deref(), Some("BadRequest"));

    let response = fixture.request(SceneRequest::SaveScene {
        scene_path: Some("scenes/main.json".into()),
    });
    assert!(response.success);

    let response = fixture.request(SceneRequest::AddBuildScene {
        scene_path: "scenes/main.json".into(),
    });
    assert!(response.success);
    assert_eq!(response.data_field("index"), Some(&json!(0)));

    let response = fixture.request(SceneRequest::AddBuildScene {
        scene_path: "scenes/main.json".into(),
    });
    assert_eq!(response.error.as_deref(), Some("DuplicateBehavior"));

    fixture.request(SceneRequest::DeleteNode { path: "Player".into() });
    let response = fixture.request(SceneRequest::OpenScene {
        scene_path: "scenes/main.json".into(),
    });
    assert!(response.success);
    assert!(resolve_path(&fixture.world, "Player/Arm").is_ok());

    let response = fixture.request(SceneRequest::ListBuildScenes);
    assert_eq!(response.data_field("totalCount"), Some(&json!(1)));
}

#[test]
fn test_nesting_stops_at_max_depth() {
    let mut fixture = Fixture::new();
    let mut parent: Option<String> = None;
    for depth in 0..void_scene::MAX_DEPTH {
        let response = fixture.request(SceneRequest::CreateNode {
            name: format!("N{}", depth),
            parent_path: parent.clone(),
        });
        assert!(response.success);
        parent = response.data_field("path").and_then(|p| p.as_str()).map(String::from);
    }

    let response = fixture.request(SceneRequest::CreateNode {
        name: "Deeper".into(),
        parent_path: parent,
    });
    assert_eq!(response.error.as_deref(), Some("BadRequest"));
    assert_eq!(fixture.world.graph().len(), void_scene::MAX_DEPTH);

    let response = fixture.request(SceneRequest::GetHierarchy);
    assert!(response.success);
    assert_eq!(
        response.data_field("totalObjects"),
        Some(&json!(void_scene::MAX_DEPTH))
    );
}

#[test]
fn test_find_nodes() {
    let mut fixture = Fixture::with_player();
    let response = fixture.request(SceneRequest::FindNodes { term: "ar".into() });
    assert_eq!(response.data_field("paths"), Some(&json!(["Player/Arm"])));
    assert_eq!(response.data_field("foundCount"), Some(&json!(1)));
}

#[test]
fn test_requests_after_shutdown() {
    let fixture = Fixture::new();
    fixture.service.dispatcher().shutdown();

    let result = fixture.service.execute_blocking(SceneRequest::GetHierarchy);
    assert!(matches!(result, Err(ApiError::DispatchShutdown)));
}

#[test]
fn test_pending_request_released_by_shutdown() {
    let fixture = Fixture::new();
    let ticket = fixture.service.submit(SceneRequest::GetHierarchy);
    fixture.service.dispatcher().shutdown();

    let response = flatten(ticket.wait()).unwrap_or_else(SceneResponse::from);
    assert_eq!(response.error.as_deref(), Some("DispatchShutdown"));
}

#[test]
fn test_blocking_callers_from_many_threads() {
    let mut fixture = Fixture::new();
    let service = Arc::new(fixture.service);

    let callers: Vec<_> = (0..4)
        .map(|i| {
            let service = service.clone();
            std::thread::spawn(move || {
                service.execute_blocking(SceneRequest::CreateNode {
                    name: format!("Node{}", i),
                    parent_path: None,
                })
            })
        })
        .collect();

    while fixture.world.graph().len() < 4 {
        service.dispatcher().drain_and_run_all(&mut fixture.world);
        std::thread::yield_now();
    }
    for caller in callers {
        assert!(caller.join().unwrap().unwrap().success);
    }
}
