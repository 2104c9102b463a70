//! Integration tests for void_scene_server: HTTP routes
//!
//! Requests go through the axum router in-process while an owner thread
//! drains the dispatcher, the same split the binary uses.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tower::ServiceExt;
use void_dispatch::CommandDispatcher;
use void_scene::{BehaviorRegistry, SceneWorld};
use void_scene_server::{router, OwnerHandle, OwnerLoop, OwnerStats, SceneServer, SceneService};

struct Harness {
    app: Router,
    dispatcher: Arc<CommandDispatcher<SceneWorld>>,
    stop: OwnerHandle,
    owner: Option<JoinHandle<(SceneWorld, OwnerStats)>>,
    _dir: tempfile::TempDir,
}

impl Harness {
    fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let world = SceneWorld::new(Arc::new(BehaviorRegistry::with_builtin()), dir.path());
        let dispatcher = Arc::new(CommandDispatcher::new());
        let service = Arc::new(SceneService::new(dispatcher.clone()));

        let owner = OwnerLoop::new(dispatcher.clone(), Duration::from_millis(1));
        let stop = owner.handle();
        let owner = owner.spawn(world).unwrap();

        Self {
            app: router(service, true),
            dispatcher,
            stop,
            owner: Some(owner),
            _dir: dir,
        }
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        };
        self.call_raw(method, uri, body).await
    }

    async fn call_raw(&self, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn finish(mut self) -> SceneWorld {
        self.stop.stop();
        let (world, _) = self.owner.take().unwrap().join().unwrap();
        world
    }
}

#[tokio::test]
async fn test_get_scene() {
    let harness = Harness::start();
    let (status, body) = harness.call("GET", "/scene", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["sceneName"], json!("Untitled"));
    assert_eq!(body["data"]["totalObjects"], json!(0));
    harness.finish();
}

#[tokio::test]
async fn test_unknown_route() {
    let harness = Harness::start();
    let (status, body) = harness.call("GET", "/teleport", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "success": false, "error": "NotFound", "message": "Endpoint not found" })
    );
    harness.finish();
}

#[tokio::test]
async fn test_wrong_method_is_json() {
    let harness = Harness::start();
    let (status, body) = harness.call("GET", "/objects/create", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], json!(false));
    harness.finish();
}

#[tokio::test]
async fn test_create_modify_list() {
    let harness = Harness::start();

    let (status, body) = harness
        .call("POST", "/objects/create", Some(json!({ "name": "Player" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["path"], json!("Player"));

    let (_, body) = harness
        .call(
            "POST",
            "/objects/create",
            Some(json!({ "name": "Arm", "parentPath": "Player" })),
        )
        .await;
    assert_eq!(body["data"]["path"], json!("Player/Arm"));

    let (status, _) = harness
        .call(
            "POST",
            "/objects/components/add",
            Some(json!({ "path": "Player/Arm", "componentType": "Attachment" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = harness
        .call(
            "PUT",
            "/objects/components/modify",
            Some(json!({
                "path": "Player/Arm",
                "componentType": "Attachment",
                "properties": { "offset": { "x": 1, "y": 2, "z": 3 }, "slots": -1 }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["applied"], json!(["offset"]));
    assert_eq!(body["data"]["errors"]["slots"]["error"], json!("MalformedValue"));

    let (status, body) = harness
        .call("GET", "/objects/components?path=Player%2FArm", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let attachment = body["data"]["components"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == json!("Attachment"))
        .cloned()
        .unwrap();
    let offset = attachment["properties"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == json!("offset"))
        .cloned()
        .unwrap();
    assert_eq!(offset["value"], json!({ "x": 1.0, "y": 2.0, "z": 3.0 }));
    assert_eq!(offset["kind"], json!("Vector3"));

    harness.finish();
}

#[tokio::test]
async fn test_duplicate_behavior_conflict() {
    let harness = Harness::start();
    harness
        .call("POST", "/objects/create", Some(json!({ "name": "Lamp" })))
        .await;

    let add = json!({ "path": "Lamp", "behaviorType": "Light" });
    let (status, _) = harness
        .call("POST", "/objects/components/add", Some(add.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = harness
        .call("POST", "/objects/components/add", Some(add))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("DuplicateBehavior"));

    let world = harness.finish();
    let lamp = void_scene::resolve_path(&world, "Lamp").unwrap();
    assert_eq!(
        void_scene::SceneRead::node(&world, lamp).unwrap().behaviors().len(),
        2
    );
}

#[tokio::test]
async fn test_bad_bodies() {
    let harness = Harness::start();

    let (status, body) = harness
        .call_raw("POST", "/scene/open", Body::from("{not json"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("BadRequest"));

    let (status, _) = harness
        .call("DELETE", "/objects/delete", Some(json!({ "name": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = harness.call("GET", "/objects/find?name=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("BadRequest"));

    let (status, _) = harness.call("GET", "/objects/components", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    harness.finish();
}

#[tokio::test]
async fn test_not_found_paths() {
    let harness = Harness::start();

    let (status, body) = harness
        .call(
            "POST",
            "/objects/create",
            Some(json!({ "name": "Hand", "parentPath": "Nobody" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("NotFound"));

    let (status, _) = harness
        .call("POST", "/scene/open", Some(json!({ "scenePath": "missing.json" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let world = harness.finish();
    assert_eq!(world.graph().len(), 0);
}

#[tokio::test]
async fn test_shutdown_is_unavailable() {
    let harness = Harness::start();
    harness.dispatcher.shutdown();

    let (status, body) = harness.call("GET", "/scene", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], json!("DispatchShutdown"));
    harness.finish();
}

#[test]
fn test_server_over_tcp() {
    let harness = Harness::start();
    let mut server = SceneServer::start(
        harness.app.clone(),
        "127.0.0.1:0".parse().unwrap(),
        1,
    )
    .unwrap();
    assert!(server.is_running());

    let mut stream = std::net::TcpStream::connect(server.local_addr()).unwrap();
    stream
        .write_all(b"GET /scene HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();
    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(reply.starts_with("HTTP/1.1 200"));
    assert!(reply.contains("\"success\":true"));

    server.stop();
    assert!(!server.is_running());
    harness.finish();
}
