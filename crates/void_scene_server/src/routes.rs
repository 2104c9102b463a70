//! HTTP routes
//!
//! Every handler builds a [`SceneRequest`], runs it through the
//! [`SceneService`] and replies with a JSON [`SceneResponse`]. Bodies are
//! parsed by hand so that malformed JSON gets the same structured error as
//! everything else.

use crate::error::{ApiError, ApiResult};
use crate::request::{
    BehaviorBody, CreateNodeBody, NodePathBody, SaveSceneBody, ScenePathBody, SceneRequest,
    SetPropertiesBody,
};
use crate::response::SceneResponse;
use crate::service::SceneService;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use void_scene::SceneHost;

type ServiceState<H> = State<Arc<SceneService<H>>>;
type Reply = ApiResult<Json<SceneResponse>>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(SceneResponse::from(self))).into_response()
    }
}

/// Build the router for the scene API
pub fn router<H: SceneHost + 'static>(service: Arc<SceneService<H>>, cors: bool) -> Router {
    let router = Router::new()
        // Scene
        .route("/scene", get(get_hierarchy::<H>).fallback(method_not_allowed))
        .route("/scene/open", post(open_scene::<H>).fallback(method_not_allowed))
        .route("/scene/save", post(save_scene::<H>).fallback(method_not_allowed))
        // Build list
        .route("/build/scenes", get(list_build_scenes::<H>).fallback(method_not_allowed))
        .route("/build/scenes/add", post(add_build_scene::<H>).fallback(method_not_allowed))
        .route(
            "/build/scenes/remove",
            delete(remove_build_scene::<H>).fallback(method_not_allowed),
        )
        // Objects
        .route("/objects/create", post(create_node::<H>).fallback(method_not_allowed))
        .route("/objects/delete", delete(delete_node::<H>).fallback(method_not_allowed))
        .route("/objects/find", get(find_nodes::<H>).fallback(method_not_allowed))
        // Components
        .route("/objects/components", get(list_behaviors::<H>).fallback(method_not_allowed))
        .route(
            "/objects/components/add",
            post(add_behavior::<H>).fallback(method_not_allowed),
        )
        .route(
            "/objects/components/modify",
            put(set_properties::<H>).fallback(method_not_allowed),
        )
        .route(
            "/objects/components/remove",
            delete(remove_behavior::<H>).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(service);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    let bytes: &[u8] = if body.is_empty() { &b"{}"[..] } else { body.as_ref() };
    serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

fn query_param(query: &HashMap<String, String>, name: &str) -> ApiResult<String> {
    query
        .get(name)
        .cloned()
        .ok_or_else(|| ApiError::BadRequest(format!("Missing query parameter: {}", name)))
}

async fn run<H: SceneHost + 'static>(service: &SceneService<H>, request: SceneRequest) -> Reply {
    service.execute(request).await.map(Json)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".into())
}

async fn method_not_allowed() -> Response {
    let response = SceneResponse {
        success: false,
        message: Some("Method not allowed".into()),
        error: Some("BadRequest".into()),
        data: None,
    };
    (StatusCode::METHOD_NOT_ALLOWED, Json(response)).into_response()
}

async fn get_hierarchy<H: SceneHost + 'static>(State(service): ServiceState<H>) -> Reply {
    run(&service, SceneRequest::GetHierarchy).await
}

async fn open_scene<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: ScenePathBody = parse_body(&body)?;
    run(&service, body.into()).await
}

async fn save_scene<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: SaveSceneBody = parse_body(&body)?;
    run(&service, body.into()).await
}

async fn list_build_scenes<H: SceneHost + 'static>(State(service): ServiceState<H>) -> Reply {
    run(&service, SceneRequest::ListBuildScenes).await
}

async fn add_build_scene<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: ScenePathBody = parse_body(&body)?;
    let request = SceneRequest::AddBuildScene {
        scene_path: body.scene_path,
    };
    run(&service, request).await
}

async fn remove_build_scene<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: ScenePathBody = parse_body(&body)?;
    let request = SceneRequest::RemoveBuildScene {
        scene_path: body.scene_path,
    };
    run(&service, request).await
}

async fn create_node<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: CreateNodeBody = parse_body(&body)?;
    run(&service, body.into()).await
}

async fn delete_node<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: NodePathBody = parse_body(&body)?;
    run(&service, SceneRequest::DeleteNode { path: body.path }).await
}

async fn find_nodes<H: SceneHost + 'static>(
    State(service): ServiceState<H>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let term = query_param(&query, "name")?;
    run(&service, SceneRequest::FindNodes { term }).await
}

async fn list_behaviors<H: SceneHost + 'static>(
    State(service): ServiceState<H>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let path = query_param(&query, "path")?;
    run(&service, SceneRequest::ListBehaviors { path }).await
}

async fn add_behavior<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: BehaviorBody = parse_body(&body)?;
    let request = SceneRequest::AddBehavior {
        path: body.path,
        behavior_type: body.behavior_type,
    };
    run(&service, request).await
}

async fn set_properties<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: SetPropertiesBody = parse_body(&body)?;
    run(&service, body.into()).await
}

async fn remove_behavior<H: SceneHost + 'static>(State(service): ServiceState<H>, body: Bytes) -> Reply {
    let body: BehaviorBody = parse_body(&body)?;
    let request = SceneRequest::RemoveBehavior {
        path: body.path,
        behavior_type: body.behavior_type,
    };
    run(&service, request).await
}
