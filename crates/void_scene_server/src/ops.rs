//! Scene operations
//!
//! Every function here runs on the owning context, inside one unit of
//! work. Path resolution happens in the same call as the read or mutation
//! it serves.

use crate::error::{ApiError, ApiResult};
use crate::request::SceneRequest;
use crate::response::SceneResponse;
use serde_json::{json, Map, Value as JsonValue};
use void_property::{encode, Value};
use void_scene::{find_nodes, resolve_path, snapshot, BuildEntry, SceneError, SceneHost};

/// Run `request` against `host`
pub fn execute<H: SceneHost + ?Sized>(host: &mut H, request: SceneRequest) -> ApiResult<SceneResponse> {
    match request {
        SceneRequest::GetHierarchy => get_hierarchy(&*host),
        SceneRequest::OpenScene { scene_path } => open_scene(host, &scene_path),
        SceneRequest::SaveScene { scene_path } => save_scene(host, scene_path.as_deref()),
        SceneRequest::ListBuildScenes => list_build_scenes(&*host),
        SceneRequest::AddBuildScene { scene_path } => add_build_scene(host, &scene_path),
        SceneRequest::RemoveBuildScene { scene_path } => remove_build_scene(host, &scene_path),
        SceneRequest::CreateNode { name, parent_path } => {
            create_node(host, &name, parent_path.as_deref())
        }
        SceneRequest::DeleteNode { path } => delete_node(host, &path),
        SceneRequest::ListBehaviors { path } => list_behaviors(&*host, &path),
        SceneRequest::AddBehavior {
            path,
            behavior_type,
        } => add_behavior(host, &path, &behavior_type),
        SceneRequest::SetProperties {
            path,
            behavior_type,
            properties,
        } => set_properties(host, &path, &behavior_type, &properties),
        SceneRequest::RemoveBehavior {
            path,
            behavior_type,
        } => remove_behavior(host, &path, &behavior_type),
        SceneRequest::FindNodes { term } => find(&*host, &term),
    }
}

pub fn get_hierarchy<H: SceneHost + ?Sized>(host: &H) -> ApiResult<SceneResponse> {
    let snapshot = snapshot(host, host.scene_info());
    let message = format!("Scene '{}' with {} object(s)", snapshot.scene.scene_name, snapshot.total_objects);
    Ok(SceneResponse::ok(message).with_data(serde_json::to_value(snapshot)?))
}

pub fn open_scene<H: SceneHost + ?Sized>(host: &mut H, scene_path: &str) -> ApiResult<SceneResponse> {
    let info = host.open_scene(scene_path)?;
    Ok(SceneResponse::ok(format!("Opened scene: {}", scene_path)).with_data(serde_json::to_value(info)?))
}

pub fn save_scene<H: SceneHost + ?Sized>(host: &mut H, scene_path: Option<&str>) -> ApiResult<SceneResponse> {
    let info = host.save_scene(scene_path)?;
    let message = format!("Saved scene: {}", info.scene_path.as_deref().unwrap_or_default());
    Ok(SceneResponse::ok(message).with_data(serde_json::to_value(info)?))
}

fn build_entry_json(index: usize, entry: &BuildEntry) -> JsonValue {
    json!({
        "index": index,
        "path": entry.path,
        "enabled": entry.enabled,
        "guid": entry.guid.to_string(),
    })
}

pub fn list_build_scenes<H: SceneHost + ?Sized>(host: &H) -> ApiResult<SceneResponse> {
    let scenes: Vec<JsonValue> = host
        .build_scenes()
        .iter()
        .enumerate()
        .map(|(i, entry)| build_entry_json(i, entry))
        .collect();
    let count = scenes.len();
    Ok(SceneResponse::ok(format!("{} scene(s) in build", count))
        .with_data(json!({ "scenes": scenes, "totalCount": count })))
}

pub fn add_build_scene<H: SceneHost + ?Sized>(host: &mut H, scene_path: &str) -> ApiResult<SceneResponse> {
    let entry = host.add_build_scene(scene_path)?;
    let index = host.build_scenes().len().saturating_sub(1);
    Ok(SceneResponse::ok(format!("Added to build: {}", scene_path))
        .with_data(build_entry_json(index, &entry)))
}

pub fn remove_build_scene<H: SceneHost + ?Sized>(host: &mut H, scene_path: &str) -> ApiResult<SceneResponse> {
    let index = host.build_scenes().iter().position(|e| e.path == scene_path);
    let entry = host.remove_build_scene(scene_path)?;
    Ok(SceneResponse::ok(format!("Removed from build: {}", scene_path))
        .with_data(build_entry_json(index.unwrap_or_default(), &entry)))
}

pub fn create_node<H: SceneHost + ?Sized>(
    host: &mut H,
    name: &str,
    parent_path: Option<&str>,
) -> ApiResult<SceneResponse> {
    let parent = match parent_path {
        Some(path) => Some(resolve_path(&*host, path)?),
        None => None,
    };
    let id = host.create_node(name, parent)?;
    let path = host.path_of(id).unwrap_or_else(|| name.to_string());
    log::info!("SceneOps: created node '{}'", path);
    Ok(SceneResponse::ok(format!("Created object: {}", path))
        .with_data(json!({ "path": path, "instanceId": id.raw() })))
}

pub fn delete_node<H: SceneHost + ?Sized>(host: &mut H, path: &str) -> ApiResult<SceneResponse> {
    let id = resolve_path(&*host, path)?;
    let removed = host.destroy_node(id)?;
    log::info!("SceneOps: deleted '{}' ({} node(s))", path, removed);
    Ok(SceneResponse::ok(format!("Deleted object: {}", path))
        .with_data(json!({ "path": path, "removed": removed })))
}

pub fn list_behaviors<H: SceneHost + ?Sized>(host: &H, path: &str) -> ApiResult<SceneResponse> {
    let id = resolve_path(&*host, path)?;
    let node = host
        .node(id)
        .ok_or_else(|| ApiError::from(SceneError::NodeNotFound(path.to_string())))?;

    let components: Vec<JsonValue> = node
        .behaviors()
        .iter()
        .map(|behavior| {
            let properties: Vec<JsonValue> = behavior
                .properties()
                .map(|(descriptor, value)| {
                    let mut entry = json!({
                        "name": descriptor.name,
                        "kind": descriptor.kind.name(),
                        "value": encode(value).to_json(),
                    });
                    if !descriptor.members.is_empty() {
                        entry["members"] = json!(descriptor.members);
                    }
                    entry
                })
                .collect();
            json!({ "name": behavior.type_name(), "properties": properties })
        })
        .collect();

    Ok(SceneResponse::ok(format!("{} component(s) on {}", components.len(), path))
        .with_data(json!({ "path": path, "components": components })))
}

pub fn add_behavior<H: SceneHost + ?Sized>(host: &mut H, path: &str, behavior_type: &str) -> ApiResult<SceneResponse> {
    let id = resolve_path(&*host, path)?;
    host.attach_behavior(id, behavior_type)?;
    log::info!("SceneOps: added {} to '{}'", behavior_type, path);
    Ok(SceneResponse::ok(format!("Added {} to {}", behavior_type, path))
        .with_data(json!({ "path": path, "componentType": behavior_type })))
}

/// Apply each entry of `properties` independently.
///
/// Unknown names are skipped, failures are collected per name, and the
/// request succeeds as long as the node and behavior exist.
pub fn set_properties<H: SceneHost + ?Sized>(
    host: &mut H,
    path: &str,
    behavior_type: &str,
    properties: &Map<String, JsonValue>,
) -> ApiResult<SceneResponse> {
    let id = resolve_path(&*host, path)?;
    let behavior = host.behavior_mut(id, behavior_type)?;

    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut errors = Map::new();

    for (name, json) in properties {
        if behavior.schema().property(name).is_none() {
            skipped.push(name.clone());
            continue;
        }
        let result = Value::try_from(json.clone())
            .map_err(SceneError::from)
            .and_then(|value| behavior.set_encoded(name, &value));
        match result {
            Ok(()) => applied.push(name.clone()),
            Err(e) => {
                let err = ApiError::from(e);
                log::debug!("SceneOps: {}.{} on '{}' rejected: {}", behavior_type, name, path, err);
                errors.insert(
                    name.clone(),
                    json!({ "error": err.code(), "message": err.to_string() }),
                );
            }
        }
    }

    if !applied.is_empty() {
        log::info!(
            "SceneOps: set {} propert{} of {} on '{}'",
            applied.len(),
            if applied.len() == 1 { "y" } else { "ies" },
            behavior_type,
            path
        );
    }

    let message = format!("Applied {} of {} properties", applied.len(), properties.len());
    Ok(SceneResponse::ok(message).with_data(json!({
        "path": path,
        "componentType": behavior_type,
        "applied": applied,
        "skipped": skipped,
        "errors": errors,
    })))
}

pub fn remove_behavior<H: SceneHost + ?Sized>(
    host: &mut H,
    path: &str,
    behavior_type: &str,
) -> ApiResult<SceneResponse> {
    let id = resolve_path(&*host, path)?;
    host.detach_behavior(id, behavior_type)?;
    log::info!("SceneOps: removed {} from '{}'", behavior_type, path);
    Ok(SceneResponse::ok(format!("Removed {} from {}", behavior_type, path))
        .with_data(json!({ "path": path, "componentType": behavior_type })))
}

pub fn find<H: SceneHost + ?Sized>(host: &H, term: &str) -> ApiResult<SceneResponse> {
    if term.trim().is_empty() {
        return Err(ApiError::BadRequest("Search term must not be empty".into()));
    }
    let paths = find_nodes(host, term);
    let count = paths.len();
    Ok(SceneResponse::ok(format!("Found {} object(s)", count))
        .with_data(json!({ "searchTerm": term, "paths": paths, "foundCount": count })))
}
