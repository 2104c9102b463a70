//! Remote requests
//!
//! [`SceneRequest`] is the transport-neutral form of every remote
//! operation. The body structs are the JSON shapes the HTTP routes accept;
//! field names are camelCase and `componentType` is also accepted as
//! `behaviorType`.

use serde::Deserialize;
use std::fmt;

/// Default name for nodes created without one
pub const DEFAULT_NODE_NAME: &str = "GameObject";

/// A remote operation on the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRequest {
    GetHierarchy,
    OpenScene {
        scene_path: String,
    },
    SaveScene {
        scene_path: Option<String>,
    },
    ListBuildScenes,
    AddBuildScene {
        scene_path: String,
    },
    RemoveBuildScene {
        scene_path: String,
    },
    CreateNode {
        name: String,
        parent_path: Option<String>,
    },
    DeleteNode {
        path: String,
    },
    ListBehaviors {
        path: String,
    },
    AddBehavior {
        path: String,
        behavior_type: String,
    },
    /// Set several properties of one behavior; each entry succeeds or fails
    /// on its own.
    SetProperties {
        path: String,
        behavior_type: String,
        properties: serde_json::Map<String, serde_json::Value>,
    },
    RemoveBehavior {
        path: String,
        behavior_type: String,
    },
    FindNodes {
        term: String,
    },
}

impl SceneRequest {
    /// Operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            SceneRequest::GetHierarchy => "GetHierarchy",
            SceneRequest::OpenScene { .. } => "OpenScene",
            SceneRequest::SaveScene { .. } => "SaveScene",
            SceneRequest::ListBuildScenes => "ListBuildScenes",
            SceneRequest::AddBuildScene { .. } => "AddBuildScene",
            SceneRequest::RemoveBuildScene { .. } => "RemoveBuildScene",
            SceneRequest::CreateNode { .. } => "CreateNode",
            SceneRequest::DeleteNode { .. } => "DeleteNode",
            SceneRequest::ListBehaviors { .. } => "ListBehaviors",
            SceneRequest::AddBehavior { .. } => "AddBehavior",
            SceneRequest::SetProperties { .. } => "SetProperties",
            SceneRequest::RemoveBehavior { .. } => "RemoveBehavior",
            SceneRequest::FindNodes { .. } => "FindNodes",
        }
    }

    /// Whether the operation changes the scene, its file or the build list
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            SceneRequest::GetHierarchy
                | SceneRequest::ListBuildScenes
                | SceneRequest::ListBehaviors { .. }
                | SceneRequest::FindNodes { .. }
        )
    }

    /// Node path the request targets, if any
    pub fn target_path(&self) -> Option<&str> {
        match self {
            SceneRequest::DeleteNode { path }
            | SceneRequest::ListBehaviors { path }
            | SceneRequest::AddBehavior { path, .. }
            | SceneRequest::SetProperties { path, .. }
            | SceneRequest::RemoveBehavior { path, .. } => Some(path),
            SceneRequest::CreateNode { parent_path, .. } => parent_path.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for SceneRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_path() {
            Some(path) => write!(f, "{} '{}'", self.op_name(), path),
            None => f.write_str(self.op_name()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePathBody {
    pub scene_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSceneBody {
    #[serde(default)]
    pub scene_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NodePathBody {
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorBody {
    pub path: String,
    #[serde(rename = "componentType", alias = "behaviorType")]
    pub behavior_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPropertiesBody {
    pub path: String,
    #[serde(rename = "componentType", alias = "behaviorType")]
    pub behavior_type: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl From<ScenePathBody> for SceneRequest {
    fn from(body: ScenePathBody) -> Self {
        SceneRequest::OpenScene {
            scene_path: body.scene_path,
        }
    }
}

impl From<SaveSceneBody> for SceneRequest {
    fn from(body: SaveSceneBody) -> Self {
        SceneRequest::SaveScene {
            scene_path: body.scene_path.filter(|p| !p.is_empty()),
        }
    }
}

impl From<CreateNodeBody> for SceneRequest {
    fn from(body: CreateNodeBody) -> Self {
        SceneRequest::CreateNode {
            name: body
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_NODE_NAME.to_string()),
            parent_path: body.parent_path.filter(|p| !p.is_empty()),
        }
    }
}

impl From<SetPropertiesBody> for SceneRequest {
    fn from(body: SetPropertiesBody) -> Self {
        SceneRequest::SetProperties {
            path: body.path,
            behavior_type: body.behavior_type,
            properties: body.properties,
        }
    }
}
