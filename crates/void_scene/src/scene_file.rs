//! JSON scene files
//!
//! ```json
//! { "name": "Main",
//!   "nodes": [ { "name": "Player", "tag": "Player",
//!                "transform": { "position": [0, 1, 0] },
//!                "behaviors": [ { "type": "Light", "properties": { "intensity": 2.0 } } ],
//!                "children": [] } ] }
//! ```
//!
//! Property values use the same transport shapes as remote requests. A
//! property that fails to decode is logged and skipped; an unregistered
//! behavior type fails the whole load.

use crate::builtin::TRANSFORM;
use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::host::SceneRead;
use crate::node::{Node, NodeId, Transform};
use crate::schema::BehaviorRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use void_property::{codec, Quaternion, Value, Vector3};

/// Scene definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFile {
    /// Scene name
    pub name: String,
    /// Root nodes
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

/// Node definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub layer: i32,
    #[serde(default)]
    pub transform: TransformDef,
    #[serde(default)]
    pub behaviors: Vec<BehaviorDef>,
    #[serde(default)]
    pub children: Vec<NodeDef>,
}

/// Transform definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformDef {
    #[serde(default)]
    pub position: [f32; 3],
    /// Quaternion (x, y, z, w)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

/// Behavior definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BehaviorDef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

fn default_tag() -> String {
    "Untagged".to_string()
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for TransformDef {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl From<&TransformDef> for Transform {
    fn from(def: &TransformDef) -> Self {
        Self {
            position: Vector3::from(def.position),
            rotation: Quaternion::from(def.rotation),
            scale: Vector3::from(def.scale),
        }
    }
}

impl From<Transform> for TransformDef {
    fn from(transform: Transform) -> Self {
        Self {
            position: transform.position.to_array(),
            rotation: transform.rotation.to_array(),
            scale: transform.scale.to_array(),
        }
    }
}

impl SceneFile {
    /// Create an empty scene
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Parse a scene from JSON text
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a scene file
    pub fn load(path: &Path) -> SceneResult<Self> {
        if !path.is_file() {
            return Err(SceneError::SceneFileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the scene as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> SceneResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Build a graph from this definition
    pub fn instantiate(&self, registry: Arc<BehaviorRegistry>) -> SceneResult<SceneGraph> {
        let mut graph = SceneGraph::new(self.name.clone(), registry);
        let mut stack: Vec<(&NodeDef, Option<NodeId>)> =
            self.nodes.iter().rev().map(|def| (def, None)).collect();
        while let Some((def, parent)) = stack.pop() {
            let id = spawn(&mut graph, def, parent)?;
            stack.extend(def.children.iter().rev().map(|child| (child, Some(id))));
        }
        log::info!(
            "SceneFile: instantiated '{}' with {} node(s)",
            self.name,
            graph.len()
        );
        Ok(graph)
    }

    /// Capture a graph as a definition.
    ///
    /// Encode-only properties (object references, curves, gradients) are
    /// left out since they cannot be read back.
    pub fn capture(graph: &SceneGraph) -> Self {
        let order = graph.depth_first();
        let mut slots: Vec<Option<NodeDef>> = order
            .iter()
            .map(|id| graph.node(*id).map(capture_node))
            .collect();
        let index: HashMap<NodeId, usize> = order
            .iter()
            .enumerate()
            .map(|(slot, id)| (*id, slot))
            .collect();

        // Children come after their parent in pre-order, so a backwards
        // pass completes every subtree before moving it into its parent.
        let mut nodes = Vec::new();
        for slot in (0..order.len()).rev() {
            let Some(mut def) = slots[slot].take() else {
                continue;
            };
            def.children.reverse();
            let parent = graph
                .node(order[slot])
                .and_then(|node| node.parent())
                .and_then(|parent| index.get(&parent).copied());
            match parent {
                Some(parent) => {
                    if let Some(parent) = slots[parent].as_mut() {
                        parent.children.push(def);
                    }
                }
                None => nodes.push(def),
            }
        }
        nodes.reverse();

        Self {
            name: graph.name().to_string(),
            nodes,
        }
    }
}

/// Create one node from its definition, without its children
fn spawn(graph: &mut SceneGraph, def: &NodeDef, parent: Option<NodeId>) -> SceneResult<NodeId> {
    let id = graph.create_node(def.name.clone(), parent)?;
    if let Some(node) = graph.node_mut(id) {
        node.set_active(def.active);
        node.set_tag(def.tag.clone());
        node.set_layer(def.layer);
        if let Err(e) = node.set_transform(Transform::from(&def.transform)) {
            log::warn!("SceneFile: keeping default transform on '{}': {}", def.name, e);
        }
    }

    for behavior_def in &def.behaviors {
        let has_behavior = graph
            .node(id)
            .is_some_and(|node| node.has_behavior(&behavior_def.type_name));
        let behavior = if has_behavior {
            graph.behavior_mut(id, &behavior_def.type_name)?
        } else {
            graph.attach_behavior(id, &behavior_def.type_name)?
        };

        for (name, json) in &behavior_def.properties {
            let result = Value::try_from(json.clone())
                .map_err(SceneError::from)
                .and_then(|value| behavior.set_encoded(name, &value));
            if let Err(e) = result {
                log::warn!(
                    "SceneFile: skipping {}.{} on '{}': {}",
                    behavior_def.type_name,
                    name,
                    def.name,
                    e
                );
            }
        }
    }
    Ok(id)
}

/// One node's definition with no children filled in
fn capture_node(node: &Node) -> NodeDef {
    let behaviors = node
        .behaviors()
        .iter()
        .filter(|b| b.type_name() != TRANSFORM)
        .map(|behavior| BehaviorDef {
            type_name: behavior.type_name().to_string(),
            properties: behavior
                .properties()
                .filter(|(descriptor, _)| descriptor.kind.is_writable())
                .map(|(descriptor, value)| (descriptor.name.clone(), codec::encode(value).to_json()))
                .collect(),
        })
        .collect();

    NodeDef {
        name: node.name().to_string(),
        active: node.is_active(),
        tag: node.tag().to_string(),
        layer: node.layer(),
        transform: TransformDef::from(node.transform()),
        behaviors,
        children: Vec::new(),
    }
}
