//! Hierarchy snapshots and name search

use crate::host::{SceneInfo, SceneRead};
use crate::node::NodeId;
use serde::Serialize;
use void_property::{codec, PropertyValue, Value};

/// Serializable view of one node and its subtree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub name: String,
    pub path: String,
    pub instance_id: u64,
    /// The node's own flag
    pub active: bool,
    /// False when the node or any ancestor is inactive
    pub active_in_hierarchy: bool,
    pub tag: String,
    pub layer: i32,
    pub position: Value,
    pub rotation: Value,
    pub scale: Value,
    /// Attached behavior type names
    pub components: Vec<String>,
    pub children: Vec<NodeSnapshot>,
}

/// Serializable view of the whole scene
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchySnapshot {
    #[serde(flatten)]
    pub scene: SceneInfo,
    pub root_objects: Vec<NodeSnapshot>,
    pub total_objects: usize,
}

/// Capture the current hierarchy
pub fn snapshot<G: SceneRead + ?Sized>(graph: &G, scene: SceneInfo) -> HierarchySnapshot {
    // Pre-order walk; each entry remembers the slot of its parent
    let mut flat: Vec<(Option<usize>, NodeSnapshot)> = Vec::new();
    let mut stack: Vec<(NodeId, Option<usize>, bool)> = graph
        .root_nodes()
        .iter()
        .rev()
        .map(|id| (*id, None, true))
        .collect();

    while let Some((id, parent, parent_active)) = stack.pop() {
        let parent_path = parent.map(|slot| flat[slot].1.path.as_str());
        let Some(snapshot) = node_snapshot(graph, id, parent_path, parent_active) else {
            continue;
        };
        let slot = flat.len();
        let active = snapshot.active_in_hierarchy;
        if let Some(node) = graph.node(id) {
            stack.extend(node.children().iter().rev().map(|child| (*child, Some(slot), active)));
        }
        flat.push((parent, snapshot));
    }

    let total_objects = flat.len();
    let root_objects = assemble(flat);

    HierarchySnapshot {
        scene,
        root_objects,
        total_objects,
    }
}

/// Fold a pre-order list back into trees.
///
/// Every node sits after its parent, so walking backwards finishes each
/// subtree before its parent is taken.
fn assemble(flat: Vec<(Option<usize>, NodeSnapshot)>) -> Vec<NodeSnapshot> {
    let parents: Vec<Option<usize>> = flat.iter().map(|(parent, _)| *parent).collect();
    let mut slots: Vec<Option<NodeSnapshot>> = flat.into_iter().map(|(_, node)| Some(node)).collect();
    let mut roots = Vec::new();

    for slot in (0..slots.len()).rev() {
        let Some(mut node) = slots[slot].take() else {
            continue;
        };
        node.children.reverse();
        match parents[slot] {
            Some(parent) => {
                if let Some(parent) = slots[parent].as_mut() {
                    parent.children.push(node);
                }
            }
            None => roots.push(node),
        }
    }
    roots.reverse();
    roots
}

fn node_snapshot<G: SceneRead + ?Sized>(
    graph: &G,
    id: NodeId,
    parent_path: Option<&str>,
    parent_active: bool,
) -> Option<NodeSnapshot> {
    let node = graph.node(id)?;
    let path = match parent_path {
        Some(parent) => format!("{}/{}", parent, node.name()),
        None => node.name().to_string(),
    };
    let transform = node.transform();

    Some(NodeSnapshot {
        name: node.name().to_string(),
        path,
        instance_id: id.raw(),
        active: node.is_active(),
        active_in_hierarchy: parent_active && node.is_active(),
        tag: node.tag().to_string(),
        layer: node.layer(),
        position: codec::encode(&PropertyValue::Vector3(transform.position)),
        rotation: codec::encode(&PropertyValue::Quaternion(transform.rotation)),
        scale: codec::encode(&PropertyValue::Vector3(transform.scale)),
        components: node
            .behaviors()
            .iter()
            .map(|b| b.type_name().to_string())
            .collect(),
        children: Vec::new(),
    })
}

/// Paths of every node whose name contains `term`, ignoring case.
///
/// Nodes are visited depth-first in root and child order.
pub fn find_nodes<G: SceneRead + ?Sized>(graph: &G, term: &str) -> Vec<String> {
    let needle = term.to_lowercase();
    let mut found = Vec::new();
    let mut stack: Vec<(NodeId, String)> = graph
        .root_nodes()
        .iter()
        .rev()
        .filter_map(|id| graph.node_name(*id).map(|name| (*id, name.to_string())))
        .collect();

    while let Some((id, path)) = stack.pop() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        for child in node.children().iter().rev() {
            if let Some(name) = graph.node_name(*child) {
                stack.push((*child, format!("{}/{}", path, name)));
            }
        }
        if node.name().to_lowercase().contains(&needle) {
            found.push(path);
        }
    }
    found
}
