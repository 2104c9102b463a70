//! Host interfaces
//!
//! Remote operations only see the scene through these traits. [`SceneRead`]
//! is enough for path resolution and snapshots; [`SceneHost`] adds the
//! structural mutations, scene persistence and the build list.

use crate::behavior::Behavior;
use crate::build_list::BuildEntry;
use crate::error::SceneResult;
use crate::node::{Node, NodeId};
use serde::Serialize;

/// Read-only view of a scene graph
pub trait SceneRead {
    /// Root nodes in their stable order
    fn root_nodes(&self) -> &[NodeId];

    /// Look up a node. `None` once the node has been destroyed.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Children of a node in their stable order
    fn child_nodes(&self, id: NodeId) -> Option<&[NodeId]> {
        self.node(id).map(Node::children)
    }

    fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    /// Slash-joined names from the root down to `id`
    fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            names.push(node.name());
            current = node.parent();
        }
        names.reverse();
        Some(names.join("/"))
    }
}

/// Name and file of the open scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInfo {
    pub scene_name: String,
    pub scene_path: Option<String>,
}

/// Everything remote operations may do to the scene
pub trait SceneHost: SceneRead {
    fn scene_info(&self) -> SceneInfo;

    /// Create a node under `parent`, or as the last root
    fn create_node(&mut self, name: &str, parent: Option<NodeId>) -> SceneResult<NodeId>;

    /// Destroy a node and its subtree, returning the number of nodes removed
    fn destroy_node(&mut self, id: NodeId) -> SceneResult<usize>;

    fn attach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<()>;

    fn detach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<()>;

    fn behavior_mut(&mut self, id: NodeId, type_name: &str) -> SceneResult<&mut Behavior>;

    /// Replace the graph with the scene stored at `path`
    fn open_scene(&mut self, path: &str) -> SceneResult<SceneInfo>;

    /// Write the graph to `path`, or to the file it was opened from
    fn save_scene(&mut self, path: Option<&str>) -> SceneResult<SceneInfo>;

    fn build_scenes(&self) -> &[BuildEntry];

    fn add_build_scene(&mut self, path: &str) -> SceneResult<BuildEntry>;

    fn remove_build_scene(&mut self, path: &str) -> SceneResult<BuildEntry>;
}
