//! In-memory scene graph

use crate::behavior::Behavior;
use crate::error::{SceneError, SceneResult};
use crate::host::SceneRead;
use crate::node::{Node, NodeId};
use crate::schema::BehaviorRegistry;
use std::collections::HashMap;
use std::sync::Arc;

/// Deepest allowed nesting, counting a root as depth 1.
///
/// Scene files of this depth stay inside the JSON reader's nesting limit.
pub const MAX_DEPTH: usize = 48;

/// A forest of nodes with ordered roots and children
#[derive(Debug, Clone)]
pub struct SceneGraph {
    name: String,
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    registry: Arc<BehaviorRegistry>,
    next_id: u64,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new(name: impl Into<String>, registry: Arc<BehaviorRegistry>) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
            roots: Vec::new(),
            registry,
            next_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn registry(&self) -> &Arc<BehaviorRegistry> {
        &self.registry
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Create a node with the pinned behaviors attached.
    ///
    /// With a parent the node becomes its last child, otherwise the last root.
    pub fn create_node(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> SceneResult<NodeId> {
        if let Some(parent) = parent {
            match self.depth_of(parent) {
                None => return Err(SceneError::NodeNotFound(parent.to_string())),
                Some(depth) if depth >= MAX_DEPTH => return Err(SceneError::TooDeep(MAX_DEPTH)),
                Some(_) => {}
            }
        }

        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;

        let mut node = Node::new(id, name.into(), parent);
        node.behaviors = self
            .registry
            .pinned()
            .map(|schema| Behavior::new(schema.clone()))
            .collect();
        self.nodes.insert(id, node);

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Destroy a node and everything below it
    pub fn destroy_node(&mut self, id: NodeId) -> SceneResult<usize> {
        let parent = match self.nodes.get(&id) {
            Some(node) => node.parent,
            None => return Err(SceneError::NodeNotFound(id.to_string())),
        };

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(parent) => parent.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Attach a new instance of a registered behavior type
    pub fn attach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<&mut Behavior> {
        let schema = self
            .registry
            .get(type_name)
            .ok_or_else(|| SceneError::UnknownBehaviorType(type_name.to_string()))?;
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NodeNotFound(id.to_string()))?;

        if node.has_behavior(type_name) {
            return Err(SceneError::DuplicateBehavior {
                node: node.name.clone(),
                behavior: type_name.to_string(),
            });
        }

        node.behaviors.push(Behavior::new(schema));
        let index = node.behaviors.len() - 1;
        Ok(&mut node.behaviors[index])
    }

    /// Remove a behavior from a node
    pub fn detach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<Behavior> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NodeNotFound(id.to_string()))?;
        let index = node
            .behaviors
            .iter()
            .position(|b| b.type_name() == type_name)
            .ok_or_else(|| SceneError::BehaviorNotFound {
                node: node.name.clone(),
                behavior: type_name.to_string(),
            })?;

        if node.behaviors[index].schema().is_pinned() {
            return Err(SceneError::PinnedBehavior(type_name.to_string()));
        }
        Ok(node.behaviors.remove(index))
    }

    /// Look up an attached behavior for writing
    pub fn behavior_mut(&mut self, id: NodeId, type_name: &str) -> SceneResult<&mut Behavior> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| SceneError::NodeNotFound(id.to_string()))?;
        let node_name = node.name.clone();
        node.behavior_mut(type_name)
            .ok_or(SceneError::BehaviorNotFound {
                node: node_name,
                behavior: type_name.to_string(),
            })
    }

    /// Depth of a node, 1 for roots
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        let mut node = self.nodes.get(&id)?;
        let mut depth = 1;
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(&p)) {
            depth += 1;
            node = parent;
        }
        Some(depth)
    }

    /// All node ids in depth-first pre-order
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }
}

impl SceneRead for SceneGraph {
    fn root_nodes(&self) -> &[NodeId] {
        &self.roots
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::TRANSFORM;

    fn graph() -> SceneGraph {
        SceneGraph::new("Test", Arc::new(BehaviorRegistry::with_builtin()))
    }

    #[test]
    fn test_create_orders_roots_and_children() {
        let mut graph = graph();
        let a = graph.create_node("A", None).unwrap();
        let b = graph.create_node("B", None).unwrap();
        let a1 = graph.create_node("A1", Some(a)).unwrap();
        let a2 = graph.create_node("A2", Some(a)).unwrap();

        assert_eq!(graph.root_nodes(), &[a, b]);
        assert_eq!(graph.child_nodes(a), Some(&[a1, a2][..]));
        assert_eq!(graph.node(a2).unwrap().parent(), Some(a));
        assert_eq!(graph.path_of(a2).as_deref(), Some("A/A2"));
        assert_eq!(graph.depth_first(), vec![a, a1, a2, b]);
    }

    #[test]
    fn test_create_attaches_pinned() {
        let mut graph = graph();
        let a = graph.create_node("A", None).unwrap();
        let node = graph.node(a).unwrap();
        assert!(node.has_behavior(TRANSFORM));
        assert_eq!(node.behaviors().len(), 1);
    }

    #[test]
    fn test_create_under_missing_parent() {
        let mut graph = graph();
        let err = graph.create_node("A", Some(NodeId::from_raw(99))).unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(_)));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_create_beyond_max_depth() {
        let mut graph = graph();
        let mut parent = None;
        for depth in 1..=MAX_DEPTH {
            let id = graph.create_node(format!("N{}", depth), parent).unwrap();
            assert_eq!(graph.depth_of(id), Some(depth));
            parent = Some(id);
        }

        let err = graph.create_node("Deeper", parent).unwrap_err();
        assert!(matches!(err, SceneError::TooDeep(MAX_DEPTH)));
        assert_eq!(graph.len(), MAX_DEPTH);
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut graph = graph();
        let a = graph.create_node("A", None).unwrap();
        let a1 = graph.create_node("A1", Some(a)).unwrap();
        graph.create_node("A1x", Some(a1)).unwrap();
        let b = graph.create_node("B", None).unwrap();

        assert_eq!(graph.destroy_node(a1).unwrap(), 2);
        assert_eq!(graph.child_nodes(a), Some(&[][..]));
        assert_eq!(graph.len(), 2);

        assert_eq!(graph.destroy_node(a).unwrap(), 1);
        assert_eq!(graph.root_nodes(), &[b]);
        assert!(graph.node(a).is_none());
        assert!(matches!(graph.destroy_node(a), Err(SceneError::NodeNotFound(_))));
    }

    #[test]
    fn test_ids_not_reused() {
        let mut graph = graph();
        let a = graph.create_node("A", None).unwrap();
        graph.destroy_node(a).unwrap();
        let b = graph.create_node("A", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_attach_detach() {
        let mut graph = graph();
        let a = graph.create_node("A", None).unwrap();

        graph.attach_behavior(a, "Light").unwrap();
        assert!(matches!(
            graph.attach_behavior(a, "Light"),
            Err(SceneError::DuplicateBehavior { .. })
        ));
        assert!(matches!(
            graph.attach_behavior(a, "Warp"),
            Err(SceneError::UnknownBehaviorType(_))
        ));
        assert_eq!(graph.node(a).unwrap().behaviors().len(), 2);

        let removed = graph.detach_behavior(a, "Light").unwrap();
        assert_eq!(removed.type_name(), "Light");
        assert!(matches!(
            graph.detach_behavior(a, "Light"),
            Err(SceneError::BehaviorNotFound { .. })
        ));
        assert!(matches!(
            graph.detach_behavior(a, TRANSFORM),
            Err(SceneError::PinnedBehavior(_))
        ));
    }
}
