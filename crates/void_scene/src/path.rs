//! Path-based node resolution
//!
//! A path is the slash-joined list of names from a root to a node, e.g.
//! `Player/Arm/Hand`. Resolution walks one segment at a time:
//!
//! 1. the first segment picks the first root, in root order, with that name
//! 2. each later segment picks the first direct child with that name
//! 3. a segment with no match stops the walk with `NodeNotFound`
//!
//! There is no backtracking. With two siblings named `A`, `A/x` only looks
//! below the first one, even if `x` exists under the second.

use crate::error::{SceneError, SceneResult};
use crate::host::SceneRead;
use crate::node::NodeId;
use std::fmt;

/// Parsed slash-delimited node path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    segments: Vec<String>,
}

impl PathExpression {
    /// Split a path on `/`. The empty string has no segments.
    pub fn parse(path: &str) -> Self {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_string).collect()
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Resolve a path against a graph
pub fn resolve<G: SceneRead + ?Sized>(graph: &G, path: &PathExpression) -> SceneResult<NodeId> {
    let not_found = || SceneError::NodeNotFound(path.to_string());

    let mut segments = path.segments.iter();
    let first = segments.next().ok_or_else(not_found)?;
    if first.is_empty() {
        return Err(not_found());
    }

    let mut current = first_named(graph, graph.root_nodes(), first).ok_or_else(not_found)?;
    for segment in segments {
        if segment.is_empty() {
            return Err(not_found());
        }
        // A node destroyed mid-walk has no children to search.
        let children = graph.child_nodes(current).ok_or_else(not_found)?;
        current = first_named(graph, children, segment).ok_or_else(not_found)?;
    }
    Ok(current)
}

/// Parse and resolve in one step
pub fn resolve_path<G: SceneRead + ?Sized>(graph: &G, path: &str) -> SceneResult<NodeId> {
    resolve(graph, &PathExpression::parse(path))
}

fn first_named<G: SceneRead + ?Sized>(graph: &G, candidates: &[NodeId], name: &str) -> Option<NodeId> {
    candidates
        .iter()
        .copied()
        .find(|id| graph.node_name(*id) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SceneGraph;
    use crate::schema::BehaviorRegistry;
    use std::sync::Arc;

    fn graph() -> SceneGraph {
        SceneGraph::new("Test", Arc::new(BehaviorRegistry::with_builtin()))
    }

    #[test]
    fn test_parse() {
        assert!(PathExpression::parse("").is_empty());
        assert_eq!(PathExpression::parse("A/B").segments(), &["A", "B"]);
        assert_eq!(PathExpression::parse("A//B").segments().len(), 3);
        assert_eq!(PathExpression::parse("A/B").to_string(), "A/B");
    }

    #[test]
    fn test_empty_path_not_found() {
        let mut graph = graph();
        graph.create_node("A", None).unwrap();
        assert!(matches!(resolve_path(&graph, ""), Err(SceneError::NodeNotFound(_))));
        assert!(resolve_path(&graph, "/A").is_err());
        assert!(resolve_path(&graph, "A/").is_err());
    }

    #[test]
    fn test_first_root_wins() {
        let mut graph = graph();
        let first = graph.create_node("A", None).unwrap();
        graph.create_node("A", None).unwrap();
        graph.create_node("B", None).unwrap();

        for _ in 0..10 {
            assert_eq!(resolve_path(&graph, "A").unwrap(), first);
        }
    }

    #[test]
    fn test_nested() {
        let mut graph = graph();
        let player = graph.create_node("Player", None).unwrap();
        let arm = graph.create_node("Arm", Some(player)).unwrap();
        let hand = graph.create_node("Hand", Some(arm)).unwrap();

        assert_eq!(resolve_path(&graph, "Player/Arm").unwrap(), arm);
        assert_eq!(resolve_path(&graph, "Player/Arm/Hand").unwrap(), hand);
        assert!(resolve_path(&graph, "Arm").is_err());
        assert!(resolve_path(&graph, "Player/Hand").is_err());
    }

    #[test]
    fn test_no_backtracking() {
        let mut graph = graph();
        graph.create_node("A", None).unwrap();
        let second = graph.create_node("A", None).unwrap();
        graph.create_node("x", Some(second)).unwrap();

        assert!(matches!(resolve_path(&graph, "A/x"), Err(SceneError::NodeNotFound(p)) if p == "A/x"));
    }

    #[test]
    fn test_first_child_wins() {
        let mut graph = graph();
        let root = graph.create_node("Root", None).unwrap();
        let first = graph.create_node("Twin", Some(root)).unwrap();
        graph.create_node("Twin", Some(root)).unwrap();
        assert_eq!(resolve_path(&graph, "Root/Twin").unwrap(), first);
    }

    /// Read view whose children point at a node that no longer exists
    struct Dangling {
        inner: SceneGraph,
        root: NodeId,
        ghost: Vec<NodeId>,
    }

    impl SceneRead for Dangling {
        fn root_nodes(&self) -> &[NodeId] {
            self.inner.root_nodes()
        }

        fn node(&self, id: NodeId) -> Option<&crate::node::Node> {
            self.inner.node(id)
        }

        fn child_nodes(&self, id: NodeId) -> Option<&[NodeId]> {
            if id == self.root {
                Some(self.ghost.as_slice())
            } else {
                self.inner.child_nodes(id)
            }
        }
    }

    #[test]
    fn test_vanished_node_not_found() {
        let mut inner = graph();
        let root = inner.create_node("Root", None).unwrap();
        let view = Dangling {
            inner,
            root,
            ghost: vec![NodeId::from_raw(404)],
        };
        assert!(matches!(resolve_path(&view, "Root/Gone"), Err(SceneError::NodeNotFound(_))));
    }
}
