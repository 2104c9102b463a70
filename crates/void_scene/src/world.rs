//! The owning context's scene state
//!
//! `SceneWorld` bundles the open graph, the project directory scene paths
//! are relative to, and the build list. It is the [`SceneHost`] remote
//! operations run against.

use crate::behavior::Behavior;
use crate::build_list::{BuildEntry, BuildList};
use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::host::{SceneHost, SceneInfo, SceneRead};
use crate::node::{Node, NodeId};
use crate::scene_file::SceneFile;
use crate::schema::BehaviorRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct SceneWorld {
    registry: Arc<BehaviorRegistry>,
    graph: SceneGraph,
    scene_path: Option<String>,
    project_dir: PathBuf,
    builds: BuildList,
}

impl SceneWorld {
    /// Create a world with an empty, unsaved scene
    pub fn new(registry: Arc<BehaviorRegistry>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            graph: SceneGraph::new("Untitled", registry.clone()),
            registry,
            scene_path: None,
            project_dir: project_dir.into(),
            builds: BuildList::new(),
        }
    }

    /// Use `builds` as the build list
    pub fn with_build_list(mut self, builds: BuildList) -> Self {
        self.builds = builds;
        self
    }

    pub fn registry(&self) -> &Arc<BehaviorRegistry> {
        &self.registry
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn resolve_file(&self, path: &str) -> PathBuf {
        self.project_dir.join(path)
    }
}

impl SceneRead for SceneWorld {
    fn root_nodes(&self) -> &[NodeId] {
        self.graph.root_nodes()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }
}

impl SceneHost for SceneWorld {
    fn scene_info(&self) -> SceneInfo {
        SceneInfo {
            scene_name: self.graph.name().to_string(),
            scene_path: self.scene_path.clone(),
        }
    }

    fn create_node(&mut self, name: &str, parent: Option<NodeId>) -> SceneResult<NodeId> {
        self.graph.create_node(name, parent)
    }

    fn destroy_node(&mut self, id: NodeId) -> SceneResult<usize> {
        self.graph.destroy_node(id)
    }

    fn attach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<()> {
        self.graph.attach_behavior(id, type_name).map(|_| ())
    }

    fn detach_behavior(&mut self, id: NodeId, type_name: &str) -> SceneResult<()> {
        self.graph.detach_behavior(id, type_name).map(|_| ())
    }

    fn behavior_mut(&mut self, id: NodeId, type_name: &str) -> SceneResult<&mut Behavior> {
        self.graph.behavior_mut(id, type_name)
    }

    fn open_scene(&mut self, path: &str) -> SceneResult<SceneInfo> {
        let file = SceneFile::load(&self.resolve_file(path))?;
        self.graph = file.instantiate(self.registry.clone())?;
        self.scene_path = Some(path.to_string());
        log::info!("SceneWorld: opened scene '{}' from {}", self.graph.name(), path);
        Ok(self.scene_info())
    }

    fn save_scene(&mut self, path: Option<&str>) -> SceneResult<SceneInfo> {
        let path = match path {
            Some(path) => path.to_string(),
            None => self.scene_path.clone().ok_or(SceneError::NoScenePath)?,
        };
        SceneFile::capture(&self.graph).save(&self.resolve_file(&path))?;
        self.scene_path = Some(path);
        log::info!("SceneWorld: saved scene '{}'", self.graph.name());
        Ok(self.scene_info())
    }

    fn build_scenes(&self) -> &[BuildEntry] {
        self.builds.entries()
    }

    fn add_build_scene(&mut self, path: &str) -> SceneResult<BuildEntry> {
        if !self.resolve_file(path).is_file() {
            return Err(SceneError::SceneFileNotFound(path.to_string()));
        }
        let entry = self.builds.add(path)?;
        log::info!("SceneWorld: added {} to build list", path);
        Ok(entry)
    }

    fn remove_build_scene(&mut self, path: &str) -> SceneResult<BuildEntry> {
        let entry = self.builds.remove(path)?;
        log::info!("SceneWorld: removed {} from build list", path);
        Ok(entry)
    }
}
