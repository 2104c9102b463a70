//! Build scene list
//!
//! The ordered list of scenes included in a build, stored as
//! `{"scenes": [{"path", "enabled", "guid"}]}`.

use crate::error::{SceneError, SceneResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One scene in the build list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEntry {
    /// Scene file path, relative to the project directory
    pub path: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub guid: Uuid,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BuildListFile {
    #[serde(default)]
    scenes: Vec<BuildEntry>,
}

/// Ordered build list, optionally backed by a file
#[derive(Debug, Default)]
pub struct BuildList {
    entries: Vec<BuildEntry>,
    file: Option<PathBuf>,
}

impl BuildList {
    /// Create an in-memory list
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list from `file`. A missing file gives an empty list that
    /// will be written there on the first change.
    pub fn load(file: impl Into<PathBuf>) -> SceneResult<Self> {
        let file = file.into();
        let entries = if file.is_file() {
            let text = std::fs::read_to_string(&file)?;
            serde_json::from_str::<BuildListFile>(&text)?.scenes
        } else {
            Vec::new()
        };
        log::debug!(
            "BuildList: loaded {} scene(s) from {}",
            entries.len(),
            file.display()
        );
        Ok(Self {
            entries,
            file: Some(file),
        })
    }

    pub fn entries(&self) -> &[BuildEntry] {
        &self.entries
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Append an enabled entry with a fresh guid
    pub fn add(&mut self, path: &str) -> SceneResult<BuildEntry> {
        if self.contains(path) {
            return Err(SceneError::AlreadyInBuild(path.to_string()));
        }
        let entry = BuildEntry {
            path: path.to_string(),
            enabled: true,
            guid: Uuid::new_v4(),
        };
        self.entries.push(entry.clone());
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(entry)
    }

    /// Remove an entry by path
    pub fn remove(&mut self, path: &str) -> SceneResult<BuildEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.path == path)
            .ok_or_else(|| SceneError::NotInBuild(path.to_string()))?;
        let entry = self.entries.remove(index);
        if let Err(e) = self.save() {
            self.entries.insert(index, entry);
            return Err(e);
        }
        Ok(entry)
    }

    /// Write the list to its backing file, if any
    pub fn save(&self) -> SceneResult<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };
        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = BuildListFile {
            scenes: self.entries.clone(),
        };
        std::fs::write(file, serde_json::to_string_pretty(&contents)?)?;
        Ok(())
    }
}
