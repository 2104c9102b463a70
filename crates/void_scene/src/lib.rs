//! # Void Scene - Scene Graph Model
//!
//! The scene is a forest of named nodes. Each node carries an ordered list of
//! children and a set of behaviors; each behavior is a bundle of typed
//! properties described by a [`BehaviorSchema`] registered up front.
//!
//! ## Architecture
//!
//! ```text
//! BehaviorRegistry ──► BehaviorSchema (descriptor table, built once)
//!                            │
//! SceneWorld ──► SceneGraph ──► Node ──► Behavior ──► PropertyValue
//!     │                           ▲
//!     ├──► BuildList              └── resolve("Player/Arm") via SceneRead
//!     └──► SceneFile (JSON load/save)
//! ```
//!
//! ## Key Concepts
//!
//! - **SceneRead**: the read-only view path resolution and snapshots use
//! - **SceneHost**: everything remote operations need, reads and writes
//! - **PathExpression**: slash-delimited names, resolved first-match with no
//!   backtracking. Paths are not unique; duplicate sibling names shadow
//!   later siblings.

pub mod behavior;
pub mod build_list;
pub mod builtin;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod host;
pub mod node;
pub mod path;
pub mod scene_file;
pub mod schema;
pub mod world;

pub use behavior::Behavior;
pub use build_list::{BuildEntry, BuildList};
pub use builtin::{builtin_schemas, TRANSFORM};
pub use error::{SceneError, SceneResult};
pub use graph::{SceneGraph, MAX_DEPTH};
pub use hierarchy::{find_nodes, snapshot, HierarchySnapshot, NodeSnapshot};
pub use host::{SceneHost, SceneInfo, SceneRead};
pub use node::{Node, NodeId, Transform};
pub use path::{resolve, resolve_path, PathExpression};
pub use scene_file::{BehaviorDef, NodeDef, SceneFile, TransformDef};
pub use schema::{BehaviorRegistry, BehaviorSchema, BehaviorSchemaBuilder, PropertyDescriptor};
pub use world::SceneWorld;
