//! Scene errors

use thiserror::Error;
use void_property::{CodecError, PropertyKind};

/// Errors raised by the scene graph and its persistence
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Behavior '{behavior}' not found on '{node}'")]
    BehaviorNotFound { node: String, behavior: String },

    #[error("Property '{property}' not found on behavior '{behavior}'")]
    PropertyNotFound { behavior: String, property: String },

    #[error("Behavior '{behavior}' already exists on '{node}'")]
    DuplicateBehavior { node: String, behavior: String },

    #[error("Node would exceed the maximum depth of {0}")]
    TooDeep(usize),

    #[error("Unknown behavior type: {0}")]
    UnknownBehaviorType(String),

    #[error("Behavior '{0}' cannot be removed")]
    PinnedBehavior(String),

    #[error("Property '{property}' expects {expected}, got {actual}")]
    KindMismatch {
        property: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Scene file not found: {0}")]
    SceneFileNotFound(String),

    #[error("Scene has no file path")]
    NoScenePath,

    #[error("Scene already in build list: {0}")]
    AlreadyInBuild(String),

    #[error("Scene not in build list: {0}")]
    NotInBuild(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;
