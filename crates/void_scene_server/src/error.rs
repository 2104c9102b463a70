//! API and server errors

use crate::config::ConfigError;
use axum::http::StatusCode;
use thiserror::Error;
use void_dispatch::DispatchError;
use void_property::CodecError;
use void_scene::SceneError;

/// Failure of a remote request, as reported to the caller
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    DuplicateBehavior(String),

    #[error("Scene dispatcher is shut down")]
    DispatchShutdown,

    #[error("Internal fault: {0}")]
    InternalFault(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Machine-readable error name sent as `error` in the response
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::Codec(e) => e.code(),
            ApiError::DuplicateBehavior(_) => "DuplicateBehavior",
            ApiError::DispatchShutdown => "DispatchShutdown",
            ApiError::InternalFault(_) => "InternalFault",
            ApiError::BadRequest(_) => "BadRequest",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Codec(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateBehavior(_) => StatusCode::CONFLICT,
            ApiError::DispatchShutdown => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SceneError> for ApiError {
    fn from(err: SceneError) -> Self {
        let message = err.to_string();
        match err {
            SceneError::NodeNotFound(_)
            | SceneError::BehaviorNotFound { .. }
            | SceneError::PropertyNotFound { .. }
            | SceneError::UnknownBehaviorType(_)
            | SceneError::SceneFileNotFound(_)
            | SceneError::NotInBuild(_) => ApiError::NotFound(message),
            SceneError::DuplicateBehavior { .. } | SceneError::AlreadyInBuild(_) => {
                ApiError::DuplicateBehavior(message)
            }
            SceneError::Codec(e) => ApiError::Codec(e),
            SceneError::KindMismatch { expected, .. } => {
                ApiError::Codec(CodecError::malformed(expected, message))
            }
            SceneError::PinnedBehavior(_) | SceneError::NoScenePath | SceneError::TooDeep(_) => {
                ApiError::BadRequest(message)
            }
            SceneError::Io(_) | SceneError::Json(_) => ApiError::InternalFault(message),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Shutdown => ApiError::DispatchShutdown,
            DispatchError::Panicked(message) => ApiError::InternalFault(message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalFault(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that stop the server process
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}
