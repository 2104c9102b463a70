//! Dispatch errors

use thiserror::Error;

/// Terminal failure of a queued unit of work
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The dispatcher was shut down before the unit ran
    #[error("Dispatcher has shut down")]
    Shutdown,

    /// The unit panicked while running on the owner
    #[error("Command panicked: {0}")]
    Panicked(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
