//! Single-assignment result slots

use crate::error::{DispatchError, DispatchResult};
use tokio::sync::oneshot;

/// Handle to the result of a submitted unit of work.
///
/// Resolves exactly once: with the unit's result, with
/// [`DispatchError::Panicked`] if it panicked, or with
/// [`DispatchError::Shutdown`] if it was discarded.
#[derive(Debug)]
pub struct CommandTicket<T> {
    receiver: oneshot::Receiver<DispatchResult<T>>,
}

impl<T> CommandTicket<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<DispatchResult<T>>) -> Self {
        Self { receiver }
    }

    /// Block the current thread until the result is available.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`wait_async`](Self::wait_async) there.
    pub fn wait(self) -> DispatchResult<T> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(DispatchError::Shutdown))
    }

    /// Wait for the result without blocking the executor
    pub async fn wait_async(self) -> DispatchResult<T> {
        self.receiver.await.unwrap_or(Err(DispatchError::Shutdown))
    }

    /// Take the result if it is already available
    pub fn try_take(&mut self) -> Option<DispatchResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(DispatchError::Shutdown)),
        }
    }
}
