//! Scene graph service
//!
//! Turns each [`SceneRequest`] into one unit of work on the dispatcher and
//! hands back its response. Callers on any thread may use the service; only
//! the owner that drains the dispatcher ever touches the host.

use crate::error::{ApiError, ApiResult};
use crate::ops;
use crate::request::SceneRequest;
use crate::response::SceneResponse;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use void_dispatch::{CommandDispatcher, CommandTicket, DispatchResult};
use void_scene::SceneHost;

/// Per-service request counter, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Ticket for a submitted request
pub type RequestTicket = CommandTicket<ApiResult<SceneResponse>>;

pub struct SceneService<H> {
    dispatcher: Arc<CommandDispatcher<H>>,
    next_request: AtomicU64,
}

impl<H: SceneHost + 'static> SceneService<H> {
    pub fn new(dispatcher: Arc<CommandDispatcher<H>>) -> Self {
        Self {
            dispatcher,
            next_request: AtomicU64::new(1),
        }
    }

    pub fn dispatcher(&self) -> &Arc<CommandDispatcher<H>> {
        &self.dispatcher
    }

    /// Queue `request` and return without waiting for the owner
    pub fn submit(&self, request: SceneRequest) -> RequestTicket {
        let id = RequestId(self.next_request.fetch_add(1, Ordering::Relaxed));
        log::debug!("SceneService: {} received: {}", id, request);

        self.dispatcher.submit(move |host: &mut H| {
            let label = request.to_string();
            let mutation = request.is_mutation();
            let result = ops::execute(host, request);
            match &result {
                Ok(_) => log::debug!("SceneService: {} applied: {}", id, label),
                // Rejected writes leave the scene as it was
                Err(e) if mutation => log::warn!("SceneService: {} rejected: {}: {}", id, label, e),
                Err(e) => log::debug!("SceneService: {} failed: {}: {}", id, label, e),
            }
            result
        })
    }

    /// Run `request` on the owner and wait for its result
    pub async fn execute(&self, request: SceneRequest) -> ApiResult<SceneResponse> {
        flatten(self.submit(request).wait_async().await)
    }

    /// Blocking form of [`execute`](Self::execute), for callers outside a
    /// tokio runtime. Must not be called from the owning thread.
    pub fn execute_blocking(&self, request: SceneRequest) -> ApiResult<SceneResponse> {
        flatten(self.submit(request).wait())
    }

    /// Like [`execute`](Self::execute), with failures rendered as a response
    pub async fn respond(&self, request: SceneRequest) -> SceneResponse {
        self.execute(request).await.unwrap_or_else(SceneResponse::from)
    }
}

/// Resolve a ticket's outcome into the request result
pub fn flatten(outcome: DispatchResult<ApiResult<SceneResponse>>) -> ApiResult<SceneResponse> {
    let result = outcome.map_err(ApiError::from)?;
    if let Err(ApiError::InternalFault(message)) = &result {
        log::error!("SceneService: request faulted: {}", message);
    }
    result
}
