//! # Void Scene Server - Remote Scene Graph API
//!
//! Exposes a live [`SceneWorld`](void_scene::SceneWorld) to a remote caller
//! over HTTP. Request handlers never touch the scene: every request becomes
//! one unit of work on a [`CommandDispatcher`](void_dispatch::CommandDispatcher)
//! that the owner loop drains on the main thread.
//!
//! ## Architecture
//!
//! ```text
//!  HTTP (tokio, axum)                         main thread
//! ┌──────────────────────┐                  ┌─────────────────────┐
//! │ routes ─► SceneService│ ─ submit(op) ─► │ OwnerLoop (tick)    │
//! │          await ticket │ ◄─ response ──── │  drain_and_run_all  │
//! └──────────────────────┘                  │   └─► ops::execute  │
//!                                           │        on SceneWorld│
//!                                           └─────────────────────┘
//! ```
//!
//! ## Request lifecycle
//!
//! `Received → Resolved | NotFound → Applied | Failed → Responded`
//!
//! Path resolution and the operation itself run inside the same unit of
//! work, so they observe one consistent graph.

pub mod config;
pub mod error;
pub mod ops;
pub mod owner;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ServerError};
pub use owner::{OwnerHandle, OwnerLoop, OwnerStats};
pub use request::SceneRequest;
pub use response::SceneResponse;
pub use routes::router;
pub use server::SceneServer;
pub use service::{RequestId, SceneService};
