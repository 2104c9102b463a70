//! # Void Dispatch - Owner Context Command Queue
//!
//! State that may only be touched from one execution context (the *owner*)
//! is reached from other threads by queueing units of work. The owner drains
//! the queue on its own cadence and runs each unit to completion before the
//! next.
//!
//! ## Architecture
//!
//! ```text
//! request thread A ──┐  submit(f)                       ┌─► ticket A resolves
//!                    ├──► CommandDispatcher ──► owner ──┤
//! request thread B ──┘   (mutex + FIFO)     drain_and_  └─► ticket B resolves
//!                                           run_all(&mut C)
//! ```
//!
//! ## Lifecycle
//!
//! - `CommandDispatcher::new()` opens the queue
//! - `enqueue`/`submit` from any thread
//! - `drain_and_run_all` from the owner only
//! - `shutdown()` closes the queue; pending units are discarded and their
//!   tickets resolve to [`DispatchError::Shutdown`]

pub mod dispatcher;
pub mod error;
pub mod ticket;

pub use dispatcher::{CommandDispatcher, DispatchStats, DrainReport, Job};
pub use error::{DispatchError, DispatchResult};
pub use ticket::CommandTicket;
