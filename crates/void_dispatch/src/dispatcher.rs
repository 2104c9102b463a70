//! Command dispatcher
//!
//! A mutex-guarded FIFO of boxed closures. Producers push from any thread;
//! the owner takes the whole queue in one lock acquisition and runs it
//! outside the lock, so a running unit can enqueue more work without
//! deadlocking.

use crate::error::DispatchError;
use crate::ticket::CommandTicket;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::oneshot;

/// A unit of work run against the owner's context
pub type Job<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

struct DispatchQueue<C> {
    open: bool,
    jobs: VecDeque<Job<C>>,
}

/// Statistics about dispatcher usage
#[derive(Debug, Clone, Default)]
pub struct DispatchStats {
    /// Units accepted into the queue
    pub enqueued: u64,
    /// Units that ran to completion
    pub executed: u64,
    /// Units that panicked
    pub panicked: u64,
    /// Units dropped by shutdown or rejected after it
    pub discarded: u64,
    /// Number of drains that ran at least one unit
    pub drains: u64,
    /// Largest queue length seen at drain time
    pub peak_pending: usize,
}

/// Outcome of a single drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub executed: usize,
    pub panicked: usize,
}

impl DrainReport {
    /// Total units taken off the queue
    pub fn total(&self) -> usize {
        self.executed + self.panicked
    }
}

/// Queue of work for a single owning context `C`
pub struct CommandDispatcher<C> {
    queue: Mutex<DispatchQueue<C>>,
    stats: RwLock<DispatchStats>,
}

impl<C> CommandDispatcher<C> {
    /// Create an open dispatcher
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(DispatchQueue {
                open: true,
                jobs: VecDeque::new(),
            }),
            stats: RwLock::new(DispatchStats::default()),
        }
    }

    /// Append a unit of work. Never blocks on the owner.
    ///
    /// Returns `false` and drops `job` if the dispatcher has shut down.
    pub fn enqueue<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        let mut queue = self.queue.lock();
        if !queue.open {
            drop(queue);
            self.stats.write().discarded += 1;
            log::trace!("CommandDispatcher: enqueue after shutdown ignored");
            return false;
        }
        queue.jobs.push_back(Box::new(job));
        drop(queue);

        self.stats.write().enqueued += 1;
        true
    }

    /// Queue `f` and return a ticket for its result
    pub fn submit<T, F>(&self, f: F) -> CommandTicket<T>
    where
        F: FnOnce(&mut C) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        // Rejected jobs are dropped with their sender, so the ticket
        // resolves to Shutdown.
        self.enqueue(move |ctx: &mut C| {
            match panic::catch_unwind(AssertUnwindSafe(|| f(ctx))) {
                Ok(value) => {
                    let _ = sender.send(Ok(value));
                }
                Err(payload) => {
                    let _ = sender.send(Err(DispatchError::Panicked(panic_message(&*payload))));
                    panic::resume_unwind(payload);
                }
            }
        });
        CommandTicket::new(receiver)
    }

    /// Run every unit queued at the moment of the call, in order.
    ///
    /// Only the owning context may call this. Units queued while the drain
    /// is running are left for the next drain. A panicking unit is logged
    /// and the drain moves on.
    pub fn drain_and_run_all(&self, ctx: &mut C) -> DrainReport {
        let jobs = {
            let mut queue = self.queue.lock();
            std::mem::take(&mut queue.jobs)
        };

        let mut report = DrainReport::default();
        if jobs.is_empty() {
            return report;
        }
        let pending = jobs.len();

        for job in jobs {
            match panic::catch_unwind(AssertUnwindSafe(|| job(&mut *ctx))) {
                Ok(()) => report.executed += 1,
                Err(payload) => {
                    report.panicked += 1;
                    log::error!(
                        "CommandDispatcher: command panicked: {}",
                        panic_message(&*payload)
                    );
                }
            }
        }

        let mut stats = self.stats.write();
        stats.executed += report.executed as u64;
        stats.panicked += report.panicked as u64;
        stats.drains += 1;
        stats.peak_pending = stats.peak_pending.max(pending);

        report
    }

    /// Close the queue and discard pending units.
    ///
    /// Waiters on discarded units are released with
    /// [`DispatchError::Shutdown`]. Later enqueues are no-ops.
    pub fn shutdown(&self) {
        let discarded = {
            let mut queue = self.queue.lock();
            queue.open = false;
            std::mem::take(&mut queue.jobs)
        };

        let count = discarded.len();
        // Dropping the jobs drops their result senders.
        drop(discarded);

        self.stats.write().discarded += count as u64;
        log::info!(
            "CommandDispatcher: shut down, {} pending command(s) discarded",
            count
        );
    }

    /// Whether the dispatcher still accepts work
    pub fn is_open(&self) -> bool {
        self.queue.lock().open
    }

    /// Number of queued units
    pub fn pending(&self) -> usize {
        self.queue.lock().jobs.len()
    }

    /// Snapshot of the statistics
    pub fn stats(&self) -> DispatchStats {
        self.stats.read().clone()
    }
}

impl<C> Default for CommandDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
