//! Owner loop
//!
//! The one context allowed to touch the scene world. Each tick drains the
//! dispatcher; a stop signal ends the loop after the current drain.

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use void_dispatch::CommandDispatcher;

/// Statistics about an owner loop run
#[derive(Debug, Clone, Default)]
pub struct OwnerStats {
    pub ticks: u64,
    /// Units executed, including ones that panicked
    pub commands: u64,
    pub panicked: u64,
}

/// Stops an [`OwnerLoop`] from any thread
#[derive(Debug, Clone)]
pub struct OwnerHandle {
    stop_tx: Sender<()>,
}

impl OwnerHandle {
    /// Ask the loop to exit. Repeated calls are harmless.
    pub fn stop(&self) {
        let _ = self.stop_tx.try_send(());
    }
}

pub struct OwnerLoop<C> {
    dispatcher: Arc<CommandDispatcher<C>>,
    tick_interval: Duration,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
}

impl<C> OwnerLoop<C> {
    pub fn new(dispatcher: Arc<CommandDispatcher<C>>, tick_interval: Duration) -> Self {
        let (stop_tx, stop_rx) = bounded(1);
        Self {
            dispatcher,
            tick_interval,
            stop_tx,
            stop_rx,
        }
    }

    pub fn handle(&self) -> OwnerHandle {
        OwnerHandle {
            stop_tx: self.stop_tx.clone(),
        }
    }

    /// Drain once per tick until stopped
    pub fn run(self, ctx: &mut C) -> OwnerStats {
        let ticker = tick(self.tick_interval);
        let mut stats = OwnerStats::default();
        log::info!("OwnerLoop: running at {:?} per tick", self.tick_interval);

        loop {
            select! {
                recv(ticker) -> _ => {
                    let report = self.dispatcher.drain_and_run_all(ctx);
                    stats.ticks += 1;
                    stats.commands += report.total() as u64;
                    stats.panicked += report.panicked as u64;
                    if report.total() > 0 {
                        log::trace!("OwnerLoop: tick {} ran {} unit(s)", stats.ticks, report.total());
                    }
                }
                recv(self.stop_rx) -> _ => break,
            }
        }

        log::info!(
            "OwnerLoop: stopped after {} ticks, {} command(s)",
            stats.ticks,
            stats.commands
        );
        stats
    }
}

impl<C: Send + 'static> OwnerLoop<C> {
    /// Run on a new thread that owns `ctx`; joining yields it back
    pub fn spawn(self, mut ctx: C) -> std::io::Result<JoinHandle<(C, OwnerStats)>> {
        std::thread::Builder::new()
            .name("scene-owner".to_string())
            .spawn(move || {
                let stats = self.run(&mut ctx);
                (ctx, stats)
            })
    }
}
