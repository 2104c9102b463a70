//! HTTP server
//!
//! Serves a router on its own multi-thread tokio runtime so the caller's
//! thread stays free to run the owner loop.

use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub struct SceneServer {
    runtime: Option<Runtime>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl SceneServer {
    /// Bind `addr` and start serving `router` in the background.
    ///
    /// Binding happens before this returns, so a port conflict is reported
    /// to the caller.
    pub fn start(router: Router, addr: SocketAddr, worker_threads: usize) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("scene-http")
            .enable_all()
            .build()?;

        let listener = runtime.block_on(TcpListener::bind(addr))?;
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = runtime.spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
            {
                log::error!("SceneServer: serve failed: {}", e);
            }
        });

        log::info!("SceneServer: listening on http://{}", local_addr);
        Ok(Self {
            runtime: Some(runtime),
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
            local_addr,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// Must not be called from inside an async context.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let Some(runtime) = self.runtime.take() else {
            return;
        };
        if let Some(task) = self.task.take() {
            match runtime.block_on(async { tokio::time::timeout(SHUTDOWN_GRACE, task).await }) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::error!("SceneServer: server task failed: {}", e),
                Err(_) => log::warn!("SceneServer: in-flight requests did not finish in time"),
            }
        }
        runtime.shutdown_timeout(Duration::from_secs(1));
        log::info!("SceneServer: stopped");
    }
}

impl Drop for SceneServer {
    fn drop(&mut self) {
        self.stop();
    }
}
