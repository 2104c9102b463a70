//! Void Scene Server
//!
//! Serves the remote scene graph API for one project directory.
//!
//! Run with: cargo run -p void_scene_server -- --port 8080 --scene scenes/main.json

use std::sync::Arc;
use void_dispatch::CommandDispatcher;
use void_scene::{BehaviorRegistry, BuildList, SceneHost, SceneWorld};
use void_scene_server::{router, OwnerLoop, SceneServer, SceneService, ServerConfig, ServerError};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Log panics before the default hook prints them
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("PANIC: {}", panic_info);
        default_hook(panic_info);
    }));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        log::error!("void-scene-server: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), ServerError> {
    let config = ServerConfig::load(args)?;
    log::info!(
        "Project dir: {}, tick rate: {} Hz",
        config.project_dir.display(),
        config.tick_rate_hz
    );

    // Scene world
    let registry = Arc::new(BehaviorRegistry::with_builtin());
    let builds = BuildList::load(config.build_list_path())?;
    let mut world = SceneWorld::new(registry, config.project_dir.clone()).with_build_list(builds);
    if let Some(scene) = &config.startup_scene {
        world.open_scene(scene)?;
    }

    // Dispatcher, service and HTTP server
    let dispatcher = Arc::new(CommandDispatcher::new());
    let service = Arc::new(SceneService::new(dispatcher.clone()));
    let mut server = SceneServer::start(
        router(service, config.cors),
        config.socket_addr()?,
        config.worker_threads,
    )?;

    let owner = OwnerLoop::new(dispatcher.clone(), config.tick_interval());
    let handle = owner.handle();
    let signal_dispatcher = dispatcher.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        signal_dispatcher.shutdown();
        handle.stop();
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    let stats = owner.run(&mut world);

    // Normally already done by the signal handler
    dispatcher.shutdown();
    server.stop();

    let dispatch = dispatcher.stats();
    log::info!(
        "void-scene-server: exited after {} ticks ({} executed, {} panicked, {} discarded, peak queue {})",
        stats.ticks,
        dispatch.executed,
        dispatch.panicked,
        dispatch.discarded,
        dispatch.peak_pending
    );
    Ok(())
}
