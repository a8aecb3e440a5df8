use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use inkalert::{
    auth::Authenticator,
    classify::Classifier,
    cli::config_path_from_args,
    config::Config,
    dispatch::AlertDispatcher,
    display::{ScenePort, SimulatedPanel, run_display_loop},
    listener::AlertListener,
    logging::init_tracing,
    pipeline::AlertPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = if config_path.exists() {
        Config::load(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    let logging_guard = init_tracing(&config.logging)?;
    tracing::info!(
        target: "main",
        run_id = logging_guard.run_id(),
        config = %config_path.display(),
        "inkalert starting"
    );

    // Explicit wiring, no process-wide singletons: every component is built
    // here once and handed to its consumer.
    let authenticator = Authenticator::new(
        config.listener.auth_code_bytes()?,
        config.listener.allowed_hosts.clone(),
    );
    let classifier = Classifier::new();

    let (scene_tx, scene_rx) = mpsc::channel(config.display.scene_queue_capacity.max(1));
    let dispatcher = AlertDispatcher::new(scene_tx, config.display.overflow);
    let pipeline = Arc::new(AlertPipeline::new(authenticator, classifier, dispatcher));

    let panel: Arc<dyn ScenePort> = Arc::new(SimulatedPanel::new(config.display.locale));
    let shutdown = CancellationToken::new();

    let display_task = tokio::spawn(run_display_loop(
        scene_rx,
        Arc::clone(&panel),
        shutdown.clone(),
    ));

    let listener = AlertListener::bind(
        &config.listener.bind_host,
        config.listener.port,
        config.listener.max_packet_bytes,
        Arc::clone(&pipeline),
    )
    .await?;
    let listener_task = tokio::spawn(listener.run(shutdown.clone()));

    let mut sigint =
        signal(SignalKind::interrupt()).context("unable to listen for SIGINT (Ctrl+C)")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;

    let signal_name = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    };

    tracing::info!(target: "main", signal = signal_name, "shutting down");
    shutdown.cancel();

    listener_task.await.context("listener task join failed")??;
    display_task.await.context("display task join failed")?;

    eprintln!("inkalert stopped: received {signal_name}");
    Ok(())
}
