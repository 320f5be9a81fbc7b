//! Wholesale storefront chat bot.
//!
//! Runs the conversation engine behind the console transport. Logs go to
//! stderr so stdout carries only the conversation.

mod config;
mod console;

use crate::config::BotConfig;
use crate::console::ConsoleTransport;
use nukkad_conversation::{ConversationEngine, InMemorySessionStore};
use nukkad_gateway::{
    ConnectionManager, FileAuthStateStore, Orchestrator, Renderer, TokioTimer,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from environment
    let config = BotConfig::from_env().expect("failed to load configuration");
    info!(
        business = %config.business.name,
        auth_state = %config.auth_state_path.display(),
        "Loaded configuration"
    );

    let (events_tx, events_rx) = mpsc::channel(64);
    let transport = Arc::new(ConsoleTransport::new(events_tx.clone()));

    let orchestrator = Arc::new(Orchestrator::new(
        transport.clone(),
        Arc::new(InMemorySessionStore::new()),
        ConversationEngine::new(config.business),
        Renderer::new(transport.clone(), &config.renderer),
    ));
    let manager = ConnectionManager::new(
        transport,
        Arc::new(FileAuthStateStore::new(config.auth_state_path)),
        Arc::new(TokioTimer),
        orchestrator,
        config.connection,
    );
    let handle = manager.handle();

    // Surface pairing codes to the operator
    let mut status = handle.status();
    tokio::spawn(async move {
        while let Some(current) = status.changed().await {
            if let Some(artifact) = &current.pairing_artifact {
                info!(state = %current.state, %artifact, "Pair this device to continue");
            }
        }
    });

    let manager_task = tokio::spawn(manager.run(events_rx));
    let console = console::spawn_stdin_reader(events_tx);

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutdown requested"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        },
        _ = console => info!("Console input closed"),
    }

    handle.shutdown();
    if let Err(e) = manager_task.await {
        error!(error = %e, "Connection manager task failed");
    }
}
