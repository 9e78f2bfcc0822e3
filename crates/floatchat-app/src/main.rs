//! FloatChat application binary - composition root.
//!
//! Ties the FloatChat crates together into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the HTTP client, dashboard hub, and orchestrator
//! 4. Probe the backend health endpoint without blocking the session
//! 5. Run the line-oriented interactive shell until EOF or /quit

mod cli;
mod shell;

use std::sync::Arc;

use clap::Parser;
use tokio::sync::broadcast;

use floatchat_chat::ChatOrchestrator;
use floatchat_client::{ChatTransport, HttpChatClient};
use floatchat_core::FloatChatConfig;
use floatchat_dashboard::{DashboardHub, PanelVisibility};

use cli::CliArgs;
use shell::Shell;

#[tokio::main]
async fn main() -> floatchat_core::Result<()> {
    let args = CliArgs::parse();

    // Config first: its log level feeds the tracing filter.
    let config_file = args.resolve_config_path();
    let config = FloatChatConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting FloatChat v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Engine wiring.
    let backend_url = args.resolve_backend_url(&config.backend.base_url);
    let client = HttpChatClient::new(backend_url)?;
    tracing::info!(backend = %client.base_url(), "HTTP client ready");

    let probe_client = client.clone();
    let dashboard = Arc::new(DashboardHub::new());
    let orchestrator = Arc::new(ChatOrchestrator::new(client, Arc::clone(&dashboard)));

    // Notices land in the log; the shell output stays for replies and panels.
    let mut notices = orchestrator.subscribe();
    tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => {
                    tracing::debug!(event = notice.event_name(), "Session notice");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notice stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Health probe. Reachability is reported, never required.
    tokio::spawn(async move {
        match probe_client.health().await {
            Ok(()) => tracing::info!("Backend reachable"),
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed; queries may not succeed")
            }
        }
    });

    // === Shell ===

    let visibility = PanelVisibility::from_config(&config.dashboard);
    let mut shell = Shell::new(orchestrator, dashboard, visibility);
    shell.run().await?;

    tracing::info!("Session ended");
    Ok(())
}
