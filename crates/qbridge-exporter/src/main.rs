//! qbridge exporter
//!
//! - Discovers queues once at startup (fatal on failure), then on an interval
//! - Serves queue attributes as Prometheus metrics, fetched per scrape
//! - Stops the refresher and the HTTP server on Ctrl-C / SIGTERM

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use qbridge_core::error::{QBridgeError, Result};
use qbridge_exporter::app_state::AppState;
use qbridge_exporter::config::{self, Cli};
use qbridge_exporter::inventory::{DiscoveryFilter, InventoryRefresher, SnapshotCell};
use qbridge_exporter::obs::{Collector, QueueCollector};
use qbridge_exporter::router;
use qbridge_exporter::upstream::{QueueApi, SqsApi};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "qbridge exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::resolve(&cli)?;
    let listen = cfg.listen_addr()?;

    let api: Arc<dyn QueueApi> = Arc::new(SqsApi::connect(&cfg.upstream).await);
    let inventory = Arc::new(SnapshotCell::new());

    let refresher = InventoryRefresher::new(
        Arc::clone(&api),
        Arc::clone(&inventory),
        DiscoveryFilter::from_config(&cfg)?,
        cfg.interval(),
    );
    refresher.prime().await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher_task = tokio::spawn(refresher.run(shutdown_rx));

    let collector: Arc<dyn Collector> =
        Arc::new(QueueCollector::new(api, inventory, cfg.scrape_concurrency));
    let state = AppState::new(cfg, vec![collector])?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| QBridgeError::Config(format!("failed to bind {listen}: {e}")))?;
    tracing::info!(%listen, "qbridge listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await;

    // The shutdown sender is gone once serve returns, which also stops the refresher.
    if let Err(e) = refresher_task.await {
        tracing::warn!(error = %e, "refresher task ended abnormally");
    }

    served.map_err(|e| QBridgeError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
