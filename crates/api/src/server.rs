//! HTTP server bootstrap and runtime wiring.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use figurehub_infra::AppConfig;

use crate::app::{self, services};

/// Open the store, serve until SIGINT/SIGTERM, then close the store.
///
/// The store handle lives for the whole process: it is opened before the
/// listener binds and closed only after in-flight requests have drained.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let services = Arc::new(services::build_services(&config.store).await?);
    let router = app::build_app(services.clone(), config.request_timeout);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", config.port))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        store = services.listings().backend(),
        "server running"
    );

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed");

    services.shutdown().await;
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
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

    tracing::info!("shutdown signal received; draining requests");
}
