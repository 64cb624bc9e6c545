//! Process lifecycle: tracing setup, serving, and shutdown.

use std::future::Future;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_storage::StorageError;

use crate::router::build_router;
use crate::state::AppState;

/// Failures that end the server process.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// The listener or connection handling failed.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    /// The store could not be flushed on teardown.
    #[error("store shutdown failed: {0}")]
    Storage(#[from] StorageError),
}

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to info-level output for
/// this crate and tower-http's request traces.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}

/// Serves the API on `listener` until `shutdown` resolves, then flushes the
/// store.
///
/// The store is flushed whether serving ended cleanly or with an error. A
/// serving error takes precedence over a flush error in the result.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = state.store.clone();

    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await;

    let flushed = store.shutdown();
    if let Err(err) = &flushed {
        tracing::error!(backend = store.backend_name(), error = %err, "failed to flush store");
    }

    served?;
    flushed?;
    tracing::info!(backend = store.backend_name(), "store flushed");
    Ok(())
}
