//! Utility functions.

use tracing::info;

/// Resolve when the process receives Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = wait_for_sigterm() => info!("Received SIGTERM signal"),
    }

    info!("Starting graceful shutdown...");
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

// No SIGTERM outside Unix; Ctrl+C still applies.
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
