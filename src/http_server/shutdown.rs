//! Signal handling for the serving loop.
//!
//! SIGINT and SIGTERM stop the accept loop and drain in-flight connections
//! before the process exits. In https mode, SIGHUP swaps in fresh certificate
//! files without dropping the listener, so rotated certs take effect with no
//! downtime.

use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::SHUTDOWN_DRAIN_SECS;

/// Watches for SIGINT/SIGTERM and triggers a graceful drain on the handle.
pub fn spawn_signal_watcher(handle: Handle) {
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_DRAIN_SECS)));
        tracing::info!(
            drain_secs = SHUTDOWN_DRAIN_SECS,
            "Draining connections before exit"
        );
    });
}

/// Completes when either SIGINT or SIGTERM arrives.
async fn wait_for_shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT handler installs");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installs")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// Watches for SIGHUP and reloads the certificate and key files from disk.
///
/// A reload failure keeps the previously loaded certificates and logs the
/// error; the server stays up either way. On non-Unix platforms this is a
/// logged no-op, since there is no SIGHUP to listen for.
pub fn spawn_cert_reloader(tls_config: RustlsConfig, cert_path: String, key_path: String) {
    #[cfg(unix)]
    tokio::spawn(async move {
        let mut hangup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
            .expect("SIGHUP handler installs");

        loop {
            hangup.recv().await;

            match tls_config.reload_from_pem_file(&cert_path, &key_path).await {
                Ok(()) => {
                    tracing::info!(cert = %cert_path, key = %key_path, "Reloaded TLS certificates on SIGHUP");
                }
                Err(e) => {
                    tracing::error!(error = %e, cert = %cert_path, key = %key_path, "TLS certificate reload failed, keeping previous certificates");
                }
            }
        }
    });

    #[cfg(not(unix))]
    {
        let _ = (tls_config, cert_path, key_path);
        tracing::warn!("SIGHUP certificate reload is unavailable on this platform");
    }
}
