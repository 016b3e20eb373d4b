//! HTTP/HTTPS server startup logic.
//!
//! Binds the listener and serves the router until shutdown. Failures here
//! are fatal: the process must not come up without the requested transport.

use std::net::SocketAddr;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::ServeMode;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Start the HTTP or HTTPS server on the given address.
///
/// This function blocks until the server shuts down.
pub async fn start_server(
    app: Router,
    mode: ServeMode,
    host: &str,
    port: u16,
    cert_path: &str,
    key_path: &str,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let handle = Handle::new();

    match mode {
        ServeMode::Http => start_plain_server(app, addr, handle).await,
        ServeMode::Https => start_tls_server(app, addr, cert_path, key_path, handle).await,
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    shutdown::spawn_signal_watcher(handle.clone());

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}

/// Start an HTTPS server with user-provided certificates.
async fn start_tls_server(
    app: Router,
    addr: SocketAddr,
    cert_path: &str,
    key_path: &str,
    handle: Handle,
) -> Result<(), ServerError> {
    tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server");

    let rustls_config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {e}")))?;

    shutdown::spawn_signal_watcher(handle.clone());

    // SIGHUP reloads the certificate and key from disk without a restart
    shutdown::spawn_cert_reloader(
        rustls_config.clone(),
        cert_path.to_string(),
        key_path.to_string(),
    );

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    Ok(())
}
