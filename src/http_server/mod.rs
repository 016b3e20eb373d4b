//! HTTP server module with TLS support.
//!
//! Two transports, selected on the command line:
//! - **Http**: plain HTTP
//! - **Https**: TLS termination with user-provided certificate files
//!
//! The server includes graceful shutdown on SIGTERM/SIGINT and certificate
//! hot-reload via SIGHUP in https mode.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
