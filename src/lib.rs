//! Pulsecheck - cloud-instance sidecar healthcheck server.
//!
//! Exposes four fixed GET endpoints: `/` (liveness ping), `/health`
//! (liveness JSON), `/status` (instance metadata and local IP), and
//! `/uptime` (seconds since process start). Everything else is a 404.

pub mod config;
pub mod host;
pub mod http_server;
pub mod metadata;
pub mod middleware;
pub mod routes;
pub mod state;
