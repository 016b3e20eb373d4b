//! Pulsecheck: a cloud-instance sidecar healthcheck server.
//!
//! This is the application entry point. It initializes tracing, parses the
//! command line, captures the process start instant, builds the instance
//! metadata client, sets up the Axum router, and starts the HTTP or HTTPS
//! server depending on the selected mode.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsecheck::config::{
    ServeMode, DEFAULT_CERT_PATH, DEFAULT_HOST, DEFAULT_KEY_PATH, DEFAULT_LOG_FILTER,
};
use pulsecheck::host::LocalIpResolver;
use pulsecheck::http_server;
use pulsecheck::metadata::MetadataClient;
use pulsecheck::routes::create_router;
use pulsecheck::state::AppState;

/// Pulsecheck: liveness, metadata, and uptime endpoints for cloud instances
#[derive(Parser, Debug)]
#[command(name = "pulsecheck", version, about)]
struct Args {
    /// Serve mode: plain HTTP or TLS-terminated HTTPS
    #[arg(value_enum, default_value_t = ServeMode::Http)]
    mode: ServeMode,

    /// Bind address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Bind port (defaults to 80 for http, 443 for https)
    #[arg(long)]
    port: Option<u16>,

    /// TLS certificate chain file (https mode)
    #[arg(long, default_value = DEFAULT_CERT_PATH)]
    cert: String,

    /// TLS private key file (https mode)
    #[arg(long, default_value = DEFAULT_KEY_PATH)]
    key: String,

    /// Log level filter (e.g., "pulsecheck=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Uptime baseline, captured once and read-only afterwards
    let started_at = std::time::Instant::now();

    let metadata = MetadataClient::new()?;
    let state = AppState::new(started_at, metadata, LocalIpResolver::system());

    let app = create_router(state);

    let port = args.port.unwrap_or_else(|| args.mode.default_port());
    http_server::start_server(app, args.mode, &args.host, port, &args.cert, &args.key).await?;

    Ok(())
}
