//! Constants and the serve-mode selector.
//!
//! The bind address, ports, and certificate paths are deployment details, not
//! part of the endpoint contract, so they live here as overridable defaults
//! rather than in a configuration file.

use clap::ValueEnum;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default tracing filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "pulsecheck=info";

/// Default TLS certificate chain location (https mode)
pub const DEFAULT_CERT_PATH: &str = "/srv/cert.pem";

/// Default TLS private key location (https mode)
pub const DEFAULT_KEY_PATH: &str = "/srv/key.pem";

// =============================================================================
// Instance Metadata Service (IMDSv2)
// =============================================================================

/// Link-local metadata service address, reachable only inside cloud instances
pub const METADATA_BASE_URL: &str = "http://169.254.169.254";

/// Token endpoint path (IMDSv2 session token, obtained via PUT)
pub const METADATA_TOKEN_PATH: &str = "/latest/api/token";

/// Instance identity endpoint path
pub const METADATA_INSTANCE_ID_PATH: &str = "/latest/meta-data/instance-id";

/// Requested token lifetime in seconds
pub const METADATA_TOKEN_TTL_SECS: u32 = 21600;

/// Per-call timeout for metadata requests, in seconds.
/// Both `/status` lookups are attempted exactly once with this bound, so a
/// request with the metadata service unreachable completes within ~2 seconds.
pub const METADATA_TIMEOUT_SECS: u64 = 1;

/// Sentinel reported when a metadata or IP lookup fails
pub const LOOKUP_FALLBACK: &str = "not available";

// =============================================================================
// Server lifecycle
// =============================================================================

/// How long a shutdown signal lets in-flight connections drain before the
/// process exits
pub const SHUTDOWN_DRAIN_SECS: u64 = 30;

/// Transport selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ServeMode {
    /// Plain HTTP
    Http,
    /// TLS-terminated HTTPS with certificates loaded from PEM files
    Https,
}

impl ServeMode {
    /// Conventional port for the mode, used when `--port` is not given.
    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}
