//! Shared application state for request handlers.

use std::time::Instant;

use crate::host::LocalIpResolver;
use crate::metadata::MetadataClient;

/// Shared application state, cloneable across handlers.
///
/// Contains the process start instant used to derive uptime, the client for
/// the link-local instance metadata service, and the local IP resolver.
/// Nothing here is mutated after startup, so no synchronization is needed.
#[derive(Clone)]
pub struct AppState {
    pub started_at: Instant,
    pub metadata: MetadataClient,
    pub local_ip: LocalIpResolver,
}

impl AppState {
    /// Creates application state from its collaborators.
    pub fn new(started_at: Instant, metadata: MetadataClient, local_ip: LocalIpResolver) -> Self {
        Self {
            started_at,
            metadata,
            local_ip,
        }
    }
}
