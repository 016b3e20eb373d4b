//! Local host network info.
//!
//! Resolves the machine's own IP address the traditional way: take the
//! configured hostname and run it through the system resolver. On minimal
//! cloud images this typically yields the primary interface address; when it
//! fails (no hostname, hostname not in DNS or /etc/hosts), callers fall back
//! to a sentinel value.

use std::net::IpAddr;

/// Local IP lookup error.
#[derive(Debug, thiserror::Error)]
pub enum HostIpError {
    #[error("could not determine hostname: {0}")]
    Hostname(#[source] std::io::Error),

    #[error("could not resolve hostname {name:?}: {source}")]
    Resolve {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("hostname {0:?} resolved to no addresses")]
    NoAddress(String),
}

/// Resolver for the local host's IP address.
///
/// The default resolver asks the OS for the machine hostname; tests pin the
/// hostname instead to force resolution success or failure deterministically,
/// the same way the metadata client accepts an alternate base URL.
#[derive(Clone)]
pub struct LocalIpResolver {
    hostname: Option<String>,
}

impl LocalIpResolver {
    /// Resolver using the machine's own hostname.
    pub fn system() -> Self {
        Self { hostname: None }
    }

    /// Resolver for a fixed hostname.
    pub fn with_hostname(name: impl Into<String>) -> Self {
        Self {
            hostname: Some(name.into()),
        }
    }

    /// Resolves the host's IP address via hostname resolution.
    ///
    /// Best-effort: the resolver is given no explicit timeout beyond the
    /// system default. Returns the first resolved address.
    pub async fn resolve(&self) -> Result<IpAddr, HostIpError> {
        let name = match &self.hostname {
            Some(name) => name.clone(),
            None => hostname::get()
                .map_err(HostIpError::Hostname)?
                .to_string_lossy()
                .into_owned(),
        };

        // lookup_host wants a port; it is discarded from the result
        let mut addrs = tokio::net::lookup_host((name.as_str(), 0))
            .await
            .map_err(|source| HostIpError::Resolve {
                name: name.clone(),
                source,
            })?;

        addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| HostIpError::NoAddress(name.clone()))
    }
}
