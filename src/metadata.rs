//! Client for the link-local instance metadata service.
//!
//! Speaks the IMDSv2 token protocol: a session token is obtained with a PUT
//! to the token endpoint, then presented in a header on the metadata fetch.
//! The older tokenless direct fetch is deprecated by cloud providers and not
//! supported here.
//!
//! Every call is attempted exactly once with a short timeout; callers are
//! expected to degrade to a fallback value on error rather than retry.

use std::time::Duration;

use http::StatusCode;

use crate::config::{
    METADATA_BASE_URL, METADATA_INSTANCE_ID_PATH, METADATA_TIMEOUT_SECS, METADATA_TOKEN_PATH,
    METADATA_TOKEN_TTL_SECS,
};

/// Header carrying the requested token TTL on the token PUT.
const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";

/// Header carrying the session token on metadata fetches.
const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";

/// Metadata lookup error.
///
/// All variants are recoverable at the call site: handlers substitute a
/// fallback string and log the detail, they never surface this to clients.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{step} returned {status}")]
    UnexpectedStatus { step: &'static str, status: StatusCode },
}

/// Client for the instance metadata service.
///
/// Wraps a reqwest client configured with the per-call timeout. Cloning is
/// cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct MetadataClient {
    http: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    /// Creates a client targeting the well-known link-local address.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(METADATA_BASE_URL.to_string())
    }

    /// Creates a client targeting an arbitrary base URL.
    ///
    /// Used by tests to point at a stub or unreachable endpoint.
    pub fn with_base_url(base_url: String) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(METADATA_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches the instance id via the two-step token protocol.
    ///
    /// Fails on timeout, connection error, or a non-2xx status at either
    /// step. No retries.
    pub async fn instance_id(&self) -> Result<String, MetadataError> {
        let token = self.fetch_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, METADATA_INSTANCE_ID_PATH))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::UnexpectedStatus {
                step: "instance-id fetch",
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }

    /// Obtains an IMDSv2 session token.
    async fn fetch_token(&self) -> Result<String, MetadataError> {
        let response = self
            .http
            .put(format!("{}{}", self.base_url, METADATA_TOKEN_PATH))
            .header(TOKEN_TTL_HEADER, METADATA_TOKEN_TTL_SECS.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::UnexpectedStatus {
                step: "token request",
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }
}
