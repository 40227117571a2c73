//! Error types for the catalog crate.
//!
//! All catalog operations surface errors through [`CatalogError`], which is
//! the single error type for this crate. Each variant carries enough context
//! for callers to decide how to handle the failure.

/// Unified error type for the skillbridge catalog client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An HTTP request to the remote catalog service failed at the
    /// transport level (connection refused, DNS, TLS, timeout).
    #[error("remote catalog unavailable: {0}")]
    RemoteUnavailable(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("catalog API error: HTTP {status}: {body}")]
    Api {
        /// The HTTP status code returned by the service.
        status: u16,
        /// The response body, as received.
        body: String,
    },

    /// The authentication wait exceeded its bound.
    #[error("authentication wait for `{tool}` timed out after {timeout_secs} seconds")]
    AuthTimeout {
        /// The integration that never completed authentication.
        tool: String,
        /// How many seconds we waited before giving up.
        timeout_secs: u64,
    },

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
