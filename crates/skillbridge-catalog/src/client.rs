//! HTTP client for the remote tool-platform catalog.
//!
//! The catalog service exposes the tool/action listing, per-integration
//! authentication flows, and the identify call that exchanges a device
//! fingerprint for a session credential. Every operation is a single
//! attempt — there is no retry layer; failures surface to the caller.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::config::Endpoints;
use crate::error::{CatalogError, Result};
use crate::types::{Catalog, SessionToken, coerce_bool};

/// Interval between authentication status probes.
pub const AUTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default bound on how long to wait for a user to complete authentication.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(300);

/// HTTP client for the remote catalog service.
pub struct CatalogClient {
    endpoints: Endpoints,
    http: reqwest::Client,
}

impl CatalogClient {
    /// Create a client against the given deployment endpoints.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            http: reqwest::Client::builder()
                .user_agent(concat!("skillbridge/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// The web frontend URL of the connected deployment.
    pub fn web_base_url(&self) -> &str {
        &self.endpoints.web_base_url
    }

    /// Fetch the full tool/action catalog.
    ///
    /// Single attempt: a transport failure surfaces as
    /// [`CatalogError::RemoteUnavailable`], a non-success status as
    /// [`CatalogError::Api`].
    pub async fn list_tools(&self) -> Result<Catalog> {
        let url = format!("{}/v1/tools", self.endpoints.api_base_url);
        debug!(url = %url, "fetching tool catalog");

        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;

        let catalog: Catalog = response.json().await?;
        info!(tools = catalog.tools.len(), "catalog fetched");
        Ok(catalog)
    }

    /// The URL a generated skill stub calls to invoke one action.
    ///
    /// Pure construction — the tool name is not validated against the
    /// catalog here.
    pub fn action_invocation_url(&self, tool_name: &str, action_id: &str) -> String {
        format!(
            "{}/v1/actions/{}/{}/execute",
            self.endpoints.api_base_url, tool_name, action_id
        )
    }

    /// Request an OAuth-style authorization link for one integration.
    ///
    /// The returned URL is presented to the user; completion is observed
    /// via [`CatalogClient::wait_for_auth_completion`].
    pub async fn auth_redirect_url(&self, tool_name: &str, scopes: &[String]) -> Result<String> {
        let url = format!(
            "{}/v1/integrations/{}/auth-redirect",
            self.endpoints.api_base_url,
            tool_name.to_lowercase()
        );
        debug!(url = %url, scopes = ?scopes, "requesting auth redirect");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "scopes": scopes }))
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: AuthRedirectResponse = response.json().await?;
        Ok(body.redirect_url)
    }

    /// Probe whether the user has completed authentication for a tool.
    pub async fn auth_status(&self, tool_name: &str) -> Result<bool> {
        let url = format!(
            "{}/v1/integrations/{}/auth-status",
            self.endpoints.api_base_url,
            tool_name.to_lowercase()
        );
        trace!(url = %url, "probing auth status");

        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;

        // The status flag has the same string-or-boolean looseness as the
        // catalog's `isAuthenticated`, so run it through the same coercion.
        let body: serde_json::Value = response.json().await?;
        Ok(coerce_bool(body.get("isAuthenticated")))
    }

    /// Block until the remote confirms the user completed authentication
    /// for `tool_name`, polling every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AuthTimeout`] if `timeout` elapses before
    /// the remote reports completion. Transport and API errors from the
    /// status probe propagate immediately.
    pub async fn wait_for_auth_completion(
        &self,
        tool_name: &str,
        interval: Duration,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        debug!(
            tool = tool_name,
            interval_secs = interval.as_secs_f64(),
            timeout_secs = timeout.as_secs(),
            "waiting for authentication to complete"
        );

        loop {
            if self.auth_status(tool_name).await? {
                info!(tool = tool_name, "authentication completed");
                return Ok(());
            }

            // Give up if the next probe would land past the deadline.
            if tokio::time::Instant::now() + interval >= deadline {
                return Err(CatalogError::AuthTimeout {
                    tool: tool_name.to_owned(),
                    timeout_secs: timeout.as_secs(),
                });
            }

            tokio::time::sleep(interval).await;
        }
    }

    /// Exchange a stable device identifier for a session credential.
    pub async fn identify_user(&self, device_fingerprint: &str) -> Result<SessionToken> {
        let url = format!("{}/v1/identify", self.endpoints.api_base_url);
        debug!(url = %url, "identifying user");

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "fingerprint": device_fingerprint }))
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: IdentifyResponse = response.json().await?;
        info!("user identified");
        Ok(SessionToken(body.session_token))
    }
}

/// Map a non-success response into [`CatalogError::Api`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Api {
        status: status.as_u16(),
        body,
    })
}

// --- API response types ---

#[derive(Debug, serde::Deserialize)]
struct AuthRedirectResponse {
    redirect_url: String,
}

#[derive(Debug, serde::Deserialize)]
struct IdentifyResponse {
    session_token: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
