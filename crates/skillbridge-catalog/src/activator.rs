//! Integration activation — drives the per-tool authentication flow.
//!
//! Each user-selected integration moves through a small state machine:
//!
//! 1. `Selected` — the user picked the integration.
//! 2. `AuthRequired` — the tool reports it is not yet authenticated; an
//!    authorization link is obtained and shown, then we wait for the remote
//!    to confirm completion.
//! 3. `Ready` — the integration can be used.
//!
//! Tools that are already authenticated go straight to `Ready` without
//! touching the redirect/wait path. There is no transition back to
//! `AuthRequired` within a session — once authenticated, the flag is not
//! re-checked.

use std::time::Duration;

use tracing::{debug, info};

use crate::client::{AUTH_POLL_INTERVAL, CatalogClient, DEFAULT_AUTH_TIMEOUT};
use crate::error::Result;
use crate::types::Tool;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Activation state of one selected integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    /// Selected by the user, not yet examined.
    Selected,
    /// The tool requires an authentication round-trip.
    AuthRequired,
    /// The integration is usable. Terminal.
    Ready,
}

impl ActivationState {
    /// The transition out of `Selected` for a given tool: `Ready` when the
    /// tool is already authenticated, `AuthRequired` otherwise.
    pub fn for_tool(tool: &Tool) -> Self {
        if tool.authentication.is_authenticated {
            Self::Ready
        } else {
            Self::AuthRequired
        }
    }
}

// ---------------------------------------------------------------------------
// Activator
// ---------------------------------------------------------------------------

/// Drives selected integrations to the `Ready` state.
pub struct IntegrationActivator<'a> {
    client: &'a CatalogClient,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl<'a> IntegrationActivator<'a> {
    /// Create an activator with the default poll interval and wait bound.
    pub fn new(client: &'a CatalogClient) -> Self {
        Self {
            client,
            poll_interval: AUTH_POLL_INTERVAL,
            wait_timeout: DEFAULT_AUTH_TIMEOUT,
        }
    }

    /// Override the authentication wait bound.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Override the status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Activate one integration, blocking until it reaches `Ready`.
    ///
    /// When authentication is required, the authorization URL is surfaced
    /// through `notify` (the CLI prints it) before the wait begins.
    ///
    /// # Errors
    ///
    /// Propagates catalog client errors, including
    /// [`crate::CatalogError::AuthTimeout`] when the user never completes
    /// the flow.
    pub async fn activate(
        &self,
        tool: &Tool,
        mut notify: impl FnMut(&str),
    ) -> Result<ActivationState> {
        match ActivationState::for_tool(tool) {
            ActivationState::Ready => {
                debug!(tool = %tool.name, "already authenticated, skipping auth flow");
                Ok(ActivationState::Ready)
            }
            _ => {
                info!(tool = %tool.name, "authentication required");
                let auth_url = self
                    .client
                    .auth_redirect_url(&tool.name, &tool.authentication.scopes)
                    .await?;
                notify(&auth_url);

                self.client
                    .wait_for_auth_completion(&tool.name, self.poll_interval, self.wait_timeout)
                    .await?;

                info!(tool = %tool.name, "integration ready");
                Ok(ActivationState::Ready)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
