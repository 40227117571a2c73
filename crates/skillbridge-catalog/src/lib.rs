//! Catalog client for skillbridge — the remote tool-platform API.
//!
//! This crate provides:
//!
//! - **Endpoint configuration** — the fixed production/staging/local
//!   deployment table, resolved once from `$SKILLBRIDGE_ENV` and passed
//!   explicitly into the client.
//!
//! - **Catalog client** — fetches the tool/action catalog, constructs
//!   action invocation URLs, drives the per-integration authentication
//!   redirect, and polls for completion with a bounded wait.
//!
//! - **Integration activator** — the `Selected → {AuthRequired, Ready}`
//!   state machine that gates which integrations may be used.
//!
//! The remote wire shapes are an external contract; see [`types`] for the
//! normalization applied at the boundary (notably the string-or-boolean
//! `isAuthenticated` flag).

pub mod activator;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use activator::{ActivationState, IntegrationActivator};
pub use client::{AUTH_POLL_INTERVAL, CatalogClient, DEFAULT_AUTH_TIMEOUT};
pub use config::{ApiEnvironment, Endpoints};
pub use error::{CatalogError, Result};
pub use types::{
    Action, Authentication, Catalog, InputSchema, ParameterSpec, SessionToken, Signature, Tool,
};
