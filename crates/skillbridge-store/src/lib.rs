//! Local persistence for skillbridge.
//!
//! This crate provides:
//!
//! - **Skill database** — a SQLite-backed sink for generated skills with
//!   insert-or-replace semantics keyed by skill id, so re-running setup is
//!   idempotent.
//!
//! - **Session store** — the `user_data.json` file in the per-user config
//!   directory holding the session credential and device fingerprint, plus
//!   the bootstrap decision that short-circuits re-authentication when a
//!   credential already exists.

pub mod db;
pub mod error;
pub mod migration;
pub mod session;
pub mod skill_store;

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use session::{SessionBootstrap, SessionStore, UserSession, plan_bootstrap};
pub use skill_store::{InstalledSkill, SkillStore};
