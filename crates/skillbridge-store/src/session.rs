//! The local user-data store.
//!
//! One small JSON file (`user_data.json`) in the per-user config directory
//! holds the session credential and the device fingerprint. The file is
//! read at most once at startup and written at most once — on first
//! successful identification, or when `logout` clears the credential.
//!
//! Presence of a stored credential short-circuits re-authentication:
//! setup never calls the identify endpoint again while `user_id` is set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// File name of the persisted session record.
pub const SESSION_FILE_NAME: &str = "user_data.json";

/// Directory under the platform config dir holding skillbridge state.
pub const CONFIG_DIR_NAME: &str = "skillbridge";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The persisted per-machine session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Session credential from the identify call. `None` after logout.
    pub user_id: Option<String>,

    /// Stable per-machine identifier, generated once and reused on every
    /// subsequent run.
    pub device_fingerprint: String,
}

impl UserSession {
    /// Generate a fresh fingerprint for a machine with no prior session.
    pub fn new_fingerprint() -> String {
        Uuid::new_v4().to_string()
    }
}

/// The decision taken before talking to the identify endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBootstrap {
    /// A credential is already on disk — reuse it, no identify call.
    Reused(UserSession),

    /// No credential yet; identify with this fingerprint and persist the
    /// result.
    NeedsIdentify {
        /// The fingerprint to send — the stored one when present, freshly
        /// generated otherwise.
        fingerprint: String,
    },
}

/// Decide how to bootstrap a session from whatever is on disk.
pub fn plan_bootstrap(existing: Option<UserSession>) -> SessionBootstrap {
    match existing {
        Some(session) if session.user_id.is_some() => SessionBootstrap::Reused(session),
        Some(session) => SessionBootstrap::NeedsIdentify {
            fingerprint: session.device_fingerprint,
        },
        None => SessionBootstrap::NeedsIdentify {
            fingerprint: UserSession::new_fingerprint(),
        },
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// A store over the session file inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    /// A store over the default per-user config location
    /// (e.g. `~/.config/skillbridge/user_data.json`).
    pub fn open_default() -> StoreResult<Self> {
        let base = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(base.join(CONFIG_DIR_NAME)))
    }

    /// Where the session file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, or `None` if no file exists yet.
    pub fn load(&self) -> StoreResult<Option<UserSession>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no session file");
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let session: UserSession = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), "session loaded");
        Ok(Some(session))
    }

    /// Persist the session, creating the config directory if needed.
    pub fn save(&self, session: &UserSession) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        info!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Clear the stored credential and rewrite the file, keeping the
    /// device fingerprint.
    ///
    /// Returns `true` if a credential was actually cleared, `false` when
    /// there was no session file or no credential to clear.
    pub fn clear_credential(&self) -> StoreResult<bool> {
        let Some(mut session) = self.load()? else {
            return Ok(false);
        };
        if session.user_id.is_none() {
            return Ok(false);
        }
        session.user_id = None;
        self.save(&session)?;
        info!("session credential cleared");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
