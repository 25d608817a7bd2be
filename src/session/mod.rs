//! Session persistence: bearer token plus cached user/cart snapshots.
//!
//! The token and the snapshots live in one JSON document at a fixed
//! path and are always written and cleared together - a logout or a
//! failed login wipes all of them at once, so a stale cart snapshot can
//! never outlive its token.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::UserProfile;
use crate::cart::LineItem;

/// Errors from loading or saving the session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the client persists between runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Bearer token, if logged in.
    pub token: Option<String>,

    /// Cached profile from the last `GET /user`.
    pub user: Option<UserProfile>,

    /// Cached cart from the last refresh.
    pub cart: Vec<LineItem>,
}

impl SessionSnapshot {
    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// File-backed session store.
///
/// ## Example
///
/// ```no_run
/// use cardmart::session::{SessionSnapshot, SessionStore};
///
/// let store = SessionStore::new("session.json");
/// let mut session = store.load().unwrap();
/// session.token = Some("abc".into());
/// store.save(&session).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at the given path. Nothing is read until `load`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, treating a missing file as an empty session.
    pub fn load(&self) -> Result<SessionSnapshot, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionSnapshot::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the session wholesale.
    pub fn save(&self, session: &SessionSnapshot) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Wipe the session: token and snapshots go together.
    ///
    /// Called on logout and on login failure. A missing file is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
