//! Session
//!
//! The session token is the only thing that decides between the
//! authentication view and the dashboard view. It lives in a durable
//! key/value store under [`TOKEN_KEY`] so it survives restarts.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Key holding the session token
pub const TOKEN_KEY: &str = "airawareUserId";
/// Key holding the RFC 3339 time the token was stored
pub const LOGGED_IN_AT_KEY: &str = "airawareLoggedInAt";

/// Token access on top of a [`SessionStore`]
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Current token, if logged in
    pub fn token(&self) -> SessionResult<Option<String>> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn is_logged_in(&self) -> SessionResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// Persist a token returned by signup or login
    pub fn store_token(&self, token: &str) -> SessionResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(LOGGED_IN_AT_KEY, &Utc::now().to_rfc3339())?;
        tracing::debug!("Session token stored");
        Ok(())
    }

    /// When the current token was stored
    pub fn logged_in_at(&self) -> SessionResult<Option<DateTime<Utc>>> {
        Ok(self
            .store
            .get(LOGGED_IN_AT_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    /// Destroy the session
    pub fn clear(&self) -> SessionResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(LOGGED_IN_AT_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }
}

/// Session storage errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Session file {path:?} is corrupt: {error}")]
    Corrupt { path: PathBuf, error: String },

    #[error("Session store lock poisoned ({0:?})")]
    Lock(PathBuf),
}

impl SessionError {
    fn io(path: &Path, error: std::io::Error) -> Self {
        SessionError::Io {
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
