//! Login session.
//!
//! # Invariants
//! - A session is authenticated only when both token and user are present,
//!   in memory and on disk.
//! - `login`/`register` validate credentials before any request and persist
//!   only after the backend accepts them.
//! - `logout` clears memory even when the file cannot be removed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rom_schemas::User;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{ApiClient, AuthedClient};
use crate::credentials::validate_credentials;
use crate::error::ClientError;

/// On-disk form: `{"token": "...", "user": {...}}`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSession")
            .field("token", &"<REDACTED>")
            .field("user", &self.user)
            .finish()
    }
}

/// JSON file holding the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing is stored.
    pub fn read(&self) -> Result<Option<PersistedSession>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ClientError::Decode(format!("session file {}: {e}", self.path.display())))
    }

    pub fn write(&self, session: &PersistedSession) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error("create dir for", &self.path, e))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| storage_error("write", &self.path, e))
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &self.path, e)),
        }
    }
}

fn storage_error(op: &str, path: &Path, e: std::io::Error) -> ClientError {
    ClientError::Storage(format!("{op} {}: {e}", path.display()))
}

pub struct Session {
    store: SessionStore,
    current: Option<PersistedSession>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.store.path)
            .field("user", &self.user())
            .field("token", &self.current.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

impl Session {
    /// Restore the persisted session. A missing, unreadable or incomplete
    /// file yields an anonymous session.
    pub fn load(store: SessionStore) -> Self {
        let current = match store.read() {
            Ok(Some(s)) if !s.token.is_empty() => Some(s),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "stored session ignored");
                None
            }
        };
        Self { store, current }
    }

    pub fn anonymous(store: SessionStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn bearer(&self) -> Result<&str, ClientError> {
        self.current
            .as_ref()
            .map(|s| s.token.as_str())
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Client view carrying this session's token (if any).
    pub fn client(&self, api: &ApiClient) -> AuthedClient {
        api.authed(self.current.as_ref().map(|s| s.token.clone()))
    }

    pub async fn login(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<&User, ClientError> {
        let creds = validate_credentials(username, password)?;
        let resp = api.login(&creds).await?;
        info!(username = %resp.user.username, "logged in");
        self.establish(resp.token, resp.user)
    }

    pub async fn register(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<&User, ClientError> {
        let creds = validate_credentials(username, password)?;
        let resp = api.register(&creds).await?;
        info!(username = %resp.user.username, "registered");
        self.establish(resp.token, resp.user)
    }

    fn establish(&mut self, token: String, user: User) -> Result<&User, ClientError> {
        let persisted = PersistedSession { token, user };
        self.store.write(&persisted)?;
        Ok(&self.current.insert(persisted).user)
    }

    /// Teardown: forget the token in memory and on disk.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        let was = self.current.take();
        let res = self.store.clear();
        if let Some(s) = was {
            info!(username = %s.user.username, "logged out");
        }
        res
    }
}
