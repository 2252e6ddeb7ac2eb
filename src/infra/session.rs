//! Bearer token storage.
//!
//! The token lives in `session.json` under the data directory. The backend
//! client only ever reads it; `login`/`logout` are the sole writers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::app_config::app_data_dir;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("refusing to store an empty token")]
    EmptyToken,
}

/// Anything that can hand out the current bearer token.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, e.g. one passed on the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    env_token: Option<String>,
}

impl SessionStore {
    /// Store at the default location, honoring `TODOVIEW_SESSION_PATH` and a
    /// `TODOVIEW_TOKEN` override.
    pub fn from_env() -> Self {
        let path = std::env::var_os("TODOVIEW_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_data_dir().join(SESSION_FILENAME));
        let env_token = std::env::var("TODOVIEW_TOKEN").ok().and_then(normalize_token);
        Self { path, env_token }
    }

    /// Like [`SessionStore::at`], with a token that takes precedence over
    /// the file.
    pub fn with_token_override(path: impl Into<PathBuf>, token: Option<String>) -> Self {
        Self {
            path: path.into(),
            env_token: token.and_then(normalize_token),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_token: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        let session = serde_json::from_str(&json).map_err(|source| SessionError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(session))
    }

    pub fn save(&self, token: &str) -> Result<Session, SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let session = Session {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&session).map_err(|source| {
            SessionError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)?;
        Ok(session)
    }

    /// Remove the stored token. Returns whether a session existed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}

fn normalize_token(raw: String) -> Option<String> {
    Some(raw.trim().to_string()).filter(|t| !t.is_empty())
}

impl TokenSource for SessionStore {
    fn token(&self) -> Option<String> {
        if let Some(token) = &self.env_token {
            return Some(token.clone());
        }
        match self.load() {
            Ok(session) => session.map(|s| s.token),
            Err(err) => {
                log::warn!("Failed to read session: {}", err);
                None
            }
        }
    }
}
