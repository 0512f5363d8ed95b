//! Persisted login: the current user survives restarts until logout.
//!
//! Stored as `session.json` in the platform data directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The locally logged-in user.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub id: String,
}

/// File-backed store for the logged-in user.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Session file in the per-user data directory.
    pub fn default_location() -> Option<Self> {
        let proj = ProjectDirs::from("com", "roomchat", "roomchat-client")?;
        Some(Self::new(proj.data_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved user, if any. A file that does not parse is removed.
    pub fn load(&self) -> Option<AuthUser> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("discarding unreadable session file: {}", e);
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn save(&self, user: &AuthUser) -> Result<(), String> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create session directory: {}", e))?;
        }
        let data = serde_json::to_string(user)
            .map_err(|e| format!("Failed to encode session: {}", e))?;
        fs::write(&self.path, data).map_err(|e| format!("Failed to write session: {}", e))
    }

    pub fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to remove session: {}", e)),
        }
    }
}
