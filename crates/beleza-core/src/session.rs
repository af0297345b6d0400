//! Session storage and retrieval.
//!
//! Stores the bearer token, store id, and signed-in user in
//! `<home>/session.json` with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Legacy store-id keys still accepted when reading older session files.
/// Checked in order after the current `store_id` field.
const LEGACY_STORE_KEYS: &[&str] = &["storeId", "store"];

/// Signed-in user profile persisted alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Whether this account has administrator permissions
    #[serde(default)]
    pub admin: bool,
}

/// Client session state.
///
/// Populated from disk at client construction, mutated on successful login
/// (write-through) and cleared on logout or terminal 401.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The bearer access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Store (tenant) the session is scoped to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// The signed-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Returns true if the session holds an access token.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }
}

/// Loads and saves sessions at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by a specific file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store backed by the default session path.
    pub fn open_default() -> Self {
        Self::new(paths::session_path())
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the session from disk.
    /// Returns an empty session if the file doesn't exist.
    ///
    /// The store id is read from the current `store_id` field first, then
    /// from the legacy key names older app versions wrote.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let value: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        let mut session: Session = serde_json::from_value(value.clone())
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        if session.store_id.is_none() {
            session.store_id = LEGACY_STORE_KEYS
                .iter()
                .copied()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()))
                .map(std::string::ToString::to_string);
        }

        Ok(session)
    }

    /// Saves the session to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted session.
    /// Returns true if a session file existed.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    /// Test: save/load roundtrip.
    #[test]
    fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let session = Session {
            auth_token: Some("token-1".to_string()),
            store_id: Some("sp-moema-01".to_string()),
            user: Some(UserProfile {
                id: "u1".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                admin: false,
            }),
        };
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);
    }

    /// Test: missing file loads as an empty session.
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let session = store.load().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.store_id, None);
    }

    /// Test: store id is picked up from legacy key names.
    #[test]
    fn test_legacy_store_key_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            store.path(),
            r#"{"auth_token":"t","storeId":"legacy-1"}"#,
        )
        .unwrap();
        assert_eq!(store.load().unwrap().store_id.as_deref(), Some("legacy-1"));

        std::fs::write(store.path(), r#"{"store":"legacy-2"}"#).unwrap();
        assert_eq!(store.load().unwrap().store_id.as_deref(), Some("legacy-2"));
    }

    /// Test: the current field name wins over legacy keys.
    #[test]
    fn test_current_store_key_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        std::fs::write(
            store.path(),
            r#"{"store_id":"current","storeId":"legacy"}"#,
        )
        .unwrap();
        assert_eq!(store.load().unwrap().store_id.as_deref(), Some("current"));
    }

    /// Test: clear removes the file and reports whether one existed.
    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.clear().unwrap());
        store.save(&Session::default()).unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9"), "eyJhbGci...");
        assert_eq!(mask_token("short"), "***");
    }
}
