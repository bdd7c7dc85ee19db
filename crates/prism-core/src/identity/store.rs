//! On-disk credential cache.
//!
//! Stores the provider's refresh token in `<PRISM_HOME>/session.json`
//! with restricted permissions (0600). Tokens are never logged or
//! displayed. Only the refresh token is persisted; short-lived ID
//! tokens are re-acquired on restore.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// The persisted slice of a provider session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCredentials {
    /// The long-lived refresh token.
    pub refresh_token: String,
    /// Provider-issued user id, kept for display before refresh resolves.
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// File-backed credential cache.
#[derive(Debug, Clone)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    /// Cache at an explicit path (tests use a temp dir).
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Cache at the default `<PRISM_HOME>/session.json` location.
    pub fn at_default_path() -> Self {
        Self::new(paths::session_cache_path())
    }

    /// Loads cached credentials. Returns `None` if nothing is cached.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<CachedCredentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session cache from {}", self.path.display()))?;

        let creds = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse session cache from {}", self.path.display())
        })?;
        Ok(Some(creds))
    }

    /// Saves credentials with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, creds: &CachedCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(creds).context("Failed to serialize session cache")?;

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

    /// Removes any cached credentials. Idempotent: clearing an empty
    /// cache succeeds and reports `false`.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_in(dir: &tempfile::TempDir) -> CredentialCache {
        CredentialCache::new(dir.path().join("session.json"))
    }

    fn sample() -> CachedCredentials {
        CachedCredentials {
            refresh_token: "refresh-1".into(),
            uid: "u1".into(),
            email: Some("a@b.dev".into()),
        }
    }

    #[test]
    fn load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cache_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.save(&sample()).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.refresh_token, "refresh-1");
        assert_eq!(loaded.email.as_deref(), Some("a@b.dev"));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.save(&sample()).unwrap();
        let mode = fs::metadata(dir.path().join("session.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        assert!(!cache.clear().unwrap());
        cache.save(&sample()).unwrap();
        assert!(cache.clear().unwrap());
        assert!(!cache.clear().unwrap());
        assert!(cache.load().unwrap().is_none());
    }
}
