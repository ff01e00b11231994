//! Durable session storage.
//!
//! Two entries under a configurable directory, named after the keys the
//! session contract defines: `token` (raw string) and `user` (serialized
//! JSON record). Read once at startup; removal is idempotent.

use std::fs;
use std::path::PathBuf;

use taskflow_core::ApiError;
use taskflow_core::auth::UserRecord;
use tracing::warn;

/// Storage key for the raw token.
const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record.
const USER_KEY: &str = "user";

/// File-backed persistence for the session token and user record.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the stored session, if any.
    ///
    /// Returns `Ok(None)` when either entry is absent, `Err` when entries
    /// exist but the user record does not parse.
    pub fn load(&self) -> Result<Option<(String, UserRecord)>, ApiError> {
        let token = match fs::read_to_string(self.dir.join(TOKEN_KEY)) {
            Ok(t) => t,
            Err(_) => return Ok(None),
        };
        let token = token.trim().to_string();
        if token.is_empty() {
            return Ok(None);
        }

        let user_raw = match fs::read_to_string(self.dir.join(USER_KEY)) {
            Ok(u) => u,
            Err(_) => return Ok(None),
        };
        let user: UserRecord = serde_json::from_str(&user_raw)?;
        Ok(Some((token, user)))
    }

    /// Persist both entries, creating the directory if needed.
    pub fn save(&self, token: &str, user: &UserRecord) -> Result<(), ApiError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(TOKEN_KEY), token)?;
        fs::write(self.dir.join(USER_KEY), serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Remove both entries. Missing files are not errors.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            let path = self.dir.join(key);
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(key, error = %e, "failed to remove stored session entry");
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
