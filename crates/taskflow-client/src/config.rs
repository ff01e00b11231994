//! Client configuration.
//!
//! Constructed explicitly and passed to [`crate::ApiClient`] and
//! [`crate::SessionStore`] — there is no ambient singleton.

use std::path::PathBuf;
use std::time::Duration;

/// Directory name under the home directory for durable session storage.
const STORAGE_DIR_NAME: &str = ".taskflow";

/// Configuration for the API client and session persistence.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://taskflow.example.com`.
    pub base_url: String,
    /// Directory holding the durable `token` and `user` entries.
    pub storage_path: PathBuf,
    /// Request timeout; `None` leaves reqwest's default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config with the default storage location (`~/.taskflow`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            storage_path: default_storage_path(),
            timeout: None,
        }
    }

    /// Override the durable-storage directory.
    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Set a request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Default storage directory: `$HOME/.taskflow`, falling back to the
/// current directory when `HOME` is unset.
fn default_storage_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORAGE_DIR_NAME)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
