//! Authentication and session types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Account password.
    pub password: String,
    /// Password confirmation, must match `password`.
    pub password_confirm: String,
}

/// Authenticated user profile.
///
/// Only `id` and `username` are modeled as fields; the rest of the profile
/// (email, first/last name, date_joined) is carried opaquely and replaced
/// wholesale on login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned user id.
    pub id: i64,
    /// Account username.
    pub username: String,
    /// Remaining profile fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Successful login/registration response body.
///
/// Both fields are required by the client; a response missing either is
/// rejected as invalid.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Authenticated user profile.
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Bearer token for subsequent requests.
    #[serde(default)]
    pub token: Option<String>,
}

/// In-memory authenticated-user context.
///
/// Invariant: the session is considered authenticated iff `token` is set.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current user profile, replaced wholesale on login/refresh.
    pub user: Option<UserRecord>,
    /// Bearer token, mirrored into the shared HTTP client.
    pub token: Option<String>,
}

impl Session {
    /// Whether a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
