//! Session store: credential lifecycle and token persistence.
//!
//! Owns the in-memory [`Session`] and mirrors its token into the shared
//! [`ApiClient`] so the task store's requests authenticate. The token and
//! user record are persisted through [`SessionStorage`] and restored once
//! at startup by [`SessionStore::initialize`].

use tracing::{debug, instrument, warn};

use taskflow_core::ApiError;
use taskflow_core::auth::{AuthResponse, Credentials, Registration, Session, UserRecord};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::storage::SessionStorage;

/// Authentication state container.
pub struct SessionStore {
    session: Session,
    loading: bool,
    client: ApiClient,
    storage: SessionStorage,
}

impl SessionStore {
    /// New store with an empty session.
    #[must_use]
    pub fn new(client: ApiClient, config: &ClientConfig) -> Self {
        Self {
            session: Session::default(),
            loading: false,
            client,
            storage: SessionStorage::new(config.storage_path.clone()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Restore the session from durable storage.
    ///
    /// Absence of stored entries leaves the session empty; a corrupt user
    /// record clears both memory and storage. Never fails.
    #[instrument(skip_all)]
    pub fn initialize(&mut self) {
        match self.storage.load() {
            Ok(Some((token, user))) => {
                debug!(username = %user.username, "session restored from storage");
                self.client.set_token(Some(token.clone()));
                self.session = Session {
                    user: Some(user),
                    token: Some(token),
                };
            }
            Ok(None) => {
                debug!("no stored session found");
            }
            Err(e) => {
                warn!(error = %e, "failed to restore session, clearing");
                self.clear_session();
            }
        }
    }

    /// Authenticate with username and password.
    ///
    /// On success the session is replaced and both entries are persisted.
    /// On failure the best-available message is surfaced, with
    /// `"Login failed"` as the last resort.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<UserRecord, ApiError> {
        self.loading = true;
        let result = self.authenticate("/api/auth/login/", credentials).await;
        self.loading = false;
        result.map_err(|e| e.surface("Login failed"))
    }

    /// Create an account and start a session with the returned token.
    #[instrument(skip_all, fields(username = %registration.username))]
    pub async fn register(&mut self, registration: &Registration) -> Result<UserRecord, ApiError> {
        self.loading = true;
        let result = self.authenticate("/api/auth/register/", registration).await;
        self.loading = false;
        result.map_err(|e| e.surface("Registration failed"))
    }

    /// End the session.
    ///
    /// The server-side logout is best-effort: its failure is logged and
    /// swallowed, and local state plus durable storage are cleared
    /// unconditionally.
    #[instrument(skip_all)]
    pub async fn logout(&mut self) {
        self.loading = true;
        if let Err(e) = self
            .client
            .post_empty::<serde_json::Value>("/api/auth/logout/")
            .await
        {
            warn!(error = %e, "server-side logout failed");
        }
        self.clear_session();
        self.loading = false;
    }

    /// Reset the in-memory session and remove the durable entries.
    /// Idempotent.
    pub fn clear_session(&mut self) {
        self.session = Session::default();
        self.client.set_token(None);
        self.storage.clear();
        debug!("session cleared");
    }

    /// Validate the held token against the profile endpoint.
    ///
    /// No token → `false` without a request. A valid token refreshes the
    /// user record; any failure (expired, revoked, network) clears the
    /// session.
    #[instrument(skip_all)]
    pub async fn check_auth(&mut self) -> bool {
        if self.session.token.is_none() {
            return false;
        }

        match self.client.get::<UserRecord>("/api/auth/profile/").await {
            Ok(user) => {
                self.session.user = Some(user);
                true
            }
            Err(e) => {
                warn!(error = %e, "token validation failed");
                self.clear_session();
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived queries
    // ─────────────────────────────────────────────────────────────────────

    /// Whether a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Current user profile, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.session.user.as_ref()
    }

    /// Current username, empty when unauthenticated (for display binding).
    #[must_use]
    pub fn username(&self) -> &str {
        self.session
            .user
            .as_ref()
            .map_or("", |u| u.username.as_str())
    }

    /// Whether an auth request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    /// POST credentials to an auth endpoint and install the session from
    /// the `{user, token}` response.
    async fn authenticate<B: serde::Serialize>(
        &mut self,
        path: &str,
        body: &B,
    ) -> Result<UserRecord, ApiError> {
        let response: AuthResponse = self.client.post(path, body).await?;

        let (Some(token), Some(user)) = (response.token, response.user) else {
            return Err(ApiError::InvalidResponse(
                "Token or user data missing from response".into(),
            ));
        };

        self.client.set_token(Some(token.clone()));
        if let Err(e) = self.storage.save(&token, &user) {
            warn!(error = %e, "failed to persist session");
        }
        self.session = Session {
            user: Some(user.clone()),
            token: Some(token),
        };
        debug!(username = %user.username, "login successful");
        Ok(user)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
