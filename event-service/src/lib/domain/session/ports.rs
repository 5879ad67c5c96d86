use async_trait::async_trait;
use chrono::Duration;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::models::IssuedToken;

/// Port for login, logout and token authorization.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials, issue a session token and mark the session alive.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Store` - Session store unavailable
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, SessionError>;

    /// End the session of an authenticated user.
    ///
    /// The token itself stays signed and unexpired; only its liveness record
    /// is removed.
    async fn logout(&self, user: &AuthenticatedUser) -> Result<(), SessionError>;

    /// Resolve the principal behind a presented token.
    ///
    /// # Arguments
    /// * `token` - Raw header value, `None` when the header is absent
    ///
    /// # Errors
    /// * `MissingToken` - No token presented
    /// * `InvalidToken` - Token undecodable, session not alive or principal unknown
    /// * `Store` / `UserLookup` - Backing store failed
    async fn authorize(&self, token: Option<&str>) -> Result<AuthenticatedUser, SessionError>;
}

/// Key-value store with per-key expiry, holding session liveness records.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Store `value` under `key`, replacing any previous value.
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), SessionError>;

    /// Fetch the unexpired value under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), SessionError>;
}
