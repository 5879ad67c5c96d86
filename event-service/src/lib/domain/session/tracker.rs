use std::sync::Arc;

use chrono::Duration;

use crate::domain::session::errors::SessionError;
use crate::domain::session::ports::SessionStore;

/// Session liveness on top of a raw key-value store.
///
/// A subject is logged in while the store holds a non-empty value for it.
pub struct SessionTracker<SS>
where
    SS: SessionStore,
{
    store: Arc<SS>,
}

impl<SS> SessionTracker<SS>
where
    SS: SessionStore,
{
    pub fn new(store: Arc<SS>) -> Self {
        Self { store }
    }

    /// Mark `subject` alive for `ttl`, overwriting an earlier login.
    pub async fn record_login(
        &self,
        subject: &str,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        self.store.set_with_expiry(subject, token, ttl).await
    }

    /// Any non-empty value counts; it is not compared with the presented token.
    pub async fn is_alive(&self, subject: &str) -> Result<bool, SessionError> {
        Ok(self
            .store
            .get(subject)
            .await?
            .is_some_and(|value| !value.is_empty()))
    }

    pub async fn revoke(&self, subject: &str) -> Result<(), SessionError> {
        self.store.delete(subject).await
    }
}
