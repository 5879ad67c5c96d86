use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::session::errors::InvalidTokenReason;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::models::IssuedToken;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::ports::SessionStore;
use crate::domain::session::tracker::SessionTracker;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service for session lifecycle and request authorization.
///
/// A token authorizes a request only while it verifies, its subject is alive
/// in the session store and the user it names still exists with the same email.
pub struct SessionService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    users: Arc<UR>,
    sessions: SessionTracker<SS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, SS> SessionService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - Credential lookups
    /// * `store` - Session liveness records
    /// * `authenticator` - Password verification and token signing
    pub fn new(users: Arc<UR>, store: Arc<SS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            sessions: SessionTracker::new(store),
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, SS> SessionServicePort for SessionService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, SessionError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| SessionError::UserNotFound(email.to_string()))?;

        let claims = self
            .authenticator
            .claims_for(user.id, user.email.as_str(), user.phone.as_str());
        let result = self
            .authenticator
            .authenticate(password, &user.hashed_password, claims)?;

        self.sessions
            .record_login(
                &result.claims.sub,
                &result.access_token,
                self.authenticator.token_ttl(),
            )
            .await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(IssuedToken {
            token: result.access_token,
            claims: result.claims,
        })
    }

    async fn logout(&self, user: &AuthenticatedUser) -> Result<(), SessionError> {
        self.sessions.revoke(&user.subject).await?;

        tracing::info!(user_id = %user.user_id, "Session closed");

        Ok(())
    }

    async fn authorize(&self, token: Option<&str>) -> Result<AuthenticatedUser, SessionError> {
        let token = token.ok_or(SessionError::MissingToken)?;

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| SessionError::InvalidToken(e.into()))?;

        if !self.sessions.is_alive(&claims.sub).await? {
            return Err(SessionError::InvalidToken(
                InvalidTokenReason::SessionRevoked,
            ));
        }

        let user_id = claims
            .user_id()
            .and_then(|id| UserId::from_string(id).ok())
            .ok_or(SessionError::InvalidToken(
                InvalidTokenReason::UnknownPrincipal,
            ))?;

        self.users
            .find_by_id_and_email(&user_id, &claims.email)
            .await?
            .ok_or(SessionError::InvalidToken(
                InvalidTokenReason::UnknownPrincipal,
            ))?;

        Ok(AuthenticatedUser {
            user_id,
            subject: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::change::ChangeRecord;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::user::errors::UserError;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id_and_email(&self, id: &UserId, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn append_change(&self, id: &UserId, change: ChangeRecord) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestSessionStore {}

        #[async_trait]
        impl SessionStore for TestSessionStore {
            async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), SessionError>;
            async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
            async fn delete(&self, key: &str) -> Result<(), SessionError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::days(60)))
    }

    fn registered_user(password: &str) -> User {
        let hashed = authenticator().hash_password(password).unwrap();
        let id = UserId::new();
        User {
            id,
            email: EmailAddress::new("foo@foo.com".to_string()).unwrap(),
            first_name: "foo".to_string(),
            last_name: "foo".to_string(),
            hashed_password: hashed.hash,
            password_salt: hashed.salt,
            phone: "15162961189".to_string(),
            is_host: false,
            rating: None,
            published: true,
            created_by: id,
            created_at: Utc::now(),
            changes: Vec::new(),
        }
    }

    fn token_for(user: &User) -> String {
        let claims = authenticator().claims_for(user.id, user.email.as_str(), user.phone.as_str());
        auth::JwtHandler::new(SECRET).encode(&claims).unwrap()
    }

    #[tokio::test]
    async fn test_login_records_session() {
        let user = registered_user("foo");
        let subject = format!("auth|{}", user.id);

        let mut users = MockTestUserRepository::new();
        let found = user.clone();
        users
            .expect_find_by_email()
            .withf(|email| email == "foo@foo.com")
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let mut store = MockTestSessionStore::new();
        let expected_key = subject.clone();
        store
            .expect_set_with_expiry()
            .withf(move |key, value, ttl| {
                key == expected_key && !value.is_empty() && *ttl == Duration::days(60)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        let issued = service.login("foo@foo.com", "foo").await.unwrap();
        assert_eq!(issued.claims.sub, subject);
        assert_eq!(
            issued.claims.exp - issued.claims.iat,
            Duration::days(60).num_seconds()
        );

        let decoded = authenticator().validate_token(&issued.token).unwrap();
        assert_eq!(decoded.user_id(), Some(user.id.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let mut store = MockTestSessionStore::new();
        store.expect_set_with_expiry().times(0);

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        let result = service.login("nobody@foo.com", "foo").await;
        assert!(matches!(result.unwrap_err(), SessionError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_writes_nothing() {
        let user = registered_user("foo");

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut store = MockTestSessionStore::new();
        store.expect_set_with_expiry().times(0);

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        let result = service.login("foo@foo.com", "bar").await;
        assert!(matches!(
            result.unwrap_err(),
            SessionError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authorize_missing_token() {
        let service = SessionService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(MockTestSessionStore::new()),
            authenticator(),
        );

        let result = service.authorize(None).await;
        assert!(matches!(result.unwrap_err(), SessionError::MissingToken));
    }

    #[tokio::test]
    async fn test_authorize_rejects_undecodable_tokens() {
        let user = registered_user("foo");
        let claims = authenticator().claims_for(user.id, "foo@foo.com", "1");
        let forged = auth::JwtHandler::new(b"another_secret_key_at_least_32_bytes")
            .encode(&claims)
            .unwrap();

        let mut store = MockTestSessionStore::new();
        store.expect_get().times(0);

        let service = SessionService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(store),
            authenticator(),
        );

        assert!(matches!(
            service.authorize(Some("not-a-token")).await.unwrap_err(),
            SessionError::InvalidToken(InvalidTokenReason::Malformed)
        ));
        assert!(matches!(
            service.authorize(Some(&forged)).await.unwrap_err(),
            SessionError::InvalidToken(InvalidTokenReason::Signature)
        ));
    }

    #[tokio::test]
    async fn test_authorize_rejects_expired_token() {
        let user = registered_user("foo");
        let authenticator = authenticator();
        let claims = auth::Claims::issued_at(
            Utc::now() - Duration::days(61),
            user.id,
            "foo@foo.com",
            "1",
            Duration::days(60),
        );
        let token = auth::JwtHandler::new(SECRET).encode(&claims).unwrap();

        let service = SessionService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(MockTestSessionStore::new()),
            authenticator,
        );

        assert!(matches!(
            service.authorize(Some(&token)).await.unwrap_err(),
            SessionError::InvalidToken(InvalidTokenReason::Expired)
        ));
    }

    #[tokio::test]
    async fn test_authorize_revoked_session() {
        let user = registered_user("foo");
        let token = token_for(&user);

        let mut users = MockTestUserRepository::new();
        users.expect_find_by_id_and_email().times(0);

        let mut store = MockTestSessionStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        assert!(matches!(
            service.authorize(Some(&token)).await.unwrap_err(),
            SessionError::InvalidToken(InvalidTokenReason::SessionRevoked)
        ));
    }

    #[tokio::test]
    async fn test_authorize_unknown_principal() {
        let user = registered_user("foo");
        let token = token_for(&user);

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id_and_email()
            .times(1)
            .returning(|_, _| Ok(None));

        let mut store = MockTestSessionStore::new();
        let live = token.clone();
        store.expect_get().returning(move |_| Ok(Some(live.clone())));

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        assert!(matches!(
            service.authorize(Some(&token)).await.unwrap_err(),
            SessionError::InvalidToken(InvalidTokenReason::UnknownPrincipal)
        ));
    }

    #[tokio::test]
    async fn test_authorize_success() {
        let user = registered_user("foo");
        let token = token_for(&user);
        let user_id = user.id;

        let mut users = MockTestUserRepository::new();
        users
            .expect_find_by_id_and_email()
            .withf(move |id, email| *id == user_id && email == "foo@foo.com")
            .times(1)
            .returning(move |_, _| Ok(Some(user.clone())));

        let mut store = MockTestSessionStore::new();
        let expected_key = format!("auth|{}", user_id);
        store
            .expect_get()
            .withf(move |key| key == expected_key)
            .returning(|_| Ok(Some("stored-token".to_string())));

        let service = SessionService::new(Arc::new(users), Arc::new(store), authenticator());

        let principal = service.authorize(Some(&token)).await.unwrap();
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.subject, format!("auth|{}", user_id));
    }

    #[tokio::test]
    async fn test_logout_revokes_subject() {
        let user_id = UserId::new();
        let subject = format!("auth|{}", user_id);

        let mut store = MockTestSessionStore::new();
        let expected_key = subject.clone();
        store
            .expect_delete()
            .withf(move |key| key == expected_key)
            .times(1)
            .returning(|_| Ok(()));

        let service = SessionService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(store),
            authenticator(),
        );

        service
            .logout(&AuthenticatedUser { user_id, subject })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_authorize_store_failure_is_not_invalid_token() {
        let user = registered_user("foo");
        let token = token_for(&user);

        let mut store = MockTestSessionStore::new();
        store
            .expect_get()
            .returning(|_| Err(SessionError::Store("timeout".to_string())));

        let service = SessionService::new(
            Arc::new(MockTestUserRepository::new()),
            Arc::new(store),
            authenticator(),
        );

        assert!(matches!(
            service.authorize(Some(&token)).await.unwrap_err(),
            SessionError::Store(_)
        ));
    }
}
