use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Prefix that turns a user id into a session subject.
pub const SUBJECT_PREFIX: &str = "auth|";

/// Session token claims.
///
/// The subject doubles as the key of the session liveness record, so it is
/// always `"auth|" + user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Subject, `auth|<user id>`
    pub sub: String,

    pub email: String,

    pub phone: String,
}

impl Claims {
    /// Create claims for a principal, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - Email the principal logged in with
    /// * `phone` - Phone number stored for the principal
    /// * `ttl` - Lifetime of the token
    pub fn for_principal(
        user_id: impl ToString,
        email: impl Into<String>,
        phone: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::issued_at(Utc::now(), user_id, email, phone, ttl)
    }

    /// Create claims for a principal with an explicit issuance instant.
    pub fn issued_at(
        now: DateTime<Utc>,
        user_id: impl ToString,
        email: impl Into<String>,
        phone: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            sub: subject_for(user_id),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// User id carried by the subject, if the subject has the expected prefix.
    pub fn user_id(&self) -> Option<&str> {
        self.sub
            .strip_prefix(SUBJECT_PREFIX)
            .filter(|id| !id.is_empty())
    }
}

/// Build the session subject for a user id.
pub fn subject_for(user_id: impl ToString) -> String {
    format!("{}{}", SUBJECT_PREFIX, user_id.to_string())
}
