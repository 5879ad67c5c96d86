use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::change::ChangeRecord;
use crate::domain::change::ChangeSet;
use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Base fields are written once at registration. Updates only ever append to
/// `changes`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub password_salt: String,
    pub phone: String,
    pub is_host: bool,
    pub rating: Option<f64>,
    pub published: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<ChangeRecord>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is
/// case-sensitive, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone: String,
}

/// Command to update an existing user.
///
/// Every field is optional; only supplied fields end up in the change record.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub email: Option<EmailAddress>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Plain text password (hashed by the service before it is recorded)
    pub password: Option<String>,
    pub phone: Option<String>,
    pub is_host: Option<bool>,
    pub rating: Option<f64>,
}

impl UpdateUserCommand {
    /// Collect supplied fields. `password_hash` replaces the plain text password.
    pub fn into_change_set(self, password_hash: Option<String>) -> ChangeSet {
        ChangeSet::new()
            .set("email", self.email.map(|email| email.as_str().to_string()))
            .set("first_name", self.first_name)
            .set("last_name", self.last_name)
            .set("password", password_hash)
            .set("phone", self.phone)
            .set("is_host", self.is_host)
            .set("rating", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::FieldValue;

    #[test]
    fn test_user_id_from_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("-1").is_err());
    }

    #[test]
    fn test_email_address() {
        assert!(EmailAddress::new("foo@foo.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_update_command_change_set() {
        let command = UpdateUserCommand {
            first_name: Some("Foo".to_string()),
            password: Some("secret".to_string()),
            is_host: Some(true),
            ..Default::default()
        };

        let changes = command.into_change_set(Some("$argon2id$digest".to_string()));

        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes.get("password"),
            Some(&FieldValue::Text("$argon2id$digest".to_string()))
        );
        assert_eq!(changes.get("is_host"), Some(&FieldValue::Flag(true)));
        assert!(changes.get("last_name").is_none());
    }
}
