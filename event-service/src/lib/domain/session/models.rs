use auth::Claims;

use crate::domain::user::models::UserId;

/// Token handed out by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Principal resolved by the access-token guard.
///
/// Inserted into request extensions for guarded handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    /// Session key, `auth|<user id>`
    pub subject: String,
}
