use std::fmt;

use thiserror::Error;

use crate::user::errors::UserError;

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenReason {
    /// Signature or algorithm does not match the shared secret
    Signature,
    Expired,
    /// Not a token, or a token missing required claims
    Malformed,
    /// Token decodes but the session was logged out or has lapsed
    SessionRevoked,
    /// No user matches the subject and email carried by the token
    UnknownPrincipal,
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidTokenReason::Signature => "signature mismatch",
            InvalidTokenReason::Expired => "token expired",
            InvalidTokenReason::Malformed => "malformed token",
            InvalidTokenReason::SessionRevoked => "session is not active",
            InvalidTokenReason::UnknownPrincipal => "unknown principal",
        };
        f.write_str(reason)
    }
}

impl From<auth::JwtError> for InvalidTokenReason {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::InvalidSignature => InvalidTokenReason::Signature,
            auth::JwtError::Expired => InvalidTokenReason::Expired,
            auth::JwtError::Malformed(_) | auth::JwtError::EncodingFailed(_) => {
                InvalidTokenReason::Malformed
            }
        }
    }
}

/// Top-level error for login, logout and request authorization
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No user registered with email {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Access token is missing")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(auth::JwtError),

    // Infrastructure errors
    #[error("Session store error: {0}")]
    Store(String),

    #[error("User lookup failed: {0}")]
    UserLookup(#[from] UserError),
}

impl From<auth::AuthenticationError> for SessionError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => SessionError::Password(e),
            auth::AuthenticationError::JwtError(e) => SessionError::TokenIssuance(e),
        }
    }
}
