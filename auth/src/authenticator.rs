use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::HashedPassword;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Every token it issues lives for the configured session lifetime.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Claims encoded in `access_token`
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Build claims for a principal, issued now and expiring after the token lifetime.
    pub fn claims_for(
        &self,
        user_id: impl ToString,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Claims {
        Claims::for_principal(user_id, email, phone, self.token_ttl)
    }

    /// Verify credentials and sign a token for the given claims.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or format check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(b"test_secret_key_at_least_32_bytes!", Duration::days(60))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hashed = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let claims = authenticator.claims_for("user123", "foo@foo.com", "1");
        let result = authenticator
            .authenticate("my_password", &hashed.hash, claims.clone())
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.claims, claims);

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "auth|user123");
        assert_eq!(decoded.exp - decoded.iat, Duration::days(60).num_seconds());
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hashed = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");
        let claims = authenticator.claims_for("user123", "foo@foo.com", "1");

        let result = authenticator.authenticate("wrong_password", &hashed.hash, claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_digest() {
        let authenticator = authenticator();
        let claims = authenticator.claims_for("user123", "foo@foo.com", "1");

        let result = authenticator.authenticate("my_password", "not-a-phc-string", claims);
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_validate_token_from_same_secret() {
        let authenticator = authenticator();
        let claims = authenticator.claims_for("user123", "foo@foo.com", "1");

        let token = JwtHandler::new(b"test_secret_key_at_least_32_bytes!")
            .encode(&claims)
            .expect("Failed to generate token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
