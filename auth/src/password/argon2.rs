use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Digest of a password together with the salt it was derived from.
///
/// The digest is a PHC string and already embeds the salt; the salt is kept
/// alongside so both can be stored as separate fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// Password hashing implementation (Argon2id).
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<HashedPassword, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hash_with_salt(password, salt.as_str())
    }

    /// Hash a plaintext password with a given B64-encoded salt.
    ///
    /// # Errors
    /// * `InvalidSalt` - Salt is not valid B64 or has an unsupported length
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash_with_salt(
        &self,
        password: &str,
        salt: &str,
    ) -> Result<HashedPassword, PasswordError> {
        let salt =
            SaltString::from_b64(salt).map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
                salt: salt.as_str().to_string(),
            })
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Digest is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
