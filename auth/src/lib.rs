//! Session authentication library
//!
//! Provides the token and credential primitives used by the event service:
//! - Password hashing (Argon2id, digest and salt kept separately)
//! - Session token encoding and validation (HS256, subject `auth|<user id>`)
//! - Authentication coordination
//!
//! Session liveness (whether a token is still "logged in") is not tracked here;
//! callers pair a decoded token with their own session store.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hashed = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hashed.hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_principal("user123", "foo@foo.com", "15162961189", Duration::days(60));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.user_id(), Some("user123"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::days(60));
//!
//! // Register: hash password
//! let hashed = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and sign a token
//! let claims = auth.claims_for("user123", "foo@foo.com", "15162961189");
//! let result = auth.authenticate("password123", &hashed.hash, claims).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub, "auth|user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::subject_for;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashedPassword;
pub use password::PasswordError;
pub use password::PasswordHasher;
