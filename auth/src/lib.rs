//! Authentication primitives for the identity service:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded bearer tokens (JWT, HS256)
//!
//! Both pieces are self-contained: the signing key and token lifetime are
//! injected at construction rather than read from ambient state, so callers
//! (and tests) control them explicitly.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(100));
//! let token = issuer.issue("user123").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
