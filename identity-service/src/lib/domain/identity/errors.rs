use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Input validation failures, one message per failed field.
///
/// All fields are checked before reporting, so a request with an empty name
/// and a short password gets both messages in one response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .messages.join(", "))]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

/// Top-level error for identity operations
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity already exists: {0}")]
    EmailAlreadyExists(String),

    /// One error for both "unknown email" and "wrong password"; callers must
    /// not be able to tell which case occurred.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
