use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::ValidationErrors;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Identity record.
///
/// One row per registered user; `email` is the unique lookup key and `id` is
/// the only field that ever lands in a token claim.
#[derive(Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

// The stored credential never reaches a log line, not even through Debug.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("avatar_url", &self.avatar_url)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address value type
///
/// Validates format using an RFC 5322 compliant parser. Stored as given;
/// uniqueness is keyed on the exact string.
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

/// Validated input for the registration flow.
///
/// Construction checks every field and collects one message per failure
/// instead of stopping at the first.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(name: String, email: String, password: String) -> Result<Self, ValidationErrors> {
        let mut messages = Vec::new();

        if name.trim().is_empty() {
            messages.push("name is required".to_string());
        }

        let email = match EmailAddress::new(email) {
            Ok(email) => Some(email),
            Err(_) => {
                messages.push("email must be a valid address".to_string());
                None
            }
        };

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            messages.push(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }

        match (email, messages.is_empty()) {
            (Some(email), true) => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(ValidationErrors { messages }),
        }
    }
}

/// Validated input for the authentication flow.
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    pub fn new(email: String, password: String) -> Result<Self, ValidationErrors> {
        let mut messages = Vec::new();

        let email = match EmailAddress::new(email) {
            Ok(email) => Some(email),
            Err(_) => {
                messages.push("email must be a valid address".to_string());
                None
            }
        };

        if password.is_empty() {
            messages.push("password is required".to_string());
        }

        match (email, messages.is_empty()) {
            (Some(email), true) => Ok(Self { email, password }),
            _ => Err(ValidationErrors { messages }),
        }
    }
}
