use serde::Deserialize;
use serde::Serialize;

/// Claim set embedded in a bearer token.
///
/// The subject is the only piece of identity carried; `iat`/`exp` bound the
/// validity window. Nothing else is stored server-side for an issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), strictly greater than `iat`
    pub exp: i64,
}
