use md5::Digest;
use md5::Md5;

/// Derive a Gravatar URL from an email address.
///
/// Deterministic and purely local: md5 of the trimmed, lowercased address.
/// Query parameters: 200px, PG-rated, with the "mystery man" fallback for
/// addresses with no Gravatar account.
pub fn gravatar_url(email: &str) -> String {
    let digest = Md5::digest(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
