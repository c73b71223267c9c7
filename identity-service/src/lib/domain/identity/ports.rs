use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;

/// Persistence port for the identity directory.
///
/// The directory is an external collaborator: it owns uniqueness of the email
/// key (two racing registrations for one email must yield exactly one success)
/// and is reached only through the lookups below.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - the email key is already taken
    /// * `Database` - storage operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Look up an identity by its email key.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Look up an identity by id.
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;
}
