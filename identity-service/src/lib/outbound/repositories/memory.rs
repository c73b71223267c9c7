use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;

/// In-memory identity directory.
///
/// Backs the black-box test suite so it runs without Postgres. Enforces the
/// unique-email invariant under the write lock, like the real store's
/// constraint.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    inner: RwLock<HashMap<Uuid, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.inner.write().await;

        if identities
            .values()
            .any(|existing| existing.email == identity.email)
        {
            return Err(IdentityError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ));
        }

        identities.insert(identity.id.0, identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let identities = self.inner.read().await;
        Ok(identities
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let identities = self.inner.read().await;
        Ok(identities.get(&id.0).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::identity::models::EmailAddress;

    fn identity(email: &str) -> Identity {
        Identity {
            id: IdentityId::new(),
            name: "Ada".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            avatar_url: "https://www.gravatar.com/avatar/x".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryIdentityRepository::new();

        let created = repository.create(identity("ada@example.com")).await.unwrap();

        let by_email = repository
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("expected a record");
        assert_eq!(by_email.id, created.id);

        let by_id = repository
            .find_by_id(&created.id)
            .await
            .unwrap()
            .expect("expected a record");
        assert_eq!(by_id.email.as_str(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_rejected() {
        let repository = InMemoryIdentityRepository::new();

        repository.create(identity("ada@example.com")).await.unwrap();
        let result = repository.create(identity("ada@example.com")).await;

        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));

        // Exactly one record survives
        assert!(repository
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repository = InMemoryIdentityRepository::new();
        assert!(repository
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(repository
            .find_by_id(&IdentityId::new())
            .await
            .unwrap()
            .is_none());
    }
}
