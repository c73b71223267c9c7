use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::identity::avatar::gravatar_url;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::IdentityRepository;

/// Domain service for the registration and authentication flows.
///
/// Argon2 hashing and verification are CPU-bound, so both run on the blocking
/// thread pool rather than the request executor.
pub struct IdentityService<R>
where
    R: IdentityRepository,
{
    repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_issuer: Arc<TokenIssuer>,
}

impl<R> IdentityService<R>
where
    R: IdentityRepository,
{
    pub fn new(repository: Arc<R>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            password_hasher: Arc::new(PasswordHasher::new()),
            token_issuer,
        }
    }

    /// Register a new identity and issue its first token.
    ///
    /// Stops before any side effect when the email is already registered; the
    /// repository's unique constraint backstops the race between the check
    /// and the insert.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - the email is already registered
    /// * `Database` / `Password` / `Token` - surfaced as internal failures
    pub async fn register(&self, command: RegisterCommand) -> Result<String, IdentityError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let avatar_url = gravatar_url(command.email.as_str());
        let password_hash = self.hash_password(command.password).await?;

        let identity = Identity {
            id: IdentityId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            avatar_url,
            created_at: Utc::now(),
        };

        let created = self.repository.create(identity).await?;

        tracing::info!(identity_id = %created.id, "Identity registered");

        let token = self.token_issuer.issue(&created.id.to_string())?;
        Ok(token)
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and wrong password produce the same `InvalidCredentials`
    /// error; no path reveals whether the email is registered.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no matching identity
    /// * `Database` / `Password` / `Token` - surfaced as internal failures
    pub async fn authenticate(&self, credentials: Credentials) -> Result<String, IdentityError> {
        let identity = self
            .repository
            .find_by_email(credentials.email.as_str())
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let matches = self
            .verify_password(credentials.password, identity.password_hash.clone())
            .await?;

        if !matches {
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.token_issuer.issue(&identity.id.to_string())?;
        Ok(token)
    }

    /// Retrieve an identity by id.
    ///
    /// # Errors
    /// * `NotFound` - no identity with this id
    /// * `Database` - storage operation failed
    pub async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::NotFound(id.to_string()))
    }

    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(IdentityError::from)
    }

    async fn verify_password(
        &self,
        password: String,
        hash: String,
    ) -> Result<bool, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| IdentityError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(IdentityError::from)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::PasswordHasher;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::identity::models::EmailAddress;

    mock! {
        pub TestIdentityRepository {}

        #[async_trait]
        impl IdentityRepository for TestIdentityRepository {
            async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
            async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;
        }
    }

    const SECRET: &[u8] = b"test-secret-key-for-token-signing-32b!";

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(SECRET, Duration::hours(100)))
    }

    fn stored_identity(email: &str, password: &str) -> Identity {
        Identity {
            id: IdentityId::new(),
            name: "Ada".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            avatar_url: gravatar_url(email),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|identity| {
                identity.name == "Ada"
                    && identity.email.as_str() == "ada@example.com"
                    && identity.password_hash.starts_with("$argon2")
                    && identity.password_hash != "secret1"
                    && identity.avatar_url == gravatar_url("ada@example.com")
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let token_issuer = issuer();
        let service = IdentityService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let command = RegisterCommand::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "secret1".to_string(),
        )
        .unwrap();

        let token = service.register(command).await.expect("expected a token");

        // The token's subject is the freshly assigned id
        let claims = token_issuer.verify(&token).expect("token should verify");
        assert!(IdentityId::from_string(&claims.sub).is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_stops_before_create() {
        let mut repository = MockTestIdentityRepository::new();

        let existing = stored_identity("ada@example.com", "secret1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        // The flow must stop: no record written, no token issued
        repository.expect_create().times(0);

        let service = IdentityService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "secret1".to_string(),
        )
        .unwrap();

        let result = service.register(command).await;
        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestIdentityRepository::new();

        let identity = stored_identity("ada@example.com", "secret1");
        let identity_id = identity.id;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let token_issuer = issuer();
        let service = IdentityService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let credentials =
            Credentials::new("ada@example.com".to_string(), "secret1".to_string()).unwrap();

        let token = service
            .authenticate(credentials)
            .await
            .expect("expected a token");

        let claims = token_issuer.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, identity_id.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_and_wrong_password_are_identical() {
        let mut repository = MockTestIdentityRepository::new();

        let identity = stored_identity("ada@example.com", "secret1");
        repository
            .expect_find_by_email()
            .withf(|email| email == "nobody@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let service = IdentityService::new(Arc::new(repository), issuer());

        let unknown = service
            .authenticate(
                Credentials::new("nobody@example.com".to_string(), "secret1".to_string()).unwrap(),
            )
            .await
            .expect_err("expected failure");

        let wrong = service
            .authenticate(
                Credentials::new("ada@example.com".to_string(), "wrong-password".to_string())
                    .unwrap(),
            )
            .await
            .expect_err("expected failure");

        // Same variant, same message for both cases
        assert!(matches!(unknown, IdentityError::InvalidCredentials));
        assert!(matches!(wrong, IdentityError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_get_identity_success() {
        let mut repository = MockTestIdentityRepository::new();

        let identity = stored_identity("ada@example.com", "secret1");
        let identity_id = identity.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == identity_id)
            .times(1)
            .returning(move |_| Ok(Some(identity.clone())));

        let service = IdentityService::new(Arc::new(repository), issuer());

        let found = service.get_identity(&identity_id).await.unwrap();
        assert_eq!(found.id, identity_id);
        assert_eq!(found.email.as_str(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_get_identity_not_found() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = IdentityService::new(Arc::new(repository), issuer());

        let result = service.get_identity(&IdentityId::new()).await;
        assert!(matches!(result, Err(IdentityError::NotFound(_))));
    }
}
