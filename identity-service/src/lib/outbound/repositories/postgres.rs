use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> Result<Identity, IdentityError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| IdentityError::Database(format!("Stored email is invalid: {}", e)))?;

        Ok(Identity {
            id: IdentityId(self.id),
            name: self.name,
            email,
            password_hash: self.password_hash,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, name, email, password_hash, avatar_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(identity.id.0)
        .bind(&identity.name)
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(&identity.avatar_url)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraint is the authoritative duplicate check;
            // a race past the service-level lookup lands here.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("identities_email_key")
                {
                    return IdentityError::EmailAlreadyExists(
                        identity.email.as_str().to_string(),
                    );
                }
            }
            IdentityError::Database(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, password_hash, avatar_url, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        row.map(IdentityRow::into_identity).transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, password_hash, avatar_url, created_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        row.map(IdentityRow::into_identity).transpose()
    }
}
