use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::ports::IdentityRepository;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

/// GET /identity — the record behind the presented token, minus the credential.
pub async fn get_identity<R: IdentityRepository>(
    State(state): State<AppState<R>>,
    Extension(authenticated): Extension<AuthenticatedIdentity>,
) -> Result<Json<IdentityResponse>, ApiError> {
    let identity = state
        .identity_service
        .get_identity(&authenticated.identity_id)
        .await?;

    Ok(Json((&identity).into()))
}

/// The identity record as exposed over HTTP. Deliberately has no field for
/// the stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.as_str().to_string(),
            avatar_url: identity.avatar_url.clone(),
            created_at: identity.created_at,
        }
    }
}
