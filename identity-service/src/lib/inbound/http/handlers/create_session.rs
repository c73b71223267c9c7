use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::TokenResponse;
use crate::domain::identity::models::Credentials;
use crate::domain::identity::ports::IdentityRepository;
use crate::inbound::http::router::AppState;

/// POST /session — verify credentials and return a fresh token.
pub async fn create_session<R: IdentityRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let credentials = Credentials::new(body.email, body.password).map_err(ApiError::from)?;

    let token = state.identity_service.authenticate(credentials).await?;

    Ok(Json(TokenResponse { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSessionRequest {
    email: String,
    password: String,
}
