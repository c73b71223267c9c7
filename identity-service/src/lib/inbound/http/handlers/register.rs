use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::TokenResponse;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::IdentityRepository;
use crate::inbound::http::router::AppState;

/// POST /identity — register a new identity and return its first token.
pub async fn register<R: IdentityRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let command = body.try_into_command()?;

    let token = state.identity_service.register(command).await?;

    Ok(Json(TokenResponse { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        RegisterCommand::new(self.name, self.email, self.password).map_err(ApiError::from)
    }
}
