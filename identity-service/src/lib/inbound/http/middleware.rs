use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated identity id through the request
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
}

/// Token gate for protected routes.
///
/// Verifies the bearer token and attaches the resolved id to the request
/// extensions; on any failure the wrapped handler never runs. Never touches
/// the identity store.
pub async fn authenticate<R: IdentityRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.token_issuer.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        unauthorized("invalid or expired token")
    })?;

    let identity_id = IdentityId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Token subject is not an identity id: {}", e);
        unauthorized("invalid token")
    })?;

    req.extensions_mut()
        .insert(AuthenticatedIdentity { identity_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("no token"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("invalid authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized("invalid authorization header"));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
