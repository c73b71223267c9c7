use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_session::create_session;
use super::handlers::get_identity::get_identity;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::service::IdentityService;

pub struct AppState<R>
where
    R: IdentityRepository,
{
    pub identity_service: Arc<IdentityService<R>>,
    pub token_issuer: Arc<TokenIssuer>,
}

// Manual impl: `R` itself need not be Clone, the state only holds Arcs.
impl<R> Clone for AppState<R>
where
    R: IdentityRepository,
{
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
            token_issuer: Arc::clone(&self.token_issuer),
        }
    }
}

pub fn create_router<R>(
    identity_service: Arc<IdentityService<R>>,
    token_issuer: Arc<TokenIssuer>,
) -> Router
where
    R: IdentityRepository,
{
    let state = AppState {
        identity_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route("/identity", post(register::<R>))
        .route("/session", post(create_session::<R>));

    let protected_routes = Router::new()
        .route("/identity", get(get_identity::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<R>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
