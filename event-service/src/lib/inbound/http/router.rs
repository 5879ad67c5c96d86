use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderName;
use axum::http::HeaderName;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_event::create_event;
use super::handlers::create_user::create_user;
use super::handlers::get_event::get_event;
use super::handlers::get_user::get_user;
use super::handlers::list_events::list_events;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::update_event::update_event;
use super::handlers::update_user::update_user;
use super::middleware::require_access_token;
use crate::domain::event::ports::EventServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub event_service: Arc<dyn EventServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    /// Header carrying the session token
    pub token_header: HeaderName,
}

/// Build the `/api/v1` router.
///
/// # Errors
/// * `InvalidHeaderName` - `token_header` is not a valid HTTP header name
pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    event_service: Arc<dyn EventServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    token_header: &str,
) -> Result<Router, InvalidHeaderName> {
    let state = AppState {
        user_service,
        event_service,
        session_service,
        token_header: HeaderName::from_bytes(token_header.as_bytes())?,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users/:id", get(get_user))
        .route("/api/v1/events", get(list_events))
        .route("/api/v1/events/:id", get(get_event));

    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", delete(logout))
        .route("/api/v1/users/:id", put(update_user))
        .route("/api/v1/events", post(create_event))
        .route("/api/v1/events/:id", put(update_event))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
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

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state))
}
