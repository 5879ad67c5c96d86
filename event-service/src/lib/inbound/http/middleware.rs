use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::errors::InvalidTokenReason;
use crate::domain::session::errors::SessionError;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Guard for mutating routes.
///
/// Reads the configured token header, resolves the session principal and adds
/// it to request extensions as [`AuthenticatedUser`](crate::domain::session::models::AuthenticatedUser).
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match req.headers().get(&state.token_header) {
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::warn!(header = %state.token_header, "Access token is not valid UTF-8");
            ApiError::from(SessionError::InvalidToken(InvalidTokenReason::Malformed))
        })?),
        None => None,
    };

    let user = state.session_service.authorize(token).await.map_err(|e| {
        match &e {
            SessionError::MissingToken => {
                tracing::warn!(uri = %req.uri(), "Request without access token")
            }
            SessionError::InvalidToken(reason) => {
                tracing::warn!(uri = %req.uri(), %reason, "Access token rejected")
            }
            _ => {}
        }
        ApiError::from(e)
    })?;

    tracing::debug!(user_id = %user.user_id, "Request authorized");

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
