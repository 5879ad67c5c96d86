use axum::extract::State;
use axum::http::StatusCode;

use super::get_event::EventResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_events(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<EventResponseData>>, ApiError> {
    state
        .event_service
        .list_events()
        .await
        .map_err(ApiError::from)
        .map(|events| ApiSuccess::new(StatusCode::OK, events.iter().map(Into::into).collect()))
}
