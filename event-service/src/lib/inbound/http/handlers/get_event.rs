use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::change::ChangeRecord;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<ApiSuccess<EventResponseData>, ApiError> {
    let event_id = EventId::from_string(&event_id).map_err(EventError::from)?;

    state
        .event_service
        .get_event(&event_id)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventResponseData {
    pub id: String,
    pub host_id: String,
    pub name: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub max_guests_allowed: i64,
    pub cuisine: Vec<String>,
    pub price_per_person: f64,
    pub description: String,
    pub guests: Vec<String>,
    pub rating: Option<f64>,
    pub published: bool,
    pub view_count: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<ChangeRecord>,
}

impl From<&Event> for EventResponseData {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            host_id: event.host_id.to_string(),
            name: event.name.clone(),
            start_datetime: event.start_datetime,
            end_datetime: event.end_datetime,
            max_guests_allowed: event.max_guests_allowed,
            cuisine: event.cuisine.clone(),
            price_per_person: event.price_per_person,
            description: event.description.clone(),
            guests: event.guests.clone(),
            rating: event.rating,
            published: event.published,
            view_count: event.view_count,
            created_by: event.created_by.to_string(),
            created_at: event.created_at,
            changes: event.changes.clone(),
        }
    }
}
