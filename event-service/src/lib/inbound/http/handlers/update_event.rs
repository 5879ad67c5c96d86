use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::ApiError;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::EventId;
use crate::domain::event::models::UpdateEventCommand;
use crate::domain::event::ports::EventServicePort;
use crate::domain::session::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an event (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub max_guests_allowed: Option<i64>,
    pub cuisine: Option<Vec<String>>,
    pub price_per_person: Option<f64>,
    pub description: Option<String>,
    pub guests: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl From<UpdateEventRequest> for UpdateEventCommand {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            name: req.name,
            start_datetime: req.start_datetime,
            end_datetime: req.end_datetime,
            max_guests_allowed: req.max_guests_allowed,
            cuisine: req.cuisine,
            price_per_person: req.price_per_person,
            description: req.description,
            guests: req.guests,
            rating: req.rating,
        }
    }
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let event_id = EventId::from_string(&id).map_err(EventError::from)?;
    let Json(req) = body?;

    state
        .event_service
        .update_event(&event_id, req.into(), &user.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
