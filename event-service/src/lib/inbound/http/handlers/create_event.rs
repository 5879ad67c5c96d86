use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::get_event::EventResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::event::models::CreateEventCommand;
use crate::domain::event::ports::EventServicePort;
use crate::domain::session::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<ApiSuccess<EventResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .event_service
        .create_event(body.try_into_command()?, &user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::CREATED, event.into()))
}

/// HTTP request body for creating an event (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateEventRequest {
    name: Option<String>,
    start_datetime: Option<DateTime<Utc>>,
    end_datetime: Option<DateTime<Utc>>,
    max_guests_allowed: Option<i64>,
    cuisine: Option<Vec<String>>,
    price_per_person: Option<f64>,
    description: Option<String>,
}

impl CreateEventRequest {
    fn try_into_command(self) -> Result<CreateEventCommand, ApiError> {
        let mut fields = FieldErrors::default();

        let name = fields.required("name", self.name);
        let start_datetime = fields.required("start_datetime", self.start_datetime);
        let end_datetime = fields.required("end_datetime", self.end_datetime);
        let max_guests_allowed = fields.required("max_guests_allowed", self.max_guests_allowed);
        let cuisine = fields.required("cuisine", self.cuisine);
        let price_per_person = fields.required("price_per_person", self.price_per_person);
        let description = fields.required("description", self.description);

        let (
            Some(name),
            Some(start_datetime),
            Some(end_datetime),
            Some(max_guests_allowed),
            Some(cuisine),
            Some(price_per_person),
            Some(description),
        ) = (
            name,
            start_datetime,
            end_datetime,
            max_guests_allowed,
            cuisine,
            price_per_person,
            description,
        )
        else {
            return Err(fields.into_api_error());
        };

        Ok(CreateEventCommand {
            name,
            start_datetime,
            end_datetime,
            max_guests_allowed,
            cuisine,
            price_per_person,
            description,
        })
    }
}
