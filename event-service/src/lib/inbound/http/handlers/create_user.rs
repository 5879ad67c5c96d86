use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_user::UserResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
    phone: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let mut fields = FieldErrors::default();
        let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string());

        let email = fields
            .required("email", trimmed(self.email))
            .and_then(|raw| match EmailAddress::new(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    fields.invalid("email", e.to_string());
                    None
                }
            });
        let first_name = fields.required("first_name", trimmed(self.first_name));
        let last_name = fields.required("last_name", trimmed(self.last_name));
        let password = fields.required("password", trimmed(self.password));
        let phone = fields.required("phone", trimmed(self.phone));

        let (Some(email), Some(first_name), Some(last_name), Some(password), Some(phone)) =
            (email, first_name, last_name, password, phone)
        else {
            return Err(fields.into_api_error());
        };

        Ok(CreateUserCommand {
            email,
            first_name,
            last_name,
            password,
            phone,
        })
    }
}
