use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let (email, password) = body.try_into_credentials()?;

    let issued = state.session_service.login(&email, &password).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        LoginResponseData {
            token: issued.token,
        },
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_credentials(self) -> Result<(String, String), ApiError> {
        let mut fields = FieldErrors::default();
        let email = fields.required("email", self.email);
        let password = fields.required("password", self.password);

        match (email, password) {
            (Some(email), Some(password)) => {
                Ok((email.trim().to_string(), password.trim().to_string()))
            }
            _ => Err(fields.into_api_error()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
