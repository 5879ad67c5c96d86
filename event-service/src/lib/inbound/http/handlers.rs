use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::event::errors::EventError;
use crate::domain::session::errors::SessionError;
use crate::user::errors::UserError;

pub mod create_event;
pub mod create_user;
pub mod get_event;
pub mod get_user;
pub mod list_events;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod update_event;
pub mod update_user;

const MISSING_PARAMETER: &str = "Missing required parameter in the JSON body";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or invalid body fields, keyed by field name
    Validation(BTreeMap<String, String>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    /// No access token presented
    Forbidden(String),
    /// Access token rejected by the guard
    InvalidToken(String),
    /// Wrong credentials at login
    Unauthorized(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidToken(_) | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error tag carried in the response body.
    pub fn tag(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::InvalidToken(_) => "INVALID_TOKEN",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.tag();

        let (message, fields) = match self {
            ApiError::Validation(fields) => ("Request validation failed".to_string(), Some(fields)),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                // Store details stay in the log
                ("Internal server error".to_string(), None)
            }
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Forbidden(msg)
            | ApiError::InvalidToken(msg)
            | ApiError::Unauthorized(msg) => (msg, None),
        };

        let body = ApiResponseBody::new(
            status,
            ApiErrorData {
                error,
                message,
                fields,
            },
        );

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidEmail(ref e) => {
                let mut fields = FieldErrors::default();
                fields.invalid("email", e.to_string());
                fields.into_api_error()
            }
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(_) => ApiError::NotFound(err.to_string()),
            EventError::InvalidEventId(_) => ApiError::BadRequest(err.to_string()),
            EventError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::MissingToken => ApiError::Forbidden(err.to_string()),
            SessionError::InvalidToken(_) => ApiError::InvalidToken(err.to_string()),
            SessionError::Password(_)
            | SessionError::TokenIssuance(_)
            | SessionError::Store(_)
            | SessionError::UserLookup(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Per-field problems found while turning a request body into a command.
///
/// Every missing or invalid field is reported in one response.
#[derive(Debug, Default)]
pub struct FieldErrors {
    fields: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Pass `value` through, noting `name` as missing when absent or null.
    pub fn required<T>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fields
                .insert(name.to_string(), MISSING_PARAMETER.to_string());
        }
        value
    }

    pub fn invalid(&mut self, name: &str, message: impl Into<String>) {
        self.fields.insert(name.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_api_error(self) -> ApiError {
        ApiError::Validation(self.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}
