use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::change::ChangeRecord;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// Stored user document as rendered by the API.
///
/// The base fields are returned as written at registration; later updates
/// appear only in `changes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub password_salt: String,
    pub phone: String,
    pub is_host: bool,
    pub rating: Option<f64>,
    pub published: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<ChangeRecord>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            hashed_password: user.hashed_password.clone(),
            password_salt: user.password_salt.clone(),
            phone: user.phone.clone(),
            is_host: user.is_host,
            rating: user.rating,
            published: user.published,
            created_by: user.created_by.to_string(),
            created_at: user.created_at,
            changes: user.changes.clone(),
        }
    }
}
