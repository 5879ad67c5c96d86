use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::change::ChangeRecord;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hashes passwords the same way login verifies them
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Existence check and insert are separate round trips
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password = self.authenticator.hash_password(&command.password)?;

        let id = UserId::new();
        let user = User {
            id,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            hashed_password: password.hash,
            password_salt: password.salt,
            phone: command.phone,
            is_host: false,
            rating: None,
            published: true,
            created_by: id,
            created_at: Utc::now(),
            changes: Vec::new(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
        updated_by: &UserId,
    ) -> Result<Option<ChangeRecord>, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let password_hash = match command.password.as_deref() {
            Some(password) => Some(self.authenticator.hash_password(password)?.hash),
            None => None,
        };

        let changes = command.into_change_set(password_hash);
        if changes.is_empty() {
            tracing::debug!(user_id = %id, "Update carried no fields, nothing recorded");
            return Ok(None);
        }

        let record = changes.into_record(*updated_by, Utc::now());
        self.repository.append_change(id, record.clone()).await?;

        tracing::info!(
            user_id = %id,
            updated_by = %updated_by,
            fields = record.fields.len(),
            "User change recorded"
        );

        Ok(Some(record))
    }
}
