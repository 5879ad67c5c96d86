use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::change::ChangeRecord;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, email, first_name, last_name, hashed_password, password_salt, \
     phone, is_host, rating, published, created_by, created_at, changes";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let decode = |e: sqlx::Error| UserError::DatabaseError(e.to_string());
        let changes: Json<Vec<ChangeRecord>> = row.try_get("changes").map_err(decode)?;

        Ok(User {
            id: UserId(row.try_get("id").map_err(decode)?),
            email: EmailAddress::new(row.try_get("email").map_err(decode)?)?,
            first_name: row.try_get("first_name").map_err(decode)?,
            last_name: row.try_get("last_name").map_err(decode)?,
            hashed_password: row.try_get("hashed_password").map_err(decode)?,
            password_salt: row.try_get("password_salt").map_err(decode)?,
            phone: row.try_get("phone").map_err(decode)?,
            is_host: row.try_get("is_host").map_err(decode)?,
            rating: row.try_get("rating").map_err(decode)?,
            published: row.try_get("published").map_err(decode)?,
            created_by: UserId(row.try_get("created_by").map_err(decode)?),
            created_at: row.try_get("created_at").map_err(decode)?,
            changes: changes.0,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, hashed_password, password_salt,
                               phone, is_host, rating, published, created_by, created_at, changes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.hashed_password)
        .bind(&user.password_salt)
        .bind(&user.phone)
        .bind(user.is_host)
        .bind(user.rating)
        .bind(user.published)
        .bind(user.created_by.0)
        .bind(user.created_at)
        .bind(Json(&user.changes))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id_and_email(
        &self,
        id: &UserId,
        email: &str,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND email = $2"
        ))
        .bind(id.0)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn append_change(&self, id: &UserId, change: ChangeRecord) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET changes = changes || $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(Json(vec![change]))
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
