use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::change::ChangeRecord;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventRepository;
use crate::domain::user::models::UserId;

const EVENT_COLUMNS: &str = "id, host_id, name, start_datetime, end_datetime, max_guests_allowed, \
     cuisine, price_per_person, description, guests, rating, published, view_count, \
     created_by, created_at, changes";

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &PgRow) -> Result<Event, EventError> {
        let decode = |e: sqlx::Error| EventError::DatabaseError(e.to_string());
        let changes: Json<Vec<ChangeRecord>> = row.try_get("changes").map_err(decode)?;

        Ok(Event {
            id: EventId(row.try_get("id").map_err(decode)?),
            host_id: UserId(row.try_get("host_id").map_err(decode)?),
            name: row.try_get("name").map_err(decode)?,
            start_datetime: row.try_get("start_datetime").map_err(decode)?,
            end_datetime: row.try_get("end_datetime").map_err(decode)?,
            max_guests_allowed: row.try_get("max_guests_allowed").map_err(decode)?,
            cuisine: row.try_get("cuisine").map_err(decode)?,
            price_per_person: row.try_get("price_per_person").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            guests: row.try_get("guests").map_err(decode)?,
            rating: row.try_get("rating").map_err(decode)?,
            published: row.try_get("published").map_err(decode)?,
            view_count: row.try_get("view_count").map_err(decode)?,
            created_by: UserId(row.try_get("created_by").map_err(decode)?),
            created_at: row.try_get("created_at").map_err(decode)?,
            changes: changes.0,
        })
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: Event) -> Result<Event, EventError> {
        sqlx::query(
            r#"
            INSERT INTO events (id, host_id, name, start_datetime, end_datetime, max_guests_allowed,
                                cuisine, price_per_person, description, guests, rating, published,
                                view_count, created_by, created_at, changes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(event.id.0)
        .bind(event.host_id.0)
        .bind(&event.name)
        .bind(event.start_datetime)
        .bind(event.end_datetime)
        .bind(event.max_guests_allowed)
        .bind(&event.cuisine)
        .bind(event.price_per_person)
        .bind(&event.description)
        .bind(&event.guests)
        .bind(event.rating)
        .bind(event.published)
        .bind(event.view_count)
        .bind(event.created_by.0)
        .bind(event.created_at)
        .bind(Json(&event.changes))
        .execute(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        Ok(event)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_event).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_event).collect()
    }

    async fn append_change(&self, id: &EventId, change: ChangeRecord) -> Result<(), EventError> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET changes = changes || $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(Json(vec![change]))
        .execute(&self.pool)
        .await
        .map_err(|e| EventError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(EventError::NotFound(*id));
        }

        Ok(())
    }
}
