use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::change::ChangeRecord;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::CreateEventCommand;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::models::UpdateEventCommand;
use crate::domain::event::ports::EventRepository;
use crate::domain::event::ports::EventServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for event operations.
pub struct EventService<ER>
where
    ER: EventRepository,
{
    repository: Arc<ER>,
}

impl<ER> EventService<ER>
where
    ER: EventRepository,
{
    pub fn new(repository: Arc<ER>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<ER> EventServicePort for EventService<ER>
where
    ER: EventRepository,
{
    async fn create_event(
        &self,
        command: CreateEventCommand,
        host: &UserId,
    ) -> Result<Event, EventError> {
        let event = Event {
            id: EventId::new(),
            host_id: *host,
            name: command.name,
            start_datetime: command.start_datetime,
            end_datetime: command.end_datetime,
            max_guests_allowed: command.max_guests_allowed,
            cuisine: command.cuisine,
            price_per_person: command.price_per_person,
            description: command.description,
            guests: Vec::new(),
            rating: None,
            published: true,
            view_count: 0,
            created_by: *host,
            created_at: Utc::now(),
            changes: Vec::new(),
        };

        let created_event = self.repository.create(event).await?;

        tracing::info!(event_id = %created_event.id, host_id = %host, "Event created");

        Ok(created_event)
    }

    async fn get_event(&self, id: &EventId) -> Result<Event, EventError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(*id))
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventError> {
        self.repository.list_all().await
    }

    async fn update_event(
        &self,
        id: &EventId,
        command: UpdateEventCommand,
        updated_by: &UserId,
    ) -> Result<Option<ChangeRecord>, EventError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(EventError::NotFound(*id))?;

        let changes = command.into_change_set();
        if changes.is_empty() {
            return Ok(None);
        }

        let record = changes.into_record(*updated_by, Utc::now());
        self.repository.append_change(id, record.clone()).await?;

        tracing::info!(
            event_id = %id,
            updated_by = %updated_by,
            fields = record.fields.len(),
            "Event change recorded"
        );

        Ok(Some(record))
    }
}
