use async_trait::async_trait;

use crate::domain::change::ChangeRecord;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::CreateEventCommand;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::models::UpdateEventCommand;
use crate::domain::user::models::UserId;

/// Port for event domain service operations.
#[async_trait]
pub trait EventServicePort: Send + Sync + 'static {
    /// Create an event hosted by `host`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_event(
        &self,
        command: CreateEventCommand,
        host: &UserId,
    ) -> Result<Event, EventError>;

    /// Retrieve event by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_event(&self, id: &EventId) -> Result<Event, EventError>;

    /// Retrieve every stored event.
    async fn list_events(&self) -> Result<Vec<Event>, EventError>;

    /// Record an update to an existing event.
    ///
    /// # Returns
    /// The appended change record, or `None` when no field was supplied
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_event(
        &self,
        id: &EventId,
        command: UpdateEventCommand,
        updated_by: &UserId,
    ) -> Result<Option<ChangeRecord>, EventError>;
}

/// Persistence operations for the event aggregate (the `events` collection).
#[async_trait]
pub trait EventRepository: Send + Sync + 'static {
    /// Persist new event to storage.
    async fn create(&self, event: Event) -> Result<Event, EventError>;

    /// Retrieve event by identifier.
    ///
    /// # Returns
    /// Optional event entity (None if not found)
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError>;

    /// Retrieve all events from storage.
    async fn list_all(&self) -> Result<Vec<Event>, EventError>;

    /// Append a change record to a stored event.
    ///
    /// # Errors
    /// * `NotFound` - Event does not exist
    /// * `DatabaseError` - Database operation failed
    async fn append_change(&self, id: &EventId, change: ChangeRecord) -> Result<(), EventError>;
}
