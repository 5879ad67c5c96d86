use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::change::ChangeRecord;
use crate::domain::event::errors::EventError;
use crate::domain::event::models::Event;
use crate::domain::event::models::EventId;
use crate::domain::event::ports::EventRepository;

/// Events kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: Event) -> Result<Event, EventError> {
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventError> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventError> {
        Ok(self.events.read().await.clone())
    }

    async fn append_change(&self, id: &EventId, change: ChangeRecord) -> Result<(), EventError> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or(EventError::NotFound(*id))?;

        event.changes.push(change);
        Ok(())
    }
}
