use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::change::ChangeRecord;
use crate::domain::change::ChangeSet;
use crate::domain::event::errors::EventIdError;
use crate::domain::user::models::UserId;

/// Event unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an event ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, EventIdError> {
        Uuid::parse_str(s)
            .map(EventId)
            .map_err(|e| EventIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hosted gathering.
///
/// Like users, events are append-only: `changes` records every update while
/// the base fields keep their creation values.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub host_id: UserId,
    pub name: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub max_guests_allowed: i64,
    pub cuisine: Vec<String>,
    pub price_per_person: f64,
    pub description: String,
    pub guests: Vec<String>,
    pub rating: Option<f64>,
    pub published: bool,
    pub view_count: i64,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<ChangeRecord>,
}

/// Command to create an event, hosted by the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub name: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub max_guests_allowed: i64,
    pub cuisine: Vec<String>,
    pub price_per_person: f64,
    pub description: String,
}

/// Command to update an event; only supplied fields are recorded.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventCommand {
    pub name: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub max_guests_allowed: Option<i64>,
    pub cuisine: Option<Vec<String>>,
    pub price_per_person: Option<f64>,
    pub description: Option<String>,
    pub guests: Option<Vec<String>>,
    pub rating: Option<f64>,
}

impl UpdateEventCommand {
    pub fn into_change_set(self) -> ChangeSet {
        ChangeSet::new()
            .set("name", self.name)
            .set("start_datetime", self.start_datetime)
            .set("end_datetime", self.end_datetime)
            .set("max_guests_allowed", self.max_guests_allowed)
            .set("cuisine", self.cuisine)
            .set("price_per_person", self.price_per_person)
            .set("description", self.description)
            .set("guests", self.guests)
            .set("rating", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::FieldValue;

    #[test]
    fn test_event_id_from_string() {
        assert!(EventId::from_string(&EventId::new().to_string()).is_ok());
        assert!(matches!(
            EventId::from_string("-1"),
            Err(EventIdError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_update_command_change_set() {
        let command = UpdateEventCommand {
            max_guests_allowed: Some(8),
            guests: Some(vec!["alice".to_string()]),
            ..Default::default()
        };

        let changes = command.into_change_set();

        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes.get("max_guests_allowed"),
            Some(&FieldValue::Integer(8))
        );
        assert_eq!(
            changes.get("guests"),
            Some(&FieldValue::List(vec!["alice".to_string()]))
        );
    }
}
