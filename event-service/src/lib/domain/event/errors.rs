use thiserror::Error;

use crate::domain::event::models::EventId;

/// Error type for EventId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error type for all event-related operations
#[derive(Debug, Clone, Error)]
pub enum EventError {
    #[error("Invalid event ID: {0}")]
    InvalidEventId(#[from] EventIdError),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
