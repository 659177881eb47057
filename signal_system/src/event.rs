//! Connection lifecycle event types and definitions
//!
//! This module defines the events a store client emits while its
//! connection comes up, goes away, or reports a failure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Connection established and ready for commands
    Connect,
    /// Connection closed or lost
    End,
    /// Client reported an error; connection state is unchanged
    Error,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Connect => write!(f, "connect"),
            EventType::End => write!(f, "end"),
            EventType::Error => write!(f, "error"),
        }
    }
}

/// Connection lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionEvent {
    pub event_type: EventType,
    /// Error description for `EventType::Error`
    pub message: Option<String>,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ConnectionEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            message: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn connect() -> Self {
        Self::new(EventType::Connect)
    }

    pub fn end() -> Self {
        Self::new(EventType::End)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventType::Error).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
