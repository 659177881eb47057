//! Type definitions for signal system

use crate::event::ConnectionEvent;
use std::sync::Arc;

/// Lifecycle callback. Runs synchronously on the emitting task, keep it short.
pub type EventCallback = Arc<dyn Fn(&ConnectionEvent) + Send + Sync>;
