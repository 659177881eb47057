//! Callback registry for connection lifecycle events

use crate::event::ConnectionEvent;
use crate::types::EventCallback;
use std::sync::{Arc, RwLock};

/// Fans connection events out to registered listeners.
///
/// `emit` invokes a snapshot of the listeners taken when it starts, so a
/// listener may register further listeners; those see the next event.
pub struct SignalManager {
    listeners: RwLock<Vec<EventCallback>>,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Register a listener for every future event
    pub fn add_callback<F>(&self, callback: F)
    where
        F: Fn(&ConnectionEvent) + Send + Sync + 'static,
    {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(Arc::new(callback));
        }
    }

    /// Deliver `event` to every listener, in registration order
    pub fn emit(&self, event: ConnectionEvent) {
        let snapshot: Vec<EventCallback> = match self.listeners.read() {
            Ok(listeners) => listeners.clone(),
            Err(_) => return,
        };

        #[cfg(feature = "debug-logging")]
        tracing::debug!(event = %event.event_type, listeners = snapshot.len(), "emitting connection event");

        for listener in &snapshot {
            listener(&event);
        }
    }

    pub fn clear_callbacks(&self) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.clear();
        }
    }

    pub fn callback_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}
