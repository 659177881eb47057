//! Connectivity tracking
//!
//! The adapter only talks to the store while the store client reports an
//! open connection. The flag is flipped exclusively by lifecycle callbacks.

use signal_system::{ConnectionEvent, EventType, SignalManager};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Line-oriented writer for human-readable status notifications
pub trait StatusSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Forwards status lines to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "pagehaus", "{}", line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
            ConnectionStatus::Connected => write!(f, "connected"),
        }
    }
}

/// Shared connectivity flag. Starts disconnected.
#[derive(Debug, Clone, Default)]
pub struct ConnectionState {
    connected: Arc<AtomicBool>,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn status(&self) -> ConnectionStatus {
        if self.is_connected() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    /// Errors leave the state untouched
    fn apply(&self, event: &ConnectionEvent) {
        match event.event_type {
            EventType::Connect => self.connected.store(true, Ordering::Release),
            EventType::End => self.connected.store(false, Ordering::Release),
            EventType::Error => {}
        }
    }

    /// Follow the client's lifecycle signals, reporting each one to `sink`
    pub fn track(&self, signals: &SignalManager, sink: Arc<dyn StatusSink>) {
        let state = self.clone();
        signals.add_callback(move |event| {
            state.apply(event);
            sink.write_line(&status_line(event));
        });
    }
}

/// Human-readable line for a lifecycle event
pub fn status_line(event: &ConnectionEvent) -> String {
    match event.event_type {
        EventType::Connect => "redis connected".to_string(),
        EventType::End => "redis disconnected".to_string(),
        EventType::Error => format!(
            "redis error; err={}",
            event.message.as_deref().unwrap_or("unknown")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl StatusSink for RecordingSink {
        fn write_line(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    #[test]
    fn test_starts_disconnected() {
        let state = ConnectionState::new();
        assert!(!state.is_connected());
        assert_eq!(state.status(), ConnectionStatus::Disconnected);
    }

    #[test]
    fn test_transitions_follow_signals() {
        let signals = SignalManager::new();
        let sink = Arc::new(RecordingSink::default());
        let state = ConnectionState::new();
        state.track(&signals, sink.clone());

        signals.emit(ConnectionEvent::connect());
        assert!(state.is_connected());

        signals.emit(ConnectionEvent::error("READONLY You can't write against a read only replica."));
        assert!(state.is_connected(), "errors must not change state");

        signals.emit(ConnectionEvent::end());
        assert!(!state.is_connected());

        signals.emit(ConnectionEvent::error("Connection refused (os error 111)"));
        assert!(!state.is_connected());

        assert_eq!(
            *sink.lines.lock().unwrap(),
            vec![
                "redis connected",
                "redis error; err=READONLY You can't write against a read only replica.",
                "redis disconnected",
                "redis error; err=Connection refused (os error 111)",
            ]
        );
    }

    #[test]
    fn test_clones_share_state() {
        let signals = SignalManager::new();
        let state = ConnectionState::new();
        let observer = state.clone();
        state.track(&signals, Arc::new(TracingSink));

        signals.emit(ConnectionEvent::connect());
        assert_eq!(observer.status(), ConnectionStatus::Connected);
        assert_eq!(observer.status().to_string(), "connected");
    }

    #[test]
    fn test_error_without_message() {
        let event = signal_system::ConnectionEvent::new(EventType::Error);
        assert_eq!(status_line(&event), "redis error; err=unknown");
    }
}
