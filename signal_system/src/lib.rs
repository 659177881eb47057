//! Signal system for store connection lifecycle events
//!
//! This crate lets a key-value store client announce connection changes
//! (connect, end, error) to whoever registered interest in them.

pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use event::{ConnectionEvent, EventType};
pub use manager::SignalManager;
pub use types::EventCallback;
