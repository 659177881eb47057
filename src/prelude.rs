//! Convenience re-exports for common PageHaus usage
//!
//! # Example
//!
//! ```rust
//! use pagehaus::prelude::*;
//!
//! // Now you have access to the adapter, its config and the store contract
//! ```

// Core PageHaus components
pub use crate::core::PageHaus;
pub use crate::errors::PageHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ConfigError, ConnectionParams};

// Re-export signal system for lifecycle events
pub use signal_system::prelude::*;

// Re-export cache system
pub use cache_system::prelude::*;

// Common external dependencies
pub use async_trait::async_trait;
pub use tokio;
