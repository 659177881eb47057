//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::adapter::{CacheAdapter, PutOutcome};
pub use crate::connection::{ConnectionState, ConnectionStatus, StatusSink, TracingSink};
pub use crate::context::{RequestContext, ResponseContext};
pub use crate::errors::CacheError;
pub use crate::key::{KeyStrategy, PathKey, Prefixed};
pub use crate::redis_store::RedisStore;
pub use crate::store::{KeyValueStore, WriteCommand, WritePipeline};

// Re-export centralized config
pub use config::{CacheConfig, ConnectionParams};

// Common external dependencies
pub use async_trait::async_trait;
pub use redis;
pub use tokio;
