//! Cache system for Redis-backed page caching
//!
//! This crate provides the page cache adapter, the store contract it is
//! written against, and the Redis implementation of that contract.

pub mod adapter;
pub mod connection;
pub mod context;
pub mod errors;
pub mod key;
pub mod policy;
pub mod prelude;
pub mod redis_store;
pub mod store;

// Re-export centralized config
pub use config::{CacheConfig, ConnectionParams};

pub use adapter::{CacheAdapter, PutOutcome};
pub use connection::{ConnectionState, ConnectionStatus, StatusSink, TracingSink};
pub use context::{RequestContext, ResponseContext};
pub use errors::CacheError;
pub use key::{KeyStrategy, PathKey, Prefixed};
pub use redis_store::RedisStore;
pub use store::{KeyValueStore, WriteCommand, WritePipeline};
