//! # PageHaus
//!
//! A Redis-backed page cache adapter for static-site build and serve pipelines.
//! Rendered pages are looked up by a key derived from the request path, and fresh
//! renders are written back with an expiration. When Redis is unreachable every
//! operation quietly becomes a no-op, so the cache never breaks the pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagehaus::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CacheConfig::default()
//!         .with_url("redis://:password@localhost:6379".to_string())
//!         .with_expiration(300);
//!
//!     let mut pagehaus = PageHaus::new(config, Arc::new(TracingSink))?
//!         .with_cache_key(|path, request| {
//!             let lang = request.and_then(|r| r.cookie("lang")).unwrap_or("en");
//!             format!("{}_{}", path, lang)
//!         });
//!     pagehaus.start()?;
//!
//!     let cache = pagehaus.adapter();
//!     let request = RequestContext::new("GET", "/").with_cookie("lang", "fr");
//!
//!     if let Some(body) = cache.fetch("/", Some(&request)).await? {
//!         println!("cache hit: {}", body);
//!     } else {
//!         let response = ResponseContext::new().with_status(200).with_request(request);
//!         cache.put("/", "<body>Bonjour</body>", Some(&response)).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::PageHaus;
pub use crate::errors::PageHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ConnectionParams};

// Re-export internal crates used by the public API
pub use cache_system;
pub use signal_system;

// Re-export external dependencies used in public API
pub use async_trait;
