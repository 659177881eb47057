//! Error types for the PageHaus crate
//!
//! This module contains all error types that can be returned by PageHaus operations.

use cache_system::CacheError;
use config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageHausError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Cache already started")]
    AlreadyStarted,
}
