//! Core PageHaus functionality
//!
//! This module contains the main PageHaus struct, which wires the Redis store
//! client, its reconnect loop and the page cache adapter together.

use cache_system::{CacheAdapter, RedisStore, RequestContext, StatusSink};
use config::{AppConfig, CacheConfig};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::errors::PageHausError;

/// Main PageHaus coordinator owning the store client and the adapter
pub struct PageHaus {
    config: CacheConfig,
    store: Arc<RedisStore>,
    adapter: CacheAdapter,
    supervisor: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for PageHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHaus")
            .field("config", &self.config)
            .field("adapter", &self.adapter)
            .field("started", &self.supervisor.is_some())
            .finish()
    }
}

impl PageHaus {
    /// Build the store client and adapter. Nothing connects until [`PageHaus::start`].
    pub fn new(config: CacheConfig, sink: Arc<dyn StatusSink>) -> Result<Self, PageHausError> {
        config.validate()?;

        let store = Arc::new(RedisStore::from_config(&config));
        let adapter = CacheAdapter::new(store.clone(), &config, sink)?;

        crate::debug_log!(params = ?store.params(), "page cache created");

        Ok(Self {
            config,
            store,
            adapter,
            supervisor: None,
        })
    }

    /// Build from `pagehaus.toml` (or the file named by `PAGEHAUS_CONFIG`)
    pub fn from_env(sink: Arc<dyn StatusSink>) -> Result<Self, PageHausError> {
        let app_config = AppConfig::load()?;
        Self::new(app_config.cache, sink)
    }

    /// Derive cache keys with a custom function instead of the bare path
    pub fn with_cache_key<F>(mut self, cache_key: F) -> Self
    where
        F: Fn(&str, Option<&RequestContext>) -> String + Send + Sync + 'static,
    {
        // PageHaus is Drop, so the adapter is rebuilt from a clone
        self.adapter = self.adapter.clone().with_cache_key(cache_key);
        self
    }

    /// Spawn the connection loop on the current tokio runtime
    pub fn start(&mut self) -> Result<(), PageHausError> {
        if self.supervisor.is_some() {
            return Err(PageHausError::AlreadyStarted);
        }

        let interval = self.config.reconnect_interval();
        self.supervisor = Some(tokio::spawn(self.store.clone().supervise(interval)));

        tracing::info!(interval_ms = self.config.reconnect_interval_ms, "page cache started");
        Ok(())
    }

    pub fn adapter(&self) -> &CacheAdapter {
        &self.adapter
    }

    pub fn store(&self) -> &Arc<RedisStore> {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Check Redis connection health
    pub async fn health_check(&self) -> Result<(), PageHausError> {
        self.store.ping().await?;
        crate::trace_log!("redis ping ok");
        Ok(())
    }
}

impl Drop for PageHaus {
    fn drop(&mut self) {
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.abort();
        }
    }
}
