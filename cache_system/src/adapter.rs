//! Page cache adapter
//!
//! Sits between a serving pipeline and a key-value store: looks rendered pages
//! up by key, and writes freshly rendered ones back with an expiration. A store
//! that is not connected turns every operation into a silent no-op so the cache
//! can never break the pipeline it augments.

use crate::connection::{ConnectionState, ConnectionStatus, StatusSink};
use crate::context::{RequestContext, ResponseContext};
use crate::errors::CacheError;
use crate::key::{KeyStrategy, PathKey};
use crate::policy;
use crate::store::{KeyValueStore, WritePipeline};
use config::CacheConfig;
use std::fmt::Debug;
use std::sync::Arc;

/// How a `put` call was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// Body and expiration were written
    Stored,
    /// Response status excluded it from caching
    Uncacheable,
    /// Store was not connected; nothing was attempted
    NotConnected,
}

/// Redis-backed page cache adapter
#[derive(Clone)]
pub struct CacheAdapter {
    store: Arc<dyn KeyValueStore>,
    state: ConnectionState,
    expiration: u64,
    cache_key: Arc<dyn KeyStrategy>,
}

impl Debug for CacheAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAdapter")
            .field("expiration", &self.expiration)
            .field("connected", &self.state.status())
            .finish()
    }
}

impl CacheAdapter {
    /// Create an adapter over `store`, following its lifecycle signals.
    ///
    /// Status lines for every connect, disconnect and error go to `sink`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &CacheConfig,
        sink: Arc<dyn StatusSink>,
    ) -> Result<Self, CacheError> {
        if config.expiration == 0 {
            return Err(CacheError::InvalidTtl(config.expiration));
        }

        let state = ConnectionState::new();
        state.track(store.signals(), sink);

        Ok(Self {
            store,
            state,
            expiration: config.expiration,
            cache_key: Arc::new(PathKey),
        })
    }

    /// Derive keys with a closure over the path and request
    pub fn with_cache_key<F>(self, cache_key: F) -> Self
    where
        F: Fn(&str, Option<&RequestContext>) -> String + Send + Sync + 'static,
    {
        self.with_key_strategy(cache_key)
    }

    pub fn with_key_strategy<K>(mut self, strategy: K) -> Self
    where
        K: KeyStrategy + 'static,
    {
        self.cache_key = Arc::new(strategy);
        self
    }

    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.status()
    }

    pub fn derive_key(&self, path: &str, request: Option<&RequestContext>) -> String {
        self.cache_key.derive(path, request)
    }

    /// Look up a cached body. Missing keys and a disconnected store both yield `None`.
    pub async fn fetch(
        &self,
        path: &str,
        request: Option<&RequestContext>,
    ) -> Result<Option<String>, CacheError> {
        if !self.state.is_connected() {
            return Ok(None);
        }

        let key = self.derive_key(path, request);
        let value = self.store.get(&key).await?;

        #[cfg(feature = "debug-logging")]
        tracing::debug!(key = %key, hit = value.is_some(), "cache fetch");

        Ok(value)
    }

    /// Store a rendered body with the configured expiration.
    ///
    /// Redirects and error responses are skipped; a response without a status
    /// code (or no response at all) is stored.
    pub async fn put(
        &self,
        path: &str,
        body: &str,
        response: Option<&ResponseContext>,
    ) -> Result<PutOutcome, CacheError> {
        if !self.state.is_connected() {
            return Ok(PutOutcome::NotConnected);
        }

        let request = response.and_then(ResponseContext::request);
        let key = self.derive_key(path, request);

        let status_code = response.and_then(ResponseContext::status);
        if !policy::is_cacheable(status_code) {
            #[cfg(feature = "debug-logging")]
            tracing::debug!(key = %key, status = ?status_code, "response not cacheable");
            return Ok(PutOutcome::Uncacheable);
        }

        let pipeline = WritePipeline::new()
            .set(&key, body)
            .expire(&key, self.expiration);
        self.store.exec(pipeline).await?;

        Ok(PutOutcome::Stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::TracingSink;
    use crate::store::WriteCommand;
    use async_trait::async_trait;
    use signal_system::{ConnectionEvent, SignalManager};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        signals: SignalManager,
        values: Mutex<HashMap<String, String>>,
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl MockStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KeyValueStore for MockStore {
        fn signals(&self) -> &SignalManager {
            &self.signals
        }

        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            self.calls.lock().unwrap().push(format!("GET {}", key));
            if self.fail {
                return Err(CacheError::Connection("connection reset".into()));
            }
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn exec(&self, pipeline: WritePipeline) -> Result<(), CacheError> {
            let mut calls = self.calls.lock().unwrap();
            for command in pipeline.commands() {
                match command {
                    WriteCommand::Set { key, .. } => calls.push(format!("SET {}", key)),
                    WriteCommand::Expire { key, seconds } => {
                        calls.push(format!("EXPIRE {} {}", key, seconds))
                    }
                }
            }
            if self.fail {
                return Err(CacheError::Connection("connection reset".into()));
            }
            let mut values = self.values.lock().unwrap();
            for command in pipeline.commands() {
                if let WriteCommand::Set { key, value } = command {
                    values.insert(key.clone(), value.clone());
                }
            }
            Ok(())
        }
    }

    fn adapter(store: Arc<MockStore>) -> CacheAdapter {
        CacheAdapter::new(store, &CacheConfig::default(), Arc::new(TracingSink)).unwrap()
    }

    fn connected(store: &MockStore) {
        store.signals.emit(ConnectionEvent::connect());
    }

    #[test]
    fn test_rejects_zero_expiration() {
        let store = Arc::new(MockStore::default());
        let config = CacheConfig::default().with_expiration(0);
        let result = CacheAdapter::new(store, &config, Arc::new(TracingSink));
        assert!(matches!(result, Err(CacheError::InvalidTtl(0))));
    }

    #[tokio::test]
    async fn test_disconnected_operations_never_touch_store() {
        let store = Arc::new(MockStore::default());
        let cache = adapter(store.clone());

        assert!(!cache.is_connected());
        assert_eq!(cache.fetch("/", None).await.unwrap(), None);
        assert_eq!(
            cache.put("/", "<body/>", None).await.unwrap(),
            PutOutcome::NotConnected
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_put_writes_set_then_expire() {
        let store = Arc::new(MockStore::default());
        let cache = adapter(store.clone());
        connected(&store);

        let outcome = cache.put("/", "<body>Hola</body>", None).await.unwrap();
        assert_eq!(outcome, PutOutcome::Stored);
        assert_eq!(store.calls(), vec!["SET /", "EXPIRE / 300"]);
    }

    #[tokio::test]
    async fn test_put_skips_error_status_before_store() {
        let store = Arc::new(MockStore::default());
        let cache = adapter(store.clone());
        connected(&store);

        let response = ResponseContext::new().with_status(503);
        let outcome = cache.put("/", "<body/>", Some(&response)).await.unwrap();
        assert_eq!(outcome, PutOutcome::Uncacheable);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let store = Arc::new(MockStore::failing());
        let cache = adapter(store.clone());
        connected(&store);

        assert!(cache.fetch("/", None).await.is_err());
        assert!(cache.put("/", "<body/>", None).await.is_err());
        assert_eq!(store.calls(), vec!["GET /", "SET /", "EXPIRE / 300"]);
    }

    #[tokio::test]
    async fn test_disconnect_stops_traffic_again() {
        let store = Arc::new(MockStore::default());
        let cache = adapter(store.clone());
        connected(&store);
        cache.put("/", "<body/>", None).await.unwrap();

        store.signals.emit(ConnectionEvent::end());
        assert_eq!(cache.status(), ConnectionStatus::Disconnected);
        assert_eq!(cache.fetch("/", None).await.unwrap(), None);
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_key_uses_response_request() {
        let store = Arc::new(MockStore::default());
        let cache = adapter(store.clone()).with_cache_key(|path, request| {
            format!(
                "{}_{}",
                path,
                request.and_then(|r| r.cookie("lang")).unwrap_or("en")
            )
        });
        connected(&store);

        let response = ResponseContext::new()
            .with_status(200)
            .with_request(RequestContext::new("GET", "/").with_cookie("lang", "fr"));
        cache.put("/", "<body>Salut</body>", Some(&response)).await.unwrap();
        cache.put("/", "<body>Hello</body>", None).await.unwrap();

        assert_eq!(
            store.calls(),
            vec!["SET /_fr", "EXPIRE /_fr 300", "SET /_en", "EXPIRE /_en 300"]
        );
    }

    #[test]
    fn test_debug_output() {
        let cache = adapter(Arc::new(MockStore::default()));
        assert_eq!(
            format!("{:?}", cache),
            "CacheAdapter { expiration: 300, connected: Disconnected }"
        );
    }
}
