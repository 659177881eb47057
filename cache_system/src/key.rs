//! Cache key derivation strategies

use crate::context::RequestContext;

/// Derives the store key for a path and optional request.
///
/// Implementations must be deterministic: the same inputs always map to the
/// same key. The adapter calls the strategy on every operation and never
/// remembers its output.
pub trait KeyStrategy: Send + Sync {
    fn derive(&self, path: &str, request: Option<&RequestContext>) -> String;
}

impl<F> KeyStrategy for F
where
    F: Fn(&str, Option<&RequestContext>) -> String + Send + Sync,
{
    fn derive(&self, path: &str, request: Option<&RequestContext>) -> String {
        self(path, request)
    }
}

/// Default strategy: the path itself is the key
#[derive(Debug, Clone, Copy, Default)]
pub struct PathKey;

impl KeyStrategy for PathKey {
    fn derive(&self, path: &str, _request: Option<&RequestContext>) -> String {
        path.to_string()
    }
}

/// Prepends a fixed namespace to the key produced by another strategy
#[derive(Debug, Clone)]
pub struct Prefixed<K> {
    prefix: String,
    inner: K,
}

impl<K: KeyStrategy> Prefixed<K> {
    pub fn new(prefix: impl Into<String>, inner: K) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

impl<K: KeyStrategy> KeyStrategy for Prefixed<K> {
    fn derive(&self, path: &str, request: Option<&RequestContext>) -> String {
        format!("{}:{}", self.prefix, self.inner.derive(path, request))
    }
}
