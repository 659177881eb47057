//! The key-value store contract the adapter is written against
//!
//! Only the handful of commands a page cache needs are modelled: a single
//! GET, and an atomic pipeline of SET/EXPIRE writes.

use crate::errors::CacheError;
use async_trait::async_trait;
use signal_system::SignalManager;

/// One queued write command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCommand {
    Set { key: String, value: String },
    Expire { key: String, seconds: u64 },
}

/// Ordered batch of writes applied as one atomic transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePipeline {
    commands: Vec<WriteCommand>,
}

impl WritePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.commands.push(WriteCommand::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn expire(mut self, key: &str, seconds: u64) -> Self {
        self.commands.push(WriteCommand::Expire {
            key: key.to_string(),
            seconds,
        });
        self
    }

    pub fn commands(&self) -> &[WriteCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

/// Key-value store client used by the cache adapter
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Lifecycle signals (connect, end, error) emitted by this client
    fn signals(&self) -> &SignalManager;

    /// GET a key. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Apply every queued command, in order, as a single transaction
    async fn exec(&self, pipeline: WritePipeline) -> Result<(), CacheError>;
}
