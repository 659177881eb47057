//! Redis store client
//!
//! This module provides the Redis implementation of [`KeyValueStore`]:
//! one multiplexed async connection, lifecycle signals for connect, end and
//! error, and a reconnect loop that keeps trying while the connection is down.

use crate::errors::CacheError;
use crate::store::{KeyValueStore, WriteCommand, WritePipeline};
use async_trait::async_trait;
use config::{CacheConfig, ConnectionParams};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use signal_system::{ConnectionEvent, SignalManager};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

/// An open connection and the connect attempt that produced it
struct ActiveConnection {
    generation: u64,
    connection: MultiplexedConnection,
}

/// Redis-backed key-value store
pub struct RedisStore {
    /// Opening fails only for URLs the client cannot parse; the reason is
    /// reported through the lifecycle signals on the first connect attempt.
    client: Result<Client, String>,
    params: ConnectionParams,
    connection: RwLock<Option<ActiveConnection>>,
    generation: AtomicU64,
    signals: SignalManager,
    dropped: Notify,
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = match self.connection.try_read() {
            Ok(connection) => match connection.as_ref() {
                Some(_) => "connected",
                None => "no_connection",
            },
            Err(_) => "lock_error",
        };

        f.debug_struct("RedisStore")
            .field("params", &self.params)
            .field("connected", &connection_status)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("signals", &self.signals)
            .finish()
    }
}

impl RedisStore {
    /// Create a client for the given parameters. No connection is made yet.
    pub fn new(params: ConnectionParams) -> Self {
        let client = Client::open(params.connection_url().as_str()).map_err(|err| err.to_string());

        Self {
            client,
            params,
            connection: RwLock::new(None),
            generation: AtomicU64::new(0),
            signals: SignalManager::new(),
            dropped: Notify::new(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.connection_params())
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    /// Establish the connection, emitting `Connect` on success and `Error` on failure
    pub async fn connect(&self) -> Result<(), CacheError> {
        let client = match &self.client {
            Ok(client) => client,
            Err(reason) => {
                self.signals.emit(ConnectionEvent::error(reason.clone()));
                return Err(CacheError::Connection(reason.clone()));
            }
        };

        match client.get_multiplexed_async_connection().await {
            Ok(connection) => {
                let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                *self.connection.write().await = Some(ActiveConnection {
                    generation,
                    connection,
                });
                self.signals.emit(ConnectionEvent::connect());
                Ok(())
            }
            Err(err) => {
                self.signals.emit(ConnectionEvent::error(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Drop the current connection, emitting `End` if one was open
    pub async fn disconnect(&self) {
        let previous = self.connection.write().await.take();
        if previous.is_some() {
            self.signals.emit(ConnectionEvent::end());
            self.dropped.notify_one();
        }
    }

    /// Keep the connection up: connect, wait until it drops, reconnect.
    ///
    /// Failed attempts are retried every `interval`. A client that could not
    /// be opened at all gives up after reporting the error once.
    pub async fn supervise(self: Arc<Self>, interval: Duration) {
        loop {
            if !self.is_connected().await {
                if let Err(err) = self.connect().await {
                    if self.client.is_err() {
                        tracing::warn!(error = %err, "redis client could not be opened, not retrying");
                        return;
                    }
                    #[cfg(feature = "debug-logging")]
                    tracing::debug!(error = %err, retry_in = ?interval, "redis connect failed");
                    tokio::time::sleep(interval).await;
                    continue;
                }
            }
            self.dropped.notified().await;
        }
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<String, CacheError> {
        let (generation, mut conn) = self.connection().await?;

        match redis::cmd("PING").query_async(&mut conn).await {
            Ok(pong) => Ok(pong),
            Err(err) => Err(self.command_failed(err, generation).await),
        }
    }

    async fn connection(&self) -> Result<(u64, MultiplexedConnection), CacheError> {
        self.connection
            .read()
            .await
            .as_ref()
            .map(|active| (active.generation, active.connection.clone()))
            .ok_or_else(|| CacheError::Connection("no active Redis connection".into()))
    }

    /// Drop the connection only if it is still the one from `generation`.
    ///
    /// A command that was issued on an older connection must not tear down a
    /// connection made after it.
    async fn connection_lost(&self, generation: u64) {
        let mut current = self.connection.write().await;
        if current.as_ref().map(|active| active.generation) != Some(generation) {
            return;
        }
        current.take();
        drop(current);

        self.signals.emit(ConnectionEvent::end());
        self.dropped.notify_one();
    }

    /// A command failure caused by a lost connection also ends that connection
    async fn command_failed(&self, err: RedisError, generation: u64) -> CacheError {
        if err.is_connection_dropped() || err.is_io_error() {
            tracing::warn!(error = %err, generation, "redis connection lost");
            self.connection_lost(generation).await;
        }
        err.into()
    }
}

/// `MULTI`, the queued writes in order, `EXEC`
fn build_pipeline(pipeline: &WritePipeline) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for command in pipeline.commands() {
        match command {
            WriteCommand::Set { key, value } => {
                pipe.set(key, value).ignore();
            }
            WriteCommand::Expire { key, seconds } => {
                let seconds = i64::try_from(*seconds).unwrap_or(i64::MAX);
                pipe.expire(key, seconds).ignore();
            }
        }
    }
    pipe
}

#[async_trait]
impl KeyValueStore for RedisStore {
    fn signals(&self) -> &SignalManager {
        &self.signals
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let (generation, mut conn) = self.connection().await?;

        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => Ok(value),
            Err(err) => Err(self.command_failed(err, generation).await),
        }
    }

    async fn exec(&self, pipeline: WritePipeline) -> Result<(), CacheError> {
        if pipeline.is_empty() {
            return Ok(());
        }

        let pipe = build_pipeline(&pipeline);
        let (generation, mut conn) = self.connection().await?;
        let result: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
        match result {
            Ok(()) => Ok(()),
            Err(err) => Err(self.command_failed(err, generation).await),
        }
    }
}
