//! Redis Counter Store
//!
//! Prefix-namespaced integer counters. Increments are atomic per key,
//! so concurrent intake processes and workers cannot corrupt them.

use std::collections::HashMap;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::repository::CounterStore;
use crate::error::VotingResult;

#[derive(Clone)]
pub struct RedisCounterStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisCounterStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }
}

impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, delta: i64) -> VotingResult<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(self.key(key), delta).await?;
        Ok(value)
    }

    async fn get(&self, key: &str) -> VotingResult<i64> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn.get(self.key(key)).await?;
        Ok(value.unwrap_or(0))
    }

    async fn get_many(&self, keys: &[String]) -> VotingResult<HashMap<String, i64>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let namespaced: Vec<String> = keys.iter().map(|k| self.key(k)).collect();

        // MGET keeps a full tally page to one round-trip.
        let mut conn = self.conn.clone();
        let values: Vec<Option<i64>> = conn.mget(namespaced).await?;

        Ok(keys
            .iter()
            .cloned()
            .zip(values.into_iter().map(|v| v.unwrap_or(0)))
            .collect())
    }
}
