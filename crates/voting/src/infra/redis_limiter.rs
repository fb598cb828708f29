//! Anti-fraud Rate Limiting
//!
//! Fixed-window limiter over Redis plus the no-op strategy used when
//! rate limiting is disabled by configuration.

use platform::crypto::sha1_hex;
use platform::rate_limit::RateLimitConfig;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::entities::Vote;
use crate::domain::repository::AntiFraud;
use crate::error::{VotingError, VotingResult};

/// Fixed-window limiter keyed on a salted client fingerprint
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(conn: ConnectionManager, config: RateLimitConfig) -> Self {
        Self { conn, config }
    }

    /// `{prefix}:{hex(sha1(polling_id|source_ip|user_agent))}`
    fn build_key(&self, vote: &Vote) -> String {
        let base = format!(
            "{}|{}|{}",
            vote.polling_id, vote.source_ip, vote.user_agent
        );
        format!("{}:{}", self.config.key_prefix, sha1_hex(base.as_bytes()))
    }
}

impl AntiFraud for RedisRateLimiter {
    async fn validate(&self, vote: &Vote) -> VotingResult<()> {
        if !self.config.is_active() {
            return Ok(());
        }

        let key = self.build_key(vote);
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(&key, 1).await?;

        if count == 1 {
            // First hit establishes the window. Concurrent first hits
            // may both land here; the settings are identical.
            let _: bool = conn.expire(&key, self.config.window_secs()).await?;
        }

        if count > i64::from(self.config.max_votes) {
            tracing::warn!(polling_id = %vote.polling_id, count, "Vote rate limit exceeded");
            return Err(VotingError::RateLimited);
        }

        Ok(())
    }
}

/// Admits everything; used when rate limiting is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAntiFraud;

impl AntiFraud for NoopAntiFraud {
    async fn validate(&self, _vote: &Vote) -> VotingResult<()> {
        Ok(())
    }
}

/// Runtime selection between the Redis limiter and the no-op strategy.
///
/// The port traits return `impl Future`, so they cannot sit behind
/// `dyn`; an enum keeps the choice a plain value.
pub enum AntiFraudStrategy {
    Limiter(RedisRateLimiter),
    Noop(NoopAntiFraud),
}

impl AntiFraud for AntiFraudStrategy {
    async fn validate(&self, vote: &Vote) -> VotingResult<()> {
        match self {
            AntiFraudStrategy::Limiter(limiter) => limiter.validate(vote).await,
            AntiFraudStrategy::Noop(noop) => noop.validate(vote).await,
        }
    }
}
