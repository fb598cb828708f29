//! Readiness Checks
//!
//! Pings the shared stores so load balancers stop routing to an
//! instance that lost either of them.

use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use tokio::time::timeout;

const PING_BUDGET: Duration = Duration::from_secs(2);

/// Readiness checker over the Postgres pool and the Redis handle
#[derive(Clone)]
pub struct HealthChecker {
    pool: PgPool,
    redis: ConnectionManager,
}

impl HealthChecker {
    pub fn new(pool: PgPool, redis: ConnectionManager) -> Self {
        Self { pool, redis }
    }

    /// Both stores must answer within the ping budget.
    pub async fn readiness(&self) -> AppResult<()> {
        timeout(PING_BUDGET, sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map_err(|_| AppError::service_unavailable("Database ping timed out"))??;

        let mut conn = self.redis.clone();
        timeout(PING_BUDGET, redis::cmd("PING").query_async::<()>(&mut conn))
            .await
            .map_err(|_| AppError::service_unavailable("Fast store ping timed out"))??;

        Ok(())
    }
}
