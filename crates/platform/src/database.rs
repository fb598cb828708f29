//! Store Factories
//!
//! Connection bootstrap for the two shared stores. Both factories
//! verify connectivity within a 5-second budget before handing the
//! handle out, so a misconfigured address fails at startup instead of
//! on the first vote.

use std::time::Duration;

use redis::Client;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const CONNECT_BUDGET: Duration = Duration::from_secs(5);

/// Open the Postgres pool shared by repositories and migrations.
pub async fn connect_postgres(dsn: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(CONNECT_BUDGET)
        .connect(dsn)
        .await
}

/// Open a managed Redis connection and ping it before use.
///
/// The manager transparently reconnects, so queue, counters and the
/// rate limiter can share clones of one handle.
pub async fn connect_redis(url: &str) -> Result<ConnectionManager, redis::RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(3)
        .set_connection_timeout(CONNECT_BUDGET);

    let client = Client::open(url)?;
    let mut manager = client.get_connection_manager_with_config(config).await?;

    redis::cmd("PING").query_async::<()>(&mut manager).await?;

    Ok(manager)
}
