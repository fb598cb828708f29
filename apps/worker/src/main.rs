//! Vote Worker Entry Point
//!
//! Long-lived consumer of the vote queue: persists each vote in the
//! tally store, maintains the fast counters and exposes metrics on the
//! side. Scaling is by running more worker processes on the same
//! queue.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use kernel::clock::SystemClock;
use kernel::error::app_error::AppResult;
use platform::config::Config;
use platform::database::{connect_postgres, connect_redis};
use platform::health::HealthChecker;
use platform::metrics;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voting::ProcessVoteUseCase;
use voting::VotingError;
use voting::domain::repository::VoteQueue;
use voting::infra::postgres::PgVotingRepository;
use voting::infra::redis_counter::RedisCounterStore;
use voting::infra::redis_queue::RedisVoteQueue;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worker=info,voting=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Worker shares the same pool setup and migrations as the API so
    // the schema can never diverge between the two binaries.
    let pool = connect_postgres(&config.postgres_dsn()).await?;
    tracing::info!("Connected to database");

    if config.auto_migrate {
        sqlx::migrate!("../../database/migrations").run(&pool).await?;
        tracing::info!("Migrations completed");
    }

    // Redis is mandatory here: the queue and the counters live on it.
    let redis_conn = connect_redis(&config.redis_url()).await?;
    tracing::info!("Connected to fast store");

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    if !config.worker_metrics_address.is_empty() {
        let checker = HealthChecker::new(pool.clone(), redis_conn.clone());
        let addr: SocketAddr = config.worker_metrics_address.parse()?;
        // Observability sidecar while the main task drains the queue.
        tokio::spawn(serve_ops(addr, checker));
    }

    let queue = RedisVoteQueue::new(redis_conn.clone(), config.queue_key_prefix.clone());
    let processor = ProcessVoteUseCase::new(
        Arc::new(PgVotingRepository::new(pool.clone())),
        Some(Arc::new(RedisCounterStore::new(
            redis_conn.clone(),
            config.counter_key_prefix.clone(),
        ))),
        Arc::new(SystemClock::new()),
    );

    tracing::info!("Worker started, waiting for votes");

    match queue.consume(shutdown.clone(), &processor).await {
        Err(VotingError::Cancelled) => {
            tracing::info!("Worker stopped on shutdown signal");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Worker stopped on error");
            Err(err.into())
        }
        Ok(()) => Ok(()),
    }
}

fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to install SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => {},
                _ = sigterm.recv() => {},
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
        }

        tracing::info!("Shutdown signal received");
        shutdown.cancel();
    });
}

async fn serve_ops(addr: SocketAddr, checker: HealthChecker) {
    let app = Router::new()
        .route("/metrics", get(render_metrics))
        .route("/readyz", get(readyz))
        .with_state(checker);

    match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!(%addr, "Worker metrics listening");
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "Worker metrics server failed");
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "Worker metrics bind failed");
        }
    }
}

async fn readyz(State(checker): State<HealthChecker>) -> AppResult<&'static str> {
    checker.readiness().await?;
    Ok("ok")
}

async fn render_metrics() -> String {
    metrics::render()
}
