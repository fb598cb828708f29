//! API Server Entry Point
//!
//! Intake service: validates vote submissions, consults anti-fraud and
//! hands accepted votes to the queue. Uses `anyhow` for startup
//! errors; request-level errors use the voting crate's `VotingError`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use kernel::clock::SystemClock;
use kernel::error::app_error::AppResult;
use kernel::id::IdGenerator;
use platform::config::Config;
use platform::database::{connect_postgres, connect_redis};
use platform::health::HealthChecker;
use platform::metrics;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voting::infra::postgres::PgVotingRepository;
use voting::infra::redis_counter::RedisCounterStore;
use voting::infra::redis_limiter::{AntiFraudStrategy, NoopAntiFraud, RedisRateLimiter};
use voting::infra::redis_queue::RedisVoteQueue;
use voting::presentation::handlers::VotingAppState;
use voting::voting_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,voting=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Database connection
    let pool = connect_postgres(&config.postgres_dsn()).await?;
    tracing::info!("Connected to database");

    // Run migrations only when enabled, to avoid surprises in production
    if config.auto_migrate {
        sqlx::migrate!("../../database/migrations").run(&pool).await?;
        tracing::info!("Migrations completed");
    }

    // Redis carries the queue, the counters and the rate-limit cells
    let redis_conn = connect_redis(&config.redis_url()).await?;
    tracing::info!("Connected to fast store");

    let antifraud = if config.rate_limit.is_active() {
        AntiFraudStrategy::Limiter(RedisRateLimiter::new(
            redis_conn.clone(),
            config.rate_limit.clone(),
        ))
    } else {
        AntiFraudStrategy::Noop(NoopAntiFraud)
    };

    let state = VotingAppState {
        repo: Arc::new(PgVotingRepository::new(pool.clone())),
        queue: Some(Arc::new(RedisVoteQueue::new(
            redis_conn.clone(),
            config.queue_key_prefix.clone(),
        ))),
        counters: Some(Arc::new(RedisCounterStore::new(
            redis_conn.clone(),
            config.counter_key_prefix.clone(),
        ))),
        antifraud: Arc::new(antifraud),
        clock: Arc::new(SystemClock::new()),
        ids: Arc::new(IdGenerator::new()),
    };

    let checker = HealthChecker::new(pool.clone(), redis_conn.clone());

    let ops = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(render_metrics))
        .with_state(checker);

    // Build router
    let app = Router::new()
        .merge(voting_router(state, config.operator_token.clone()))
        .merge(ops)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.http_address.parse()?;
    tracing::info!(%addr, "API listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn readyz(State(checker): State<HealthChecker>) -> AppResult<&'static str> {
    checker.readiness().await?;
    Ok("ok")
}

async fn render_metrics() -> String {
    metrics::render()
}
