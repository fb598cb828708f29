//! Environment Configuration
//!
//! Central loading of the variables used by the API and worker
//! binaries. Defaults favor local execution; environments override in
//! Docker/K8s.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::rate_limit::RateLimitConfig;

/// Aggregated parameters for both binaries
#[derive(Debug, Clone)]
pub struct Config {
    pub http_address: String,

    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_db: String,
    pub postgres_sslmode: String,

    pub redis_addr: String,
    pub redis_password: String,
    pub redis_db: u32,

    pub queue_key_prefix: String,
    pub counter_key_prefix: String,

    pub rate_limit: RateLimitConfig,

    pub auto_migrate: bool,
    pub worker_metrics_address: String,
    pub operator_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_address: "0.0.0.0:8080".to_string(),
            postgres_host: "localhost".to_string(),
            postgres_port: 5432,
            postgres_user: "votes".to_string(),
            postgres_password: "votes".to_string(),
            postgres_db: "votes".to_string(),
            postgres_sslmode: "disable".to_string(),
            redis_addr: "localhost:6379".to_string(),
            redis_password: String::new(),
            redis_db: 0,
            queue_key_prefix: "queue:votes".to_string(),
            counter_key_prefix: "counter".to_string(),
            rate_limit: RateLimitConfig::default(),
            auto_migrate: true,
            worker_metrics_address: "0.0.0.0:9090".to_string(),
            operator_token: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            http_address: get_env("HTTP_ADDRESS", defaults.http_address),
            postgres_host: get_env("POSTGRES_HOST", defaults.postgres_host),
            postgres_port: get_env_parsed("POSTGRES_PORT", defaults.postgres_port),
            postgres_user: get_env("POSTGRES_USER", defaults.postgres_user),
            postgres_password: get_env("POSTGRES_PASSWORD", defaults.postgres_password),
            postgres_db: get_env("POSTGRES_DB", defaults.postgres_db),
            postgres_sslmode: get_env("POSTGRES_SSLMODE", defaults.postgres_sslmode),
            redis_addr: get_env("REDIS_ADDR", defaults.redis_addr),
            redis_password: get_env("REDIS_PASSWORD", defaults.redis_password),
            redis_db: get_env_parsed("REDIS_DB", defaults.redis_db),
            queue_key_prefix: get_env("REDIS_QUEUE_PREFIX", defaults.queue_key_prefix),
            counter_key_prefix: get_env("REDIS_COUNTER_PREFIX", defaults.counter_key_prefix),
            rate_limit: RateLimitConfig {
                enabled: get_env_parsed("RATE_LIMIT_ENABLED", true),
                max_votes: get_env_parsed("RATE_LIMIT_MAX", 30),
                window: Duration::from_secs(get_env_parsed("RATE_LIMIT_WINDOW", 60)),
                key_prefix: get_env("RATE_LIMIT_PREFIX", "ratelimit".to_string()),
            },
            auto_migrate: get_env_parsed("DB_AUTO_MIGRATE", defaults.auto_migrate),
            worker_metrics_address: get_env(
                "WORKER_METRICS_ADDRESS",
                defaults.worker_metrics_address,
            ),
            operator_token: env::var("OPERATOR_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// DSN in the form sqlx and migration tooling expect.
    pub fn postgres_dsn(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_db,
            self.postgres_sslmode,
        )
    }

    pub fn redis_url(&self) -> String {
        if self.redis_password.is_empty() {
            format!("redis://{}/{}", self.redis_addr, self.redis_db)
        } else {
            format!(
                "redis://:{}@{}/{}",
                self.redis_password, self.redis_addr, self.redis_db
            )
        }
    }
}

fn get_env(key: &str, fallback: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

fn get_env_parsed<T: FromStr>(key: &str, fallback: T) -> T
where
    T::Err: Display,
{
    let Ok(value) = env::var(key) else {
        return fallback;
    };
    if value.is_empty() {
        return fallback;
    }
    match value.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(key, value, %err, "Invalid environment value, using default");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http_address, "0.0.0.0:8080");
        assert_eq!(config.postgres_port, 5432);
        assert_eq!(config.queue_key_prefix, "queue:votes");
        assert_eq!(config.counter_key_prefix, "counter");
        assert!(config.auto_migrate);
        assert!(config.operator_token.is_none());
    }

    #[test]
    fn test_postgres_dsn() {
        let config = Config {
            postgres_user: "u".into(),
            postgres_password: "p".into(),
            postgres_host: "db".into(),
            postgres_port: 5433,
            postgres_db: "votes_test".into(),
            postgres_sslmode: "require".into(),
            ..Config::default()
        };
        assert_eq!(
            config.postgres_dsn(),
            "postgres://u:p@db:5433/votes_test?sslmode=require"
        );
    }

    #[test]
    fn test_redis_url() {
        let mut config = Config {
            redis_addr: "cache:6379".into(),
            redis_db: 2,
            ..Config::default()
        };
        assert_eq!(config.redis_url(), "redis://cache:6379/2");

        config.redis_password = "secret".into();
        assert_eq!(config.redis_url(), "redis://:secret@cache:6379/2");
    }
}
